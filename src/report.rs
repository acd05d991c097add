//! Per-member force and stress reporting.

use std::fmt::Write;

use serde::Serialize;

use crate::chain::Chain;
use crate::geometry::ArchProfile;
use crate::stress::{classify, MemberKind, StressReport};

/// Force and stress figures for one member.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberReport {
    /// Human-readable member name, built from joint letters.
    pub label: String,
    /// Whether the member carries tension or compression.
    pub kind: MemberKind,
    /// Force magnitude in the member, in newtons.
    pub force: f64,
    /// Member length in model units.
    pub length: f64,
    /// Stress estimate for the member.
    pub stress: StressReport,
}

/// Solved state of the whole bridge, ready for display or export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BridgeSummary {
    /// Full horizontal extent of the bridge.
    pub span: f64,
    /// Number of joints in the chain, supports included.
    pub joint_count: usize,
    /// Every member's report: each joint's tie to the hub, then each chord
    /// segment to the next joint.
    pub members: Vec<MemberReport>,
}

impl BridgeSummary {
    /// Serialise the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Letter label for a joint, matching the on-screen node names.
fn joint_label(index: usize) -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    LETTERS.get(index).map_or_else(
        || format!("#{index}"),
        |&letter| char::from(letter).to_string(),
    )
}

/// Collect every member's force and stress estimate from a solved chain.
///
/// Ties to the hub carry tension and chord segments carry compression, which
/// picks the failure model each member is classified against.
#[must_use]
pub fn summarize(chain: &Chain, profile: &ArchProfile) -> BridgeSummary {
    let hub = profile.hub();
    let joints = chain.joints();
    let mut members = Vec::with_capacity(joints.len().saturating_mul(2));

    for (index, joint) in joints.iter().enumerate() {
        let position = joint.position(profile);
        let tie_length = (position - hub).magnitude();
        members.push(MemberReport {
            label: format!("{}-hub", joint_label(index)),
            kind: MemberKind::Tension,
            force: joint.side().magnitude(),
            length: tie_length,
            stress: classify(joint.side().magnitude(), tie_length, MemberKind::Tension),
        });
        if let Some(next) = joints.get(index + 1) {
            let chord_length = (next.position(profile) - position).magnitude();
            members.push(MemberReport {
                label: format!("{}-{}", joint_label(index), joint_label(index + 1)),
                kind: MemberKind::Compression,
                force: joint.up().magnitude(),
                length: chord_length,
                stress: classify(joint.up().magnitude(), chord_length, MemberKind::Compression),
            });
        }
    }

    BridgeSummary {
        span: profile.span(),
        joint_count: joints.len(),
        members,
    }
}

/// Render a textual summary of the solved bridge.
///
/// The report walks through every member so the force path can be
/// cross-checked against hand calculations using the method of joints
/// (<https://en.wikipedia.org/wiki/Truss#Method_of_joints>).
#[must_use]
pub fn render_summary(summary: &BridgeSummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Arch bridge analysis: {} joints over a {:.1} unit span",
        summary.joint_count, summary.span
    )
    .expect("writing to string cannot fail");

    for member in &summary.members {
        let kind = match member.kind {
            MemberKind::Tension => "tie  ",
            MemberKind::Compression => "strut",
        };
        writeln!(
            &mut output,
            "{kind} {:>7}: force = {:+.3} N over {:.1} units ({})",
            member.label, member.force, member.length, member.stress
        )
        .expect("writing to string cannot fail");
    }

    output
}
