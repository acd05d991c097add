//! Maps solved member forces onto material stress estimates.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

/// Radius of a tie rod carrying a tension member, in metres.
pub const TIE_ROD_RADIUS: f64 = 1.6e-3;

/// Outer radius of the annular strut carrying a compression member, in metres.
pub const STRUT_OUTER_RADIUS: f64 = 3.0e-3;

/// Inner radius of the annular strut carrying a compression member, in metres.
pub const STRUT_INNER_RADIUS: f64 = 0.75e-3;

/// Breaking force of the reference tie rod, in newtons.
const TENSILE_BREAKING_FORCE: f64 = 3.43;

/// Length of the reference tie rod the breaking force was measured at.
const TENSILE_REFERENCE_LENGTH: f64 = 250.0;

/// Internal force direction of a member relative to its two end joints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MemberKind {
    /// The member is being pulled apart; ties to the hub carry tension.
    Tension,
    /// The member is being pushed together; chord segments carry compression.
    Compression,
}

/// Material stress estimate for a single member.
///
/// The two variants deliberately report different quantities: tension members
/// have a breaking-force model and report how much of it is consumed, while
/// compression members only report pressure per unit length and the raw
/// length. No compressive failure model exists, so no percentage is invented
/// for that branch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum StressReport {
    /// Report for a tension member.
    Tension {
        /// Axial pressure over the tie rod cross-section, in pascals.
        pressure: f64,
        /// Percentage of the breaking force consumed by the member force.
        utilisation: f64,
    },
    /// Report for a compression member.
    Compression {
        /// Pressure per unit member length, in pascals per model unit.
        pressure_per_length: f64,
        /// Length of the member in model units.
        length: f64,
    },
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Tension { utilisation, .. } => write!(f, "{utilisation:.2}%"),
            Self::Compression {
                pressure_per_length,
                length,
            } => write!(
                f,
                "{} Pa/mm, {} mm",
                pressure_per_length as i64, length as i64
            ),
        }
    }
}

/// Estimate the stress of a member from its force magnitude, length and
/// tension/compression classification.
///
/// Pure function of its three inputs. The result shape depends on `kind`:
/// see [`StressReport`].
///
/// # Examples
/// ```
/// use archspan::{classify, MemberKind, StressReport};
///
/// let report = classify(10.0, 100.0, MemberKind::Tension);
/// assert!(matches!(report, StressReport::Tension { .. }));
/// ```
#[must_use]
pub fn classify(force: f64, length: f64, kind: MemberKind) -> StressReport {
    match kind {
        MemberKind::Tension => {
            let pressure = force / (PI * TIE_ROD_RADIUS * TIE_ROD_RADIUS);
            let breaking = TENSILE_BREAKING_FORCE / TENSILE_REFERENCE_LENGTH * length;
            StressReport::Tension {
                pressure,
                utilisation: force / breaking * 100.0,
            }
        }
        MemberKind::Compression => {
            let area = PI
                * (STRUT_OUTER_RADIUS * STRUT_OUTER_RADIUS
                    - STRUT_INNER_RADIUS * STRUT_INNER_RADIUS);
            let pressure = force / area;
            StressReport::Compression {
                pressure_per_length: pressure / length,
                length,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn tension_reports_percentage_of_breaking_force() {
        let report = classify(10.0, 100.0, MemberKind::Tension);
        let StressReport::Tension {
            pressure,
            utilisation,
        } = report
        else {
            panic!("tension member produced {report:?}");
        };
        assert_relative_eq!(pressure, 10.0 / (PI * 1.6e-3 * 1.6e-3));
        // Breaking force scales linearly with length: 3.43 / 250 * 100.
        assert_relative_eq!(utilisation, 10.0 / (3.43 / 250.0 * 100.0) * 100.0);
    }

    #[test]
    fn compression_reports_pressure_per_length() {
        let report = classify(10.0, 100.0, MemberKind::Compression);
        let StressReport::Compression {
            pressure_per_length,
            length,
        } = report
        else {
            panic!("compression member produced {report:?}");
        };
        let area = PI * (3.0e-3 * 3.0e-3 - 0.75e-3 * 0.75e-3);
        assert_relative_eq!(pressure_per_length, 10.0 / area / 100.0);
        assert_relative_eq!(length, 100.0);
    }

    #[test]
    fn the_two_kinds_produce_different_shapes() {
        let tension = classify(10.0, 100.0, MemberKind::Tension);
        let compression = classify(10.0, 100.0, MemberKind::Compression);
        assert!(matches!(tension, StressReport::Tension { .. }));
        assert!(matches!(compression, StressReport::Compression { .. }));
    }

    #[test]
    fn display_matches_the_legacy_labels() {
        let tension = classify(10.0, 100.0, MemberKind::Tension);
        assert_eq!(tension.to_string(), "728.86%");
        let compression = classify(10.0, 100.0, MemberKind::Compression);
        assert_eq!(compression.to_string(), "3772 Pa/mm, 100 mm");
    }
}
