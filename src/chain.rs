//! Core data structures and algorithms for the bridge's joint chain.

use log::debug;

use crate::errors::SolveError;
use crate::geometry::{ArchProfile, Vec2};

/// Standard gravity used to convert the load mass into a vertical force.
const GRAVITY: f64 = 9.8;

/// Minimum horizontal separation preserved between neighbouring joints.
const MIN_SEPARATION: f64 = 1.0;

/// Role of a joint within the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointKind {
    /// One of the two fixed endpoint joints. Never selectable or deletable.
    Support,
    /// A user-editable joint between the supports.
    Interior,
}

/// A point along the bridge's lower chord where forces are balanced.
///
/// Heights are always derived through the [`ArchProfile`], so a joint only
/// stores its horizontal position together with editor and solver state.
#[derive(Clone, Copy, Debug)]
pub struct Joint {
    /// Horizontal position in model units.
    x: f64,
    /// Role of the joint within the chain.
    kind: JointKind,
    /// Editor selection flag; only ever set on interior joints.
    selected: bool,
    /// Force entering from the previous segment, solved.
    down: Vec2,
    /// Force carried to the next joint along the chord, solved.
    up: Vec2,
    /// Force carried to the hub, solved.
    side: Vec2,
}

impl Joint {
    /// Create an unsolved joint.
    fn new(x: f64, kind: JointKind) -> Self {
        Self {
            x,
            kind,
            selected: false,
            down: Vec2::default(),
            up: Vec2::default(),
            side: Vec2::default(),
        }
    }

    /// Horizontal position of the joint.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Role of the joint within the chain.
    #[must_use]
    pub const fn kind(&self) -> JointKind {
        self.kind
    }

    /// Whether the joint is currently selected in the editor.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Position of the joint on the deck curve.
    #[must_use]
    pub fn position(&self, profile: &ArchProfile) -> Vec2 {
        Vec2::new(self.x, profile.height(self.x))
    }

    /// Solved force entering from below the joint.
    #[must_use]
    pub const fn down(&self) -> Vec2 {
        self.down
    }

    /// Solved force toward the next joint along the chord.
    #[must_use]
    pub const fn up(&self) -> Vec2 {
        self.up
    }

    /// Solved force toward the hub.
    #[must_use]
    pub const fn side(&self) -> Vec2 {
        self.side
    }
}

/// Ordered sequence of joints forming the bridge's lower chord.
///
/// The chain always starts with the implicit left support at `x = 0`; the
/// final position handed to [`Chain::new`] is expected to be the right
/// support at `x = span`. That expectation is checked by [`Chain::solve`]
/// rather than at construction, matching the structure's load path: a chain
/// that is not anchored at both supports has no static solution.
#[derive(Clone, Debug)]
pub struct Chain {
    /// Joints in ascending x order, supports included.
    joints: Vec<Joint>,
}

impl Chain {
    /// Build a chain from the positions after the implicit `x = 0` support.
    ///
    /// `positions` lists the interior joints in ascending order followed by
    /// the right support at the span, exactly as stored in the layout file.
    #[must_use]
    pub fn new(positions: &[f64]) -> Self {
        let mut joints = Vec::with_capacity(positions.len() + 1);
        joints.push(Joint::new(0.0, JointKind::Support));
        for (index, &x) in positions.iter().enumerate() {
            let kind = if index + 1 == positions.len() {
                JointKind::Support
            } else {
                JointKind::Interior
            };
            joints.push(Joint::new(x, kind));
        }
        Self { joints }
    }

    /// Number of joints in the chain, supports included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// True when the chain holds only the left support.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.len() <= 1
    }

    /// All joints in ascending x order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Interior joints with their chain indices.
    pub fn interior(&self) -> impl Iterator<Item = (usize, &Joint)> {
        self.joints
            .iter()
            .enumerate()
            .filter(|(_, joint)| joint.kind == JointKind::Interior)
    }

    /// Positions of every joint after the implicit left support, in order.
    ///
    /// This is the exact sequence the layout file persists.
    #[must_use]
    pub fn saved_positions(&self) -> Vec<f64> {
        self.joints.iter().skip(1).map(|joint| joint.x).collect()
    }

    /// Number of currently selected joints.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.joints.iter().filter(|joint| joint.selected).count()
    }

    /// Toggle the selection state of an interior joint.
    ///
    /// Requests for support joints are ignored; supports are never editable.
    pub fn toggle_selection(&mut self, index: usize) {
        if let Some(joint) = self.joints.get_mut(index) {
            if joint.kind == JointKind::Interior {
                joint.selected = !joint.selected;
            }
        }
    }

    /// Select an interior joint without affecting the rest of the chain.
    pub fn select(&mut self, index: usize) {
        if let Some(joint) = self.joints.get_mut(index) {
            if joint.kind == JointKind::Interior {
                joint.selected = true;
            }
        }
    }

    /// Clear every selection flag.
    pub fn clear_selection(&mut self) {
        for joint in &mut self.joints {
            joint.selected = false;
        }
    }

    /// Insert a new interior joint at `x` and restore ascending order.
    ///
    /// The insertion is refused when `x` falls outside the open span interval
    /// or collides with an existing joint position, since either would break
    /// the chain's ordering and support invariants. Returns whether a joint
    /// was added.
    pub fn insert(&mut self, x: f64, span: f64) -> bool {
        if !(x > 0.0 && x < span) {
            debug!("refusing to insert joint outside the span at x = {x}");
            return false;
        }
        if self.joints.iter().any(|joint| joint.x == x) {
            debug!("refusing to insert joint on top of an existing one at x = {x}");
            return false;
        }
        self.joints.push(Joint::new(x, JointKind::Interior));
        self.joints
            .sort_by(|a, b| a.x.total_cmp(&b.x));
        debug!("inserted joint at x = {x}");
        true
    }

    /// Remove every selected joint. Returns how many were removed.
    ///
    /// Supports are never selectable, so the endpoints always survive.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.joints.len();
        self.joints.retain(|joint| !joint.selected);
        let removed = before - self.joints.len();
        if removed > 0 {
            debug!("deleted {removed} selected joint(s)");
        }
        removed
    }

    /// Move every selected joint horizontally by `dx` model units, clamping
    /// each one so it cannot cross a neighbour.
    ///
    /// The clamp reserves [`MIN_SEPARATION`] next to the blocking neighbour
    /// and processes joints against the drag direction, so a block of joints
    /// dragged together stacks up behind the first obstacle instead of
    /// piling onto it. A move that cannot advance at all is refused. Returns
    /// whether any joint moved.
    pub fn drag_selected(&mut self, dx: f64) -> bool {
        let mut moved = false;
        let last = self.joints.len().saturating_sub(1);
        // Only interior joints can be selected, so both neighbours exist.
        if dx > 0.0 {
            for index in (1..last).rev() {
                if !self.joints[index].selected {
                    continue;
                }
                let limit = self.joints[index + 1].x - MIN_SEPARATION;
                let target = (self.joints[index].x + dx).min(limit);
                if target > self.joints[index].x {
                    self.joints[index].x = target;
                    moved = true;
                }
            }
        } else if dx < 0.0 {
            for index in 1..last {
                if !self.joints[index].selected {
                    continue;
                }
                let limit = self.joints[index - 1].x + MIN_SEPARATION;
                let target = (self.joints[index].x + dx).max(limit);
                if target < self.joints[index].x {
                    self.joints[index].x = target;
                    moved = true;
                }
            }
        }
        moved
    }

    /// Move every selected joint by `step` model units, joint by joint,
    /// refusing any move whose destination collides with an existing joint
    /// position or crosses an immediate neighbour. Returns whether any joint
    /// moved.
    pub fn nudge_selected(&mut self, step: f64) -> bool {
        let mut moved = false;
        for index in 0..self.joints.len() {
            if !self.joints[index].selected {
                continue;
            }
            let destination = self.joints[index].x + step;
            if self.joints.iter().any(|joint| joint.x == destination) {
                continue;
            }
            // Selected joints are interior, so both neighbours exist.
            if destination <= self.joints[index - 1].x
                || destination >= self.joints[index + 1].x
            {
                continue;
            }
            self.joints[index].x = destination;
            moved = true;
        }
        moved
    }

    /// Compute the force in every member for static equilibrium under a
    /// uniform `load` (mass equivalent) per joint.
    ///
    /// The chain is statically determinate: at each joint the incoming
    /// `down` force is known, and the `up` and `side` members have known
    /// directions, so the two unknown magnitudes follow from a closed-form
    /// two-unknown elimination. The left support starts with half the total
    /// vertical load and no horizontal component; each solved `up` becomes
    /// the next joint's `down`.
    ///
    /// Solving an unchanged chain twice yields bit-identical force vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::UnanchoredSpan`] when the last joint is not at
    /// `x = span`, and [`SolveError::DegenerateMember`] when a member
    /// direction makes the elimination divide by zero (for example an
    /// exactly horizontal chord segment). Degenerate configurations have no
    /// meaningful solution and are surfaced instead of propagating NaNs.
    pub fn solve(&mut self, profile: &ArchProfile, load: f64) -> Result<(), SolveError> {
        let span = profile.span();
        let anchor = self
            .joints
            .last()
            .expect("chain always holds the left support");
        if anchor.x != span {
            return Err(SolveError::UnanchoredSpan {
                expected: span,
                actual: anchor.x,
            });
        }

        let hub = profile.hub();
        // The left support carries half the vertical load, no horizontal load.
        let mut down = Vec2::new(0.0, 0.5 * GRAVITY * load);

        for index in 0..self.joints.len() - 1 {
            let position = self.joints[index].position(profile);
            let next = self.joints[index + 1].position(profile);
            let up_direction = next - position;
            let side_direction = position - hub;

            // Equilibrium projected onto the two member axes (Cramer's rule
            // written with the direction ratios): solve for the side member
            // magnitude first, then back-substitute for the chord member.
            let side = side_direction.scaled(
                down.magnitude() * (down.cos() * up_direction.tan() - down.sin())
                    / (side_direction.cos() * up_direction.tan() - side_direction.sin()),
            );
            let up = up_direction.scaled(
                (down.magnitude() * down.sin() - side.magnitude() * side.sin())
                    / up_direction.sin(),
            );
            if !side.is_finite() || !up.is_finite() {
                return Err(SolveError::DegenerateMember { joint: index });
            }

            let joint = &mut self.joints[index];
            joint.down = down;
            joint.up = up;
            joint.side = side;
            down = up; // below the next joint is above us
        }

        // The right support mirrors the last free member horizontally and
        // reacts vertically with twice the carried load.
        let mirrored = Vec2::new(-down.x, down.y);
        let anchor = self
            .joints
            .last_mut()
            .expect("chain always holds the left support");
        anchor.down = mirrored;
        anchor.up = mirrored;
        anchor.side = Vec2::new(0.0, -2.0 * mirrored.y);
        Ok(())
    }

    /// Residual of the force balance at a joint, `down - (up + side)`.
    ///
    /// The `down` force carries load into the joint while `up` and `side`
    /// carry it out, so equilibrium means the residual is the zero vector.
    #[must_use]
    pub fn equilibrium_residual(&self, index: usize) -> Option<Vec2> {
        let joint = self.joints.get(index)?;
        Some(joint.down - (joint.up + joint.side))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn solved(positions: &[f64]) -> Chain {
        let profile = ArchProfile::new(1.0, 1000.0);
        let mut chain = Chain::new(positions);
        chain
            .solve(&profile, 1.0)
            .expect("valid chain solves cleanly");
        chain
    }

    #[test]
    fn construction_prepends_the_left_support() {
        let chain = Chain::new(&[250.0, 750.0, 1000.0]);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.joints()[0].x(), 0.0);
        assert_eq!(chain.joints()[0].kind(), JointKind::Support);
        assert_eq!(chain.joints()[1].kind(), JointKind::Interior);
        assert_eq!(chain.joints()[3].kind(), JointKind::Support);
        assert_eq!(chain.saved_positions(), vec![250.0, 750.0, 1000.0]);
    }

    #[test]
    fn trivial_two_support_bridge_mirrors_the_reaction() {
        let chain = solved(&[1000.0]);
        let left = chain.joints()[0];
        let right = chain.joints()[1];

        assert_relative_eq!(right.down().x, -left.up().x);
        assert_relative_eq!(right.down().y, left.up().y);
        assert_eq!(right.down(), right.up());
        assert_relative_eq!(right.side().x, 0.0);
        assert_relative_eq!(right.side().y, -2.0 * right.down().y);

        // Half the total vertical load lands on the left support.
        assert_relative_eq!(left.down().x, 0.0);
        assert_relative_eq!(left.down().y, 4.9);
    }

    #[test]
    fn every_joint_balances_after_a_solve() {
        let chain = solved(&[100.0, 400.0, 650.0, 900.0, 1000.0]);
        for index in 0..chain.len() - 1 {
            let residual = chain
                .equilibrium_residual(index)
                .expect("joint exists")
                .magnitude();
            let scale = chain.joints()[index].down().magnitude();
            assert!(
                residual <= 1.0e-6 * scale,
                "joint {index} out of balance: residual {residual}"
            );
        }
    }

    #[test]
    fn solving_twice_is_bit_identical() {
        let profile = ArchProfile::new(1.0, 1000.0);
        let mut chain = Chain::new(&[100.0, 500.0, 900.0, 1000.0]);
        chain.solve(&profile, 1.0).expect("first solve succeeds");
        let first: Vec<_> = chain
            .joints()
            .iter()
            .map(|joint| (joint.down(), joint.up(), joint.side()))
            .collect();
        chain.solve(&profile, 1.0).expect("second solve succeeds");
        let second: Vec<_> = chain
            .joints()
            .iter()
            .map(|joint| (joint.down(), joint.up(), joint.side()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unanchored_chain_is_rejected() {
        let profile = ArchProfile::new(1.0, 1000.0);
        let mut chain = Chain::new(&[500.0, 900.0]);
        let error = chain
            .solve(&profile, 1.0)
            .expect_err("unanchored chain rejected");
        assert_eq!(
            error,
            SolveError::UnanchoredSpan {
                expected: 1000.0,
                actual: 900.0,
            }
        );
    }

    #[test]
    fn horizontal_member_is_degenerate() {
        // x = 2000 mirrors the parabola back to height zero, making the first
        // chord segment exactly horizontal.
        let profile = ArchProfile::new(1.0, 1000.0);
        let mut chain = Chain::new(&[2000.0, 1000.0]);
        let error = chain
            .solve(&profile, 1.0)
            .expect_err("degenerate member rejected");
        assert_eq!(error, SolveError::DegenerateMember { joint: 0 });
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut chain = Chain::new(&[1000.0]);
        assert!(chain.insert(500.0, 1000.0));
        let positions: Vec<f64> = chain.joints().iter().map(Joint::x).collect();
        assert_eq!(positions, vec![0.0, 500.0, 1000.0]);

        let profile = ArchProfile::new(1.0, 1000.0);
        chain
            .solve(&profile, 1.0)
            .expect("solve succeeds after insert");
    }

    #[test]
    fn insert_refuses_collisions_and_out_of_span_positions() {
        let mut chain = Chain::new(&[500.0, 1000.0]);
        assert!(!chain.insert(500.0, 1000.0));
        assert!(!chain.insert(0.0, 1000.0));
        assert!(!chain.insert(-25.0, 1000.0));
        assert!(!chain.insert(1000.0, 1000.0));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn supports_cannot_be_selected() {
        let mut chain = Chain::new(&[500.0, 1000.0]);
        chain.toggle_selection(0);
        chain.toggle_selection(2);
        assert_eq!(chain.selected_count(), 0);
        chain.toggle_selection(1);
        assert_eq!(chain.selected_count(), 1);
        chain.toggle_selection(1);
        assert_eq!(chain.selected_count(), 0);
    }

    #[test]
    fn remove_selected_only_removes_interior_joints() {
        let mut chain = Chain::new(&[250.0, 500.0, 750.0, 1000.0]);
        chain.select(1);
        chain.select(3);
        assert_eq!(chain.remove_selected(), 2);
        let positions: Vec<f64> = chain.joints().iter().map(Joint::x).collect();
        assert_eq!(positions, vec![0.0, 500.0, 1000.0]);
    }

    #[test]
    fn drag_clamps_against_the_right_neighbour() {
        let mut chain = Chain::new(&[400.0, 600.0, 1000.0]);
        chain.select(1);
        assert!(chain.drag_selected(300.0));
        // 400 + 300 would cross the joint at 600; the clamp reserves one unit.
        assert_relative_eq!(chain.joints()[1].x(), 599.0);
    }

    #[test]
    fn drag_clamps_against_the_left_neighbour() {
        let mut chain = Chain::new(&[400.0, 600.0, 1000.0]);
        chain.select(2);
        assert!(chain.drag_selected(-300.0));
        assert_relative_eq!(chain.joints()[2].x(), 401.0);
    }

    #[test]
    fn dragging_a_block_keeps_it_together() {
        let mut chain = Chain::new(&[400.0, 401.0, 1000.0]);
        chain.select(1);
        chain.select(2);
        assert!(chain.drag_selected(50.0));
        // Both joints travel together instead of piling onto each other.
        assert_relative_eq!(chain.joints()[1].x(), 450.0);
        assert_relative_eq!(chain.joints()[2].x(), 451.0);
    }

    #[test]
    fn dragged_block_stacks_behind_an_obstacle() {
        let mut chain = Chain::new(&[300.0, 400.0, 600.0, 1000.0]);
        chain.select(1);
        chain.select(2);
        assert!(chain.drag_selected(500.0));
        assert_relative_eq!(chain.joints()[2].x(), 599.0);
        assert_relative_eq!(chain.joints()[1].x(), 598.0);
        // The unselected obstacle never moves.
        assert_relative_eq!(chain.joints()[3].x(), 600.0);
    }

    #[test]
    fn nudge_refuses_collisions() {
        let mut chain = Chain::new(&[400.0, 401.0, 1000.0]);
        chain.select(1);
        assert!(!chain.nudge_selected(1.0));
        assert_relative_eq!(chain.joints()[1].x(), 400.0);
        assert!(chain.nudge_selected(-1.0));
        assert_relative_eq!(chain.joints()[1].x(), 399.0);
    }

    #[test]
    fn ordering_survives_an_editing_burst() {
        let profile = ArchProfile::new(1.0, 1000.0);
        let mut chain = Chain::new(&[300.0, 600.0, 1000.0]);
        chain.insert(450.0, 1000.0);
        chain.select(1);
        chain.drag_selected(500.0);
        chain.nudge_selected(1.0);
        chain.clear_selection();
        chain.select(3);
        chain.drag_selected(-900.0);
        chain.remove_selected();
        chain.insert(120.0, 1000.0);

        let positions: Vec<f64> = chain.joints().iter().map(Joint::x).collect();
        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1], "ordering violated: {positions:?}");
        }
        assert_eq!(positions.first(), Some(&0.0));
        assert_eq!(positions.last(), Some(&1000.0));
        chain
            .solve(&profile, 1.0)
            .expect("chain stays solvable after editing");
    }
}
