//! Ties the chain, editor and solver together into a tick-driven session.

use log::debug;

use crate::chain::Chain;
use crate::editor::{self, EditorState, InputEvent};
use crate::errors::SolveError;
use crate::geometry::ArchProfile;
use crate::report::{summarize, BridgeSummary};
use crate::viewport::Viewport;

/// Load mass applied uniformly at every joint, in kilograms.
pub const DEFAULT_LOAD: f64 = 1.0;

/// A live editing session over one bridge.
///
/// Single-threaded and synchronous: each [`tick`](Session::tick) drains the
/// events the caller collected, applies them in order, and re-solves the
/// chain when its structure changed. Frame pacing belongs to the caller.
#[derive(Debug)]
pub struct Session {
    /// Deck curve parameters.
    profile: ArchProfile,
    /// The joint chain being edited.
    chain: Chain,
    /// Pixel mapping used to interpret pointer events.
    viewport: Viewport,
    /// Transient input state.
    editor: EditorState,
    /// Per-joint load mass.
    load: f64,
    /// False once a quit has been requested.
    running: bool,
}

impl Session {
    /// Start a session, solving the chain once so forces are available
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] when the initial chain cannot be solved.
    pub fn new(profile: ArchProfile, mut chain: Chain, load: f64) -> Result<Self, SolveError> {
        chain.solve(&profile, load)?;
        let viewport = Viewport::with_default_canvas(&profile);
        Ok(Self {
            profile,
            chain,
            viewport,
            editor: EditorState::new(),
            load,
            running: true,
        })
    }

    /// The session's deck profile.
    #[must_use]
    pub fn profile(&self) -> &ArchProfile {
        &self.profile
    }

    /// The chain in its current state.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The viewport pointer events are interpreted against.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether the session is still accepting ticks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one tick's worth of drained input events.
    ///
    /// Returns whether the session is still running. Events arriving after a
    /// quit request are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] when an edit leaves the chain unsolvable; the
    /// edit itself is kept so the caller can inspect the offending layout.
    pub fn tick(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> Result<bool, SolveError> {
        if !self.running {
            return Ok(false);
        }
        let outcome = editor::apply_events(
            &mut self.editor,
            &mut self.chain,
            &self.profile,
            &self.viewport,
            events,
        );
        if outcome.quit {
            debug!("session closing");
            self.running = false;
            return Ok(false);
        }
        if outcome.mutated {
            self.chain.solve(&self.profile, self.load)?;
        }
        Ok(true)
    }

    /// Current per-member force and stress summary.
    #[must_use]
    pub fn summary(&self) -> BridgeSummary {
        summarize(&self.chain, &self.profile)
    }
}
