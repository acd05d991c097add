//! Discrete-command editing of the joint chain.
//!
//! Input arrives as a drained queue of [`InputEvent`] values per tick; the
//! editor is agnostic to whatever windowing or input technology produced
//! them. Hold-to-repeat behaviour is driven by per-key tick counters rather
//! than timers, so a tick is the only unit of time the editor knows about.

use std::collections::HashMap;

use log::debug;

use crate::chain::Chain;
use crate::geometry::ArchProfile;
use crate::viewport::{Viewport, PICK_TOLERANCE};

/// Number of ticks a directional key must be held before it auto-repeats.
const HOLD_REPEAT_TICKS: u32 = 30;

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Quit the session.
    Escape,
    /// Insert a joint at the pointer's horizontal position.
    Insert,
    /// Delete every selected joint.
    Delete,
    /// Nudge selected joints one unit left.
    Left,
    /// Nudge selected joints one unit right.
    Right,
}

/// Pointer buttons the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Toggle selection of the joint under the pointer.
    Left,
    /// Drag selected joints horizontally while held.
    Middle,
    /// Exclusively select the joint under the pointer.
    Right,
}

/// One discrete input command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The window or host asked the session to close.
    Quit,
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// A pointer button was pressed.
    ButtonDown(Button),
    /// A pointer button was released.
    ButtonUp(Button),
    /// The pointer moved to an absolute pixel position.
    PointerMoved {
        /// Pixel x coordinate.
        x: i32,
        /// Pixel y coordinate.
        y: i32,
    },
}

/// What a tick's worth of events did to the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The session was asked to close.
    pub quit: bool,
    /// The chain's structure changed and must be re-solved.
    pub mutated: bool,
}

/// Transient input state carried between ticks.
///
/// Press counters start at 1 on the press event and grow by one per tick
/// while held, which drives the nudge debounce.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    /// Ticks each key has been held, keyed by key.
    keys: HashMap<Key, u32>,
    /// Ticks each pointer button has been held, keyed by button.
    buttons: HashMap<Button, u32>,
    /// Last known pointer position in pixels.
    pointer: Option<(i32, i32)>,
    /// Horizontal pointer travel accumulated during the current tick.
    pointer_dx: i32,
}

impl EditorState {
    /// Create an idle editor state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks the given key has been held, zero when released.
    #[must_use]
    pub fn held_ticks(&self, key: Key) -> u32 {
        self.keys.get(&key).copied().unwrap_or(0)
    }

    /// Whether a pointer button is currently held.
    #[must_use]
    pub fn is_button_held(&self, button: Button) -> bool {
        self.buttons.get(&button).copied().unwrap_or(0) > 0
    }

    /// Age all held counters by one tick and reset per-tick accumulators.
    fn begin_tick(&mut self) {
        for count in self.keys.values_mut() {
            *count += 1;
        }
        for count in self.buttons.values_mut() {
            *count += 1;
        }
        self.pointer_dx = 0;
    }
}

/// Apply one tick's drained input events to the chain.
///
/// Events are applied in arrival order; continuous actions (drag, nudge) run
/// once after the queue from the hold counters. A quit request stops
/// processing immediately, leaving the chain as it was. The caller is
/// responsible for re-solving the chain when the outcome reports a mutation.
pub fn apply_events(
    state: &mut EditorState,
    chain: &mut Chain,
    profile: &ArchProfile,
    viewport: &Viewport,
    events: impl IntoIterator<Item = InputEvent>,
) -> TickOutcome {
    state.begin_tick();
    let mut outcome = TickOutcome::default();

    for event in events {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                debug!("quit requested");
                outcome.quit = true;
                return outcome;
            }
            InputEvent::KeyDown(key) => {
                state.keys.insert(key, 1);
                match key {
                    Key::Delete => {
                        outcome.mutated |= chain.remove_selected() > 0;
                    }
                    Key::Insert => {
                        if let Some((pointer_x, _)) = state.pointer {
                            let x = viewport.x_to_model(pointer_x);
                            outcome.mutated |= chain.insert(x, profile.span());
                        }
                    }
                    Key::Escape | Key::Left | Key::Right => {}
                }
            }
            InputEvent::KeyUp(key) => {
                state.keys.remove(&key);
            }
            InputEvent::ButtonDown(button) => {
                state.buttons.insert(button, 1);
                if button == Button::Right {
                    chain.clear_selection();
                }
                if let Some(pointer) = state.pointer {
                    if let Some(index) = pick_joint(chain, profile, viewport, pointer) {
                        match button {
                            Button::Left => chain.toggle_selection(index),
                            Button::Right => chain.select(index),
                            Button::Middle => {}
                        }
                    }
                }
            }
            InputEvent::ButtonUp(button) => {
                state.buttons.remove(&button);
            }
            InputEvent::PointerMoved { x, y } => {
                if let Some((last_x, _)) = state.pointer {
                    state.pointer_dx += x - last_x;
                }
                state.pointer = Some((x, y));
            }
        }
    }

    if state.is_button_held(Button::Middle) && state.pointer_dx != 0 {
        let dx = viewport.scale_dx(state.pointer_dx);
        outcome.mutated |= chain.drag_selected(dx);
    }

    let left = state.held_ticks(Key::Left);
    let right = state.held_ticks(Key::Right);
    if (left > 0) != (right > 0) {
        let held = left.max(right);
        // Fire once on the press tick, then repeat after the hold threshold.
        if held == 1 || held > HOLD_REPEAT_TICKS {
            let step = if right > 0 { 1.0 } else { -1.0 };
            outcome.mutated |= chain.nudge_selected(step);
        }
    }

    outcome
}

/// Find the interior joint nearest the pointer within the pick tolerance.
fn pick_joint(
    chain: &Chain,
    profile: &ArchProfile,
    viewport: &Viewport,
    pointer: (i32, i32),
) -> Option<usize> {
    chain
        .interior()
        .map(|(index, joint)| {
            (
                index,
                viewport.screen_distance(joint.position(profile), pointer),
            )
        })
        .filter(|(_, distance)| *distance < PICK_TOLERANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
