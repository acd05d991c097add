#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod chain;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod layout;
pub mod report;
pub mod session;
pub mod stress;
pub mod viewport;

pub use chain::{Chain, Joint, JointKind};
pub use editor::{apply_events, Button, EditorState, InputEvent, Key, TickOutcome};
pub use errors::{LayoutError, SolveError};
pub use geometry::{vec2, ArchProfile, Vec2};
pub use layout::{load_or_default, parse, save, Layout};
pub use report::{render_summary, summarize, BridgeSummary, MemberReport};
pub use session::{Session, DEFAULT_LOAD};
pub use stress::{classify, MemberKind, StressReport};
pub use viewport::Viewport;
