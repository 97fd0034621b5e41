//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, storage and
//! worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → PickerState → Notifications → Actions
//!                           ↑                                           ↓
//!                           └──────────── Worker Responses ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and notification draining
//! - [`navigation`]: Keyboard cursor and scroll position
//! - [`signals`]: Snapshot publication and one-shot notification queues
//! - [`state`]: The selection and visibility state engine
//! - `view`: View model computation for the renderer

pub mod actions;
pub mod handler;
pub mod navigation;
pub mod signals;
pub mod state;
mod view;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use navigation::Navigation;
pub use signals::{LiveState, OneShot, Subscription};
pub use state::{ButtonsUiState, ContentUiState, ListRow, PickerState, UiState};
