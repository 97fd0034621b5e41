//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order, keeping the handler free of Zellij
//! calls and therefore testable.

use crate::worker::WorkerMessage;

/// Commands the plugin runtime executes on behalf of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the picker pane.
    ///
    /// Produced when a "picker showing" notification carrying `false` is
    /// drained, i.e. after a dismiss.
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
