//! Background worker for storage and catalog operations.
//!
//! The worker handles all file I/O (the JSON store, the catalog file and
//! thumbnail files) so the plugin thread only renders and reacts to input.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{PickerWorker, STORAGE_FILE};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
