//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → SDK TracerProvider → OtlpFileExporter → JSON lines
//! ```
//!
//! Traces land in `<data_dir>/layout-picker-otlp.json`, one OTLP JSON
//! document per line. The file rotates at 10 MB and keeps 3 backups.
//!
//! The level comes from the `trace_level` plugin option and defaults to
//! `info`. Both the plugin and its worker install a subscriber; the worker
//! joins the plugin's traces through the trace context carried on each
//! worker message.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `tracer`: provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating trace file

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE};
