//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to
//! the trace file.

use super::file_writer::RotatingFile;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name recorded on every span.
pub const SERVICE_NAME: &str = "LayoutPicker";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "layout-picker-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Spans are filtered by `trace_level` (default `info`) and written to
/// `<data_dir>/layout-picker-otlp.json`. Tracing is optional: if the data
/// directory cannot be created, or a subscriber is already installed, this
/// does nothing.
///
/// ```
/// use layout_picker::observability::init_tracing;
/// use layout_picker::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: Some(dir.path().display().to_string()),
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LEVEL);

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let file = RotatingFile::new(data_dir.join(TRACE_FILE));
    let provider = tracer::file_tracer_provider(file, resource, SERVICE_NAME);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
