//! Tracer provider whose exporter appends OTLP JSON to a local file.
//!
//! The plugin sandbox has no network access, so spans go to disk and can be
//! replayed into a collector later.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpEncoder;
use futures_util::future::{self, BoxFuture};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one line of OTLP JSON.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    stopped: AtomicBool,
}

impl OtlpFileExporter {
    const fn new(file: RotatingFile, encoder: OtlpEncoder) -> Self {
        Self {
            file,
            encoder,
            stopped: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(TraceError::from("trace exporter stopped"));
        }

        let line = self.encoder.encode_batch(batch).to_string();
        self.file
            .append_line(&line)
            .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())))
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    // The resource is fixed when the encoder is built.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Builds a provider that exports every span synchronously to `file`.
///
/// `scope` names the instrumentation scope written into each batch.
pub fn file_tracer_provider(
    file: RotatingFile,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = OtlpFileExporter::new(file, OtlpEncoder::new(resource.clone(), scope));

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    fn exporter(dir: &std::path::Path) -> OtlpFileExporter {
        let resource = Resource::new(vec![KeyValue::new("service.name", "LayoutPicker")]);
        OtlpFileExporter::new(
            RotatingFile::new(dir.join("traces.json")),
            OtlpEncoder::new(resource, "LayoutPicker"),
        )
    }

    #[test]
    fn batch_is_written_as_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());

        exporter.write_batch(&[]).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("traces.json")).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"resourceSpans\""));
    }

    #[test]
    fn stopped_exporter_rejects_batches() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = exporter(dir.path());

        exporter.shutdown();

        assert!(exporter.write_batch(&[]).is_err());
        assert!(!dir.path().join("traces.json").exists());
    }
}
