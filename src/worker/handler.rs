//! Worker thread implementation for storage and catalog operations.
//!
//! The worker owns the JSON store and the catalog source, so file I/O never
//! blocks the plugin's render loop. Backends are opened lazily from the
//! configuration received in [`WorkerMessage::Configure`].

use crate::domain::error::{PickerError, Result};
use crate::domain::Site;
use crate::storage::{
    BuiltinCatalog, CatalogFile, CatalogSource, ContentLoader, JsonStorage, PageStore,
    PreferenceStore, SiteStore,
};
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;
use serde::{Deserialize, Serialize};

/// Name of the storage file inside the data directory.
pub const STORAGE_FILE: &str = "layout-picker.json";

/// Local id given to a site registered from configuration when none is
/// selected yet.
const DEFAULT_SITE_ID: i32 = 1;

/// Worker thread state.
///
/// Runs on a thread spawned by Zellij and processes messages from the plugin.
/// The Zellij entry point lives in the plugin binary and forwards payloads
/// to [`PickerWorker::handle_payload`].
///
/// Nothing is serialized: the backends are reopened from `Configure`.
#[derive(Default, Serialize, Deserialize)]
pub struct PickerWorker {
    #[serde(skip)]
    config: Config,

    /// Site, preference and page store. Opened on first use.
    #[serde(skip)]
    storage: Option<JsonStorage>,

    /// Catalog file, or the builtin catalog when none is configured.
    #[serde(skip)]
    catalog: Option<Box<dyn CatalogSource>>,
}

impl PickerWorker {
    /// Creates a worker over explicit backends.
    #[must_use]
    pub fn with_backends(config: Config, storage: JsonStorage, catalog: Box<dyn CatalogSource>) -> Self {
        Self {
            config,
            storage: Some(storage),
            catalog: Some(catalog),
        }
    }

    /// Opens the backends described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file exists but cannot be read or
    /// parsed, or the data directory cannot be created.
    fn open(config: &Config) -> Result<(JsonStorage, Box<dyn CatalogSource>)> {
        let storage = JsonStorage::new(config.data_dir().join(STORAGE_FILE))?;
        let catalog: Box<dyn CatalogSource> = match config.catalog_path() {
            Some(path) => {
                tracing::debug!(path = ?path, "using catalog file");
                Box::new(CatalogFile::new(path))
            }
            None => {
                tracing::debug!("using builtin catalog");
                Box::new(BuiltinCatalog)
            }
        };
        Ok((storage, catalog))
    }

    /// Returns both backends, opening them on first use.
    fn backends(&mut self) -> Result<(&mut JsonStorage, &dyn CatalogSource)> {
        if self.storage.is_none() || self.catalog.is_none() {
            let (storage, catalog) = Self::open(&self.config)?;
            self.storage = Some(storage);
            self.catalog = Some(catalog);
        }

        match (self.storage.as_mut(), self.catalog.as_deref()) {
            (Some(storage), Some(catalog)) => Ok((storage, catalog)),
            _ => Err(PickerError::Worker("storage not initialized".to_string())),
        }
    }

    /// Helper for handling storage operation results with consistent logging.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Applies a new configuration, reopening the backends.
    ///
    /// When `site_name` is configured, the site is stored under the currently
    /// selected id (or [`DEFAULT_SITE_ID`]) and selected.
    fn handle_configure(&mut self, config: Config) -> WorkerResponse {
        self.config = config;
        self.storage = None;
        self.catalog = None;

        let site = self
            .config
            .site_name
            .clone()
            .map(|name| (name, self.config.site_url.clone().unwrap_or_default()));

        let result = self.backends().and_then(|(storage, _)| {
            if let Some((name, url)) = site {
                let site_id = storage.selected_site_id()?.unwrap_or(DEFAULT_SITE_ID);
                storage.upsert_site(&Site::new(site_id, name, url))?;
                storage.set_selected_site_id(site_id)?;
                tracing::debug!(site_id = site_id, "registered configured site");
            }
            storage.selected_site_id()
        });

        Self::handle_db_result("configure", result, |selected_site| {
            WorkerResponse::Configured { selected_site }
        })
    }

    fn handle_load_content(&mut self) -> WorkerResponse {
        let result = self.backends().and_then(|(storage, catalog)| {
            let storage: &JsonStorage = storage;
            ContentLoader::new(storage, storage, catalog).load()
        });

        match result {
            Ok(content) => WorkerResponse::ContentLoaded { content },
            Err(e) => {
                tracing::debug!(error = %e, "content unavailable");
                WorkerResponse::ContentUnavailable {
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_load_thumbnail(&mut self, slug: String) -> WorkerResponse {
        let result = self
            .backends()
            .and_then(|(_, catalog)| catalog.thumbnail(&slug));

        match result {
            Ok(Some(preview)) => WorkerResponse::ThumbnailLoaded { slug, preview },
            Ok(None) => WorkerResponse::ThumbnailMissing { slug },
            Err(e) => {
                tracing::debug!(slug = %slug, error = %e, "thumbnail failed to load");
                WorkerResponse::ThumbnailMissing { slug }
            }
        }
    }

    fn handle_create_page(&mut self, site_id: i32, layout_slug: Option<String>, title: &str) -> WorkerResponse {
        Self::handle_db_result(
            "create page",
            self.backends().and_then(|(storage, _)| {
                storage.save_initial_page(site_id, layout_slug.as_deref(), title)
            }),
            |page| {
                tracing::debug!(page_id = page.local_id, blank = page.is_blank(), "page created");
                WorkerResponse::PageCreated { page }
            },
        )
    }

    fn handle_open_page(&mut self, local_id: i64) -> WorkerResponse {
        let result = self.backends().and_then(|(storage, _)| {
            storage
                .page_by_local_id(local_id)?
                .ok_or_else(|| PickerError::Storage(format!("page not found: {local_id}")))
        });

        Self::handle_db_result("open page", result, |page| WorkerResponse::PageOpened { page })
    }

    fn handle_discard_page(&mut self, local_id: i64) -> WorkerResponse {
        Self::handle_db_result(
            "discard page",
            self.backends().and_then(|(storage, _)| storage.discard_page(local_id)),
            |removed| {
                tracing::debug!(page_id = local_id, removed = removed, "page discarded");
                WorkerResponse::PageDiscarded { local_id }
            },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::Configure { config, .. } => self.handle_configure(config),
            WorkerMessage::LoadContent { .. } => self.handle_load_content(),
            WorkerMessage::LoadThumbnail { slug, .. } => self.handle_load_thumbnail(slug),
            WorkerMessage::CreatePage {
                site_id,
                layout_slug,
                title,
                ..
            } => self.handle_create_page(site_id, layout_slug, &title),
            WorkerMessage::OpenPage { local_id, .. } => self.handle_open_page(local_id),
            WorkerMessage::DiscardPage { local_id, .. } => self.handle_discard_page(local_id),
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

fn init_worker_tracing(config: &Config) {
    if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
        crate::observability::init_tracing(config);
    }
}

impl PickerWorker {
    /// Decodes a JSON [`WorkerMessage`], handles it and returns the JSON
    /// [`WorkerResponse`] to post back to the plugin.
    ///
    /// Returns `None` when the payload cannot be decoded or the response
    /// cannot be encoded; both are logged.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let worker_message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(msg) => msg,
            Err(e) => {
                init_worker_tracing(&self.config);
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        match &worker_message {
            WorkerMessage::Configure { config, .. } => init_worker_tracing(config),
            _ => init_worker_tracing(&self.config),
        }

        let response = self.handle_message(worker_message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::debug!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir, site_name: Option<&str>) -> Config {
        Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            site_name: site_name.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn configure_registers_and_selects_site() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();

        let response = worker.handle_message(WorkerMessage::configure(config(&dir, Some("Travel notes"))));
        assert_eq!(response, WorkerResponse::Configured { selected_site: Some(DEFAULT_SITE_ID) });
        assert!(dir.path().join(STORAGE_FILE).exists());
    }

    #[test]
    fn load_without_site_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();
        worker.handle_message(WorkerMessage::configure(config(&dir, None)));

        let response = worker.handle_message(WorkerMessage::load_content());
        assert!(matches!(response, WorkerResponse::ContentUnavailable { .. }));
    }

    #[test]
    fn loads_content_thumbnails_and_creates_pages() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();
        worker.handle_message(WorkerMessage::configure(config(&dir, Some("Travel notes"))));

        let WorkerResponse::ContentLoaded { content } = worker.handle_message(WorkerMessage::load_content()) else {
            panic!("expected content");
        };
        assert_eq!(content.site.name, "Travel notes");

        let slug = content.catalog.layout_categories[0].layouts[0].slug.clone();
        assert!(matches!(
            worker.handle_message(WorkerMessage::load_thumbnail(slug.clone())),
            WorkerResponse::ThumbnailLoaded { .. }
        ));
        assert_eq!(
            worker.handle_message(WorkerMessage::load_thumbnail("nope".to_string())),
            WorkerResponse::ThumbnailMissing { slug: "nope".to_string() }
        );

        let WorkerResponse::PageCreated { page } =
            worker.handle_message(WorkerMessage::create_page(content.site.local_id, Some(slug.clone()), "About".to_string()))
        else {
            panic!("expected page");
        };
        assert_eq!(page.layout_slug, Some(slug));
    }

    #[test]
    fn payloads_round_trip_as_json() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();
        let payload = serde_json::to_string(&WorkerMessage::configure(config(&dir, None))).unwrap();

        let response: WorkerResponse = serde_json::from_str(&worker.handle_payload(&payload).unwrap()).unwrap();
        assert_eq!(response, WorkerResponse::Configured { selected_site: None });
        assert_eq!(worker.handle_payload("not json"), None);
    }

    #[test]
    fn worker_state_is_not_serialized() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();
        worker.handle_message(WorkerMessage::configure(config(&dir, Some("Travel notes"))));

        assert_eq!(serde_json::to_string(&worker).unwrap(), "{}");
        let restored: PickerWorker = serde_json::from_str("{}").unwrap();
        assert!(restored.storage.is_none());
        assert_eq!(restored.config, Config::default());
    }

    #[test]
    fn pages_can_be_reopened_and_discarded() {
        let dir = TempDir::new().unwrap();
        let mut worker = PickerWorker::default();
        worker.handle_message(WorkerMessage::configure(config(&dir, Some("Travel notes"))));

        let WorkerResponse::PageCreated { page } =
            worker.handle_message(WorkerMessage::create_page(DEFAULT_SITE_ID, None, String::new()))
        else {
            panic!("expected page");
        };

        assert_eq!(
            worker.handle_message(WorkerMessage::open_page(page.local_id)),
            WorkerResponse::PageOpened { page: page.clone() }
        );
        assert_eq!(
            worker.handle_message(WorkerMessage::discard_page(page.local_id)),
            WorkerResponse::PageDiscarded { local_id: page.local_id }
        );
        assert!(matches!(
            worker.handle_message(WorkerMessage::open_page(page.local_id)),
            WorkerResponse::Error { .. }
        ));
    }

    #[test]
    fn page_for_unknown_site_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path().join(STORAGE_FILE)).unwrap();
        let mut worker = PickerWorker::with_backends(Config::default(), storage, Box::new(BuiltinCatalog));

        let response = worker.handle_message(WorkerMessage::create_page(9, None, "Untitled".to_string()));
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }
}
