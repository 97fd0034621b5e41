//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main
//! plugin thread and the background worker that owns storage and the catalog
//! source. It also carries the tracing context across the thread boundary.

use crate::domain::PageDraft;
use crate::storage::LoadedContent;
use crate::Config;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so spans
/// opened by the worker are linked to the plugin span that sent the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is the
    /// case when tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("span context is not valid");
            return None;
        }

        let trace_id = format!("{:032x}", span_context.trace_id());
        let parent_span_id = format!("{:016x}", span_context.span_id());

        tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

        Some(Self {
            trace_id,
            parent_span_id,
        })
    }
}

/// Generates builder methods for `WorkerMessage` variants.
///
/// Each builder attaches the current trace context to the message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    configure(Configure { config: Config }),
    load_content(LoadContent {}),
    load_thumbnail(LoadThumbnail { slug: String }),
    create_page(CreatePage { site_id: i32, layout_slug: Option<String>, title: String }),
    open_page(OpenPage { local_id: i64 }),
    discard_page(DiscardPage { local_id: i64 }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Hands the plugin configuration to the worker.
    ///
    /// Sent once, before any other message. Selects the storage directory,
    /// the catalog source and, when configured, registers the site.
    Configure {
        config: Config,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load the selected site and the catalog.
    LoadContent {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Resolve the thumbnail of one layout.
    LoadThumbnail {
        slug: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Save a new page draft, blank when `layout_slug` is `None`.
    CreatePage {
        site_id: i32,
        layout_slug: Option<String>,
        title: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load an existing page draft instead of creating one.
    OpenPage {
        local_id: i64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove a draft that was abandoned before any editing.
    DiscardPage {
        local_id: i64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Configure { trace_context, .. }
            | Self::LoadContent { trace_context }
            | Self::LoadThumbnail { trace_context, .. }
            | Self::CreatePage { trace_context, .. }
            | Self::OpenPage { trace_context, .. }
            | Self::DiscardPage { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Configuration applied. Carries the selected site, if any.
    Configured { selected_site: Option<i32> },

    /// Site and catalog loaded.
    ContentLoaded { content: LoadedContent },

    /// Site or catalog unavailable. The picker keeps loading.
    ContentUnavailable { message: String },

    /// Thumbnail text for a layout.
    ThumbnailLoaded { slug: String, preview: String },

    /// The layout has no thumbnail, or it could not be read.
    ThumbnailMissing { slug: String },

    /// A page draft was saved.
    PageCreated { page: PageDraft },

    /// An existing page draft was loaded.
    PageOpened { page: PageDraft },

    /// The draft is gone, whether or not it still existed.
    PageDiscarded { local_id: i64 },

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
