//! Event handling and state transition logic.
//!
//! This module turns user input, host events and worker responses into
//! [`PickerState`] operations, then drains the state's one-shot
//! notifications into [`Action`]s for the plugin runtime.
//!
//! # Event Types
//!
//! - **Engine**: `Init`, `Start`, `AppBarOffsetChanged`, `LayoutTapped`,
//!   `CategoryTapped`, `Show`, `Dismiss`, `CreatePage`
//! - **Drafts**: `OpenPage`, `DiscardPage`
//! - **Navigation**: `CursorNext`, `CursorPrev`, `NextCategory`,
//!   `PrevCategory`, `ScrollDown`, `ScrollUp`, `TapLayout`, `TapCategory`,
//!   `TogglePreview`, `Resize`
//! - **System**: `PermissionsResult`, `WorkerResponse`
//!
//! # Notifications
//!
//! After every event the one-shot queues are drained:
//!
//! - picker showing `false` becomes [`Action::CloseFocus`]
//! - picker showing `true` while still loading asks the worker for content,
//!   unless a request is already pending
//! - create page requested becomes a `CreatePage` worker message for the
//!   selected layout, or a blank page without a selection
//!
//! # Example
//!
//! ```
//! use layout_picker::app::{handle_event, Action, Event, PickerState};
//!
//! let mut state = PickerState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Dismiss)?;
//! assert_eq!(actions, vec![Action::CloseFocus]);
//! # Ok::<(), layout_picker::PickerError>(())
//! ```

use super::{Action, PickerState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host changes, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Requests the initial content load.
    Init,
    /// Seeds header visibility from the pane's orientation.
    Start { is_landscape: bool },
    /// Terminal height changed.
    Resize { rows: usize },
    /// Scrolls the layout list by one row.
    ScrollDown,
    ScrollUp,
    /// Raw app bar offset, bypassing the scroll position.
    AppBarOffsetChanged { offset: i32, threshold: i32 },
    /// Moves the layout cursor.
    CursorNext,
    CursorPrev,
    /// Moves the chip cursor.
    NextCategory,
    PrevCategory,
    /// Taps the layout under the cursor.
    TapLayout,
    /// Taps the chip under the cursor.
    TapCategory,
    LayoutTapped(String),
    CategoryTapped(String),
    Show,
    Dismiss,
    CreatePage,
    TogglePreview,

    /// Reopens an existing page draft instead of creating a new one.
    OpenPage { local_id: i64 },
    /// Removes a draft that was abandoned.
    DiscardPage { local_id: i64 },

    /// Reports whether the requested Zellij permissions were granted.
    PermissionsResult { granted: bool },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates the picker state, and returns actions to execute.
///
/// The returned `bool` tells the runtime whether to re-render.
pub fn handle_event(state: &mut PickerState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (should_render, mut actions) = match event {
        Event::Init | Event::PermissionsResult { granted: true } => {
            if state.request_content() {
                (true, vec![Action::PostToWorker(WorkerMessage::load_content())])
            } else {
                tracing::debug!("content loaded or already requested, skipping init");
                (false, vec![])
            }
        }
        Event::PermissionsResult { granted: false } => {
            tracing::warn!("permissions denied - picker cannot load content");
            state.last_error = Some("permissions denied".to_string());
            (true, vec![])
        }
        Event::Start { is_landscape } => (state.start(*is_landscape), vec![]),
        Event::Resize { rows } => {
            state.set_terminal_rows(*rows);
            (false, vec![])
        }
        Event::ScrollDown => (state.scroll(1), vec![]),
        Event::ScrollUp => (state.scroll(-1), vec![]),
        Event::AppBarOffsetChanged { offset, threshold } => {
            (state.on_app_bar_offset_changed(*offset, *threshold), vec![])
        }
        Event::CursorNext => (state.move_cursor(true), vec![]),
        Event::CursorPrev => (state.move_cursor(false), vec![]),
        Event::NextCategory => (state.move_category_cursor(true), vec![]),
        Event::PrevCategory => (state.move_category_cursor(false), vec![]),
        Event::TapLayout => {
            let Some(slug) = state.layout_under_cursor().map(|layout| layout.slug.clone()) else {
                return Ok((false, vec![]));
            };
            (state.on_layout_tapped(&slug), vec![])
        }
        Event::TapCategory => {
            let Some(slug) = state.category_under_cursor().map(|category| category.slug.clone()) else {
                return Ok((false, vec![]));
            };
            (state.on_category_tapped(&slug), vec![])
        }
        Event::LayoutTapped(slug) => (state.on_layout_tapped(slug), vec![]),
        Event::CategoryTapped(slug) => (state.on_category_tapped(slug), vec![]),
        Event::Show => {
            state.show();
            (true, vec![])
        }
        Event::Dismiss => {
            state.dismiss();
            (true, vec![])
        }
        Event::CreatePage => {
            state.create_page();
            (false, vec![])
        }
        Event::TogglePreview => (state.toggle_preview(), vec![]),
        Event::OpenPage { local_id } => {
            (false, vec![Action::PostToWorker(WorkerMessage::open_page(*local_id))])
        }
        Event::DiscardPage { local_id } => {
            (false, vec![Action::PostToWorker(WorkerMessage::discard_page(*local_id))])
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    };

    actions.extend(drain_notifications(state));
    Ok((should_render, actions))
}

fn handle_worker_response(state: &mut PickerState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Configured { selected_site } => {
            tracing::debug!(selected_site = ?selected_site, "worker configured");
            (false, vec![])
        }
        WorkerResponse::ContentLoaded { content } => {
            if state.content().is_some() {
                tracing::debug!("content already showing, keeping current selections");
                return (false, vec![]);
            }
            state.apply_content(content.clone());

            let actions = content
                .catalog
                .layout_categories
                .iter()
                .flat_map(|section| &section.layouts)
                .filter(|layout| !state.is_thumbnail_ready(&layout.slug))
                .map(|layout| Action::PostToWorker(WorkerMessage::load_thumbnail(layout.slug.clone())))
                .collect::<Vec<_>>();

            tracing::debug!(thumbnail_requests = actions.len(), "content applied");
            (true, actions)
        }
        WorkerResponse::ContentUnavailable { message } => {
            tracing::debug!(message = %message, "content unavailable, staying in loading state");
            state.content_unavailable(message.clone());
            (true, vec![])
        }
        WorkerResponse::ThumbnailLoaded { slug, preview } => {
            state.store_thumbnail(slug, preview.clone());
            (true, vec![])
        }
        WorkerResponse::ThumbnailMissing { slug } => {
            tracing::debug!(slug = %slug, "no thumbnail, layout stays unselectable");
            (false, vec![])
        }
        WorkerResponse::PageCreated { page } | WorkerResponse::PageOpened { page } => {
            tracing::info!(page_id = page.local_id, layout_slug = ?page.layout_slug, "page ready");
            state.dismiss();
            (true, vec![])
        }
        WorkerResponse::PageDiscarded { local_id } => {
            tracing::info!(page_id = local_id, "page discarded");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            (true, vec![])
        }
    }
}

/// Converts pending one-shot notifications into actions.
fn drain_notifications(state: &mut PickerState) -> Vec<Action> {
    let mut actions = Vec::new();

    for showing in state.take_picker_showing() {
        if !showing {
            actions.push(Action::CloseFocus);
        } else if state.request_content() {
            actions.push(Action::PostToWorker(WorkerMessage::load_content()));
        }
    }

    for _ in 0..state.take_create_page_requests() {
        let Some(site_id) = state.site.as_ref().map(|site| site.local_id) else {
            tracing::debug!("create page requested before a site was loaded");
            continue;
        };
        let layout = state.selected_layout();
        let layout_slug = layout.map(|layout| layout.slug.clone());
        let title = layout.map(|layout| layout.title.clone()).unwrap_or_default();

        tracing::debug!(site_id = site_id, layout_slug = ?layout_slug, "create page requested");
        actions.push(Action::PostToWorker(WorkerMessage::create_page(site_id, layout_slug, title)));
    }

    actions
}
