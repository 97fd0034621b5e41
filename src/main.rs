//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the `layout_picker` library and Zellij. It owns
//! every host call (permissions, subscriptions, worker messaging, hiding the
//! pane) so the library stays testable outside the WASM runtime.
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌────────────────────┐  │
//! │  │  State (plugin)    │  │  ← PickerState, key mapping, render
//! │  └────────────────────┘  │
//! │            │ IPC         │
//! │            ▼             │
//! │  ┌────────────────────┐  │
//! │  │  Worker            │  │  ← storage, catalog, thumbnails
//! │  │  (worker thread)   │  │
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `PickerState`,
//!    request permissions
//! 2. **Granted**: send `Configure` to the worker, then load content
//! 3. **First render**: report the pane orientation with `Start`
//! 4. **Update**: map keys and host events to library events
//! 5. **Render**: call the library renderer
//!
//! # Keybindings
//!
//! - `j`/`Down`, `k`/`Up`: move through layouts
//! - `h`/`Left`, `l`/`Right`: move through category chips
//! - `Space`/`Enter`: select or deselect the layout under the cursor
//! - `Tab`: toggle the chip under the cursor
//! - `c`: create a page (blank when nothing is selected)
//! - `p`: toggle the preview of the selected layout
//! - `Ctrl+d`/`Ctrl+u`, mouse wheel: scroll the list
//! - `r`: retry loading
//! - `Esc`/`q`: close the picker

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use layout_picker::worker::{PickerWorker, WorkerMessage, WorkerResponse};
use layout_picker::{handle_event, Action, Config, Event, PickerState};

register_plugin!(State);
register_worker!(Worker, layout_picker_worker, LAYOUT_PICKER_WORKER);

/// Worker thread entry point.
///
/// Decoding and handling live in the library; this only moves payloads
/// between Zellij and [`PickerWorker`]. The backends are reopened from the
/// `Configure` message, so nothing is serialized.
#[derive(Default, Serialize, Deserialize)]
struct Worker {
    #[serde(skip)]
    inner: PickerWorker,
}

impl ZellijWorker<'_> for Worker {
    fn on_message(&mut self, message: String, payload: String) {
        let Some(response) = self.inner.handle_payload(&payload) else {
            return;
        };

        post_message_to_plugin(PluginMessage {
            name: message,
            payload: response,
            worker_name: None,
        });
    }
}

struct State {
    app: PickerState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    config: Config,

    /// Whether `Start` has been sent. It goes out on the first render, once
    /// the pane size is known.
    started: bool,

    last_rows: usize,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: layout_picker::initialize(&config),
            worker_name: "layout_picker".to_string(),
            config,
            started: false,
            last_rows: 0,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        layout_picker::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            site_name = ?config.site_name,
            catalog_file = ?config.catalog_file,
            header_threshold = config.header_threshold,
            "parsed configuration"
        );
        self.app = layout_picker::initialize(&config);
        self.config = config;

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Visible,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match mouse {
                Mouse::ScrollDown(_) => Event::ScrollDown,
                Mouse::ScrollUp(_) => Event::ScrollUp,
                _ => return false,
            },
            zellij_tile::prelude::Event::Visible(true) => Event::Show,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                let granted = matches!(permissions, PermissionStatus::Granted);
                if granted {
                    self.post_worker_message(&WorkerMessage::configure(self.config.clone()));
                }
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if rows != self.last_rows {
            self.last_rows = rows;
            self.dispatch(&Event::Resize { rows });
        }
        if !self.started {
            self.started = true;
            let is_landscape = self.config.is_landscape(rows, cols);
            self.dispatch(&Event::Start { is_landscape });
        }

        layout_picker::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs an event through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('d') => Some(Event::ScrollDown),
                BareKey::Char('u') => Some(Event::ScrollUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorNext,
            BareKey::Up | BareKey::Char('k') => Event::CursorPrev,
            BareKey::Right | BareKey::Char('l') => Event::NextCategory,
            BareKey::Left | BareKey::Char('h') => Event::PrevCategory,
            BareKey::Enter | BareKey::Char(' ') => Event::TapLayout,
            BareKey::Tab => Event::TapCategory,
            BareKey::Char('c') => Event::CreatePage,
            BareKey::Char('p') => Event::TogglePreview,
            BareKey::Char('r') => Event::Init,
            BareKey::Esc | BareKey::Char('q') => Event::Dismiss,
            _ => return None,
        })
    }

    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing picker");
                hide_self();
            }
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}
