//! Picker behaviour through the public API: the state engine driven
//! directly, and the full plugin loop with the worker in-process.

use layout_picker::domain::{PageDraft, Site};
use layout_picker::storage::{
    BuiltinCatalog, CatalogSource, ContentLoader, JsonStorage, PageStore, PreferenceStore, SiteStore,
};
use layout_picker::worker::{PickerWorker, WorkerMessage, WorkerResponse, STORAGE_FILE};
use layout_picker::{handle_event, Action, ButtonsUiState, Config, Event, PickerState, UiState};
use std::collections::HashMap;

struct Prefs(Option<i32>);

impl PreferenceStore for Prefs {
    fn selected_site_id(&self) -> layout_picker::Result<Option<i32>> {
        Ok(self.0)
    }

    fn set_selected_site_id(&mut self, local_id: i32) -> layout_picker::Result<()> {
        self.0 = Some(local_id);
        Ok(())
    }
}

#[derive(Default)]
struct Sites(HashMap<i32, Site>);

impl SiteStore for Sites {
    fn site_by_local_id(&self, local_id: i32) -> layout_picker::Result<Option<Site>> {
        Ok(self.0.get(&local_id).cloned())
    }

    fn upsert_site(&mut self, site: &Site) -> layout_picker::Result<()> {
        self.0.insert(site.local_id, site.clone());
        Ok(())
    }
}

fn sites() -> Sites {
    let mut sites = Sites::default();
    sites.0.insert(1, Site::new(1, "Travel notes", "https://travel.example"));
    sites
}

/// A picker that has gone through `init()` with the builtin catalog.
fn loaded_picker() -> PickerState {
    let prefs = Prefs(Some(1));
    let sites = sites();
    let mut picker = PickerState::default();
    picker.init(&ContentLoader::new(&prefs, &sites, &BuiltinCatalog));
    assert!(picker.content().is_some());
    picker
}

fn buttons(picker: &PickerState) -> ButtonsUiState {
    picker.content().unwrap().buttons_ui_state
}

#[test]
fn ready_layout_tap_selects_it_and_shows_create_page() {
    let mut picker = loaded_picker();

    picker.on_thumbnail_ready("about-1");
    picker.on_layout_tapped("about-1");

    let content = picker.content().unwrap();
    assert_eq!(content.selected_layout_slug.as_deref(), Some("about-1"));
    assert!(content.buttons_ui_state.create_page_visible);
}

#[test]
fn header_visibility_follows_offset_against_threshold() {
    let mut picker = loaded_picker();

    picker.on_app_bar_offset_changed(9, 10);
    assert!(picker.content().unwrap().is_header_visible);

    picker.on_app_bar_offset_changed(11, 10);
    assert!(!picker.content().unwrap().is_header_visible);

    for threshold in -3..6 {
        for offset in -3..6 {
            picker.on_app_bar_offset_changed(offset, threshold);
            assert_eq!(
                picker.content().unwrap().is_header_visible,
                offset < threshold,
                "offset {offset}, threshold {threshold}"
            );
        }
    }
}

#[test]
fn offset_equal_to_threshold_hides_header() {
    let mut picker = loaded_picker();
    picker.on_app_bar_offset_changed(0, 10);

    picker.on_app_bar_offset_changed(10, 10);

    assert!(!picker.content().unwrap().is_header_visible);
}

#[test]
fn tap_then_tap_restores_the_original_state() {
    let mut picker = loaded_picker();
    picker.on_thumbnail_ready("blog-2");
    let before = picker.ui_state().clone();

    picker.on_layout_tapped("blog-2");
    assert_eq!(picker.selected_layout_slug(), Some("blog-2"));
    picker.on_layout_tapped("blog-2");

    assert_eq!(picker.ui_state(), &before);
}

#[test]
fn tapping_an_unready_layout_changes_nothing() {
    let mut picker = loaded_picker();

    assert!(!picker.on_layout_tapped("about-1"));
    assert_eq!(picker.selected_layout_slug(), None);

    picker.on_thumbnail_ready("about-2");
    picker.on_layout_tapped("about-2");
    picker.on_layout_tapped("about-1");
    assert_eq!(picker.selected_layout_slug(), Some("about-2"));
}

#[test]
fn category_taps_toggle_membership() {
    let mut picker = loaded_picker();

    picker.on_category_tapped("about");
    assert!(picker.content().unwrap().selected_categories_slugs.contains("about"));

    picker.on_category_tapped("about");
    assert!(!picker.content().unwrap().selected_categories_slugs.contains("about"));
}

#[test]
fn dismiss_clears_both_selections() {
    let mut picker = loaded_picker();
    picker.on_thumbnail_ready("contact-1");
    picker.on_layout_tapped("contact-1");
    picker.on_category_tapped("contact");
    picker.on_category_tapped("blog");

    picker.dismiss();

    let content = picker.content().unwrap();
    assert_eq!(content.selected_layout_slug, None);
    assert!(content.selected_categories_slugs.is_empty());
    assert_eq!(picker.take_picker_showing(), vec![false]);

    picker.dismiss();
    assert_eq!(picker.take_picker_showing(), vec![false]);
}

#[test]
fn buttons_depend_only_on_the_selected_layout() {
    let mut picker = loaded_picker();
    let none = ButtonsUiState {
        create_blank_page_visible: true,
        create_page_visible: false,
        preview_visible: false,
    };
    let some = ButtonsUiState {
        create_blank_page_visible: false,
        create_page_visible: true,
        preview_visible: true,
    };
    assert_eq!(buttons(&picker), none);

    picker.on_thumbnail_ready("portfolio-1");
    picker.on_category_tapped("portfolio");
    picker.on_layout_tapped("portfolio-1");
    assert_eq!(buttons(&picker), some);

    picker.on_app_bar_offset_changed(0, 2);
    picker.on_category_tapped("portfolio");
    assert_eq!(buttons(&picker), some);

    picker.on_layout_tapped("portfolio-1");
    assert_eq!(buttons(&picker), none);
}

#[test]
fn init_without_selected_site_stays_loading() {
    let prefs = Prefs(None);
    let sites = sites();
    let mut picker = PickerState::default();

    picker.init(&ContentLoader::new(&prefs, &sites, &BuiltinCatalog));

    assert_eq!(picker.ui_state(), &UiState::Loading);
    assert!(picker.last_error.is_some());
}

#[test]
fn subscribers_see_each_snapshot_once() {
    let mut picker = PickerState::default();
    let mut subscription = picker.subscribe();
    assert!(picker.poll(&mut subscription).is_none());

    let prefs = Prefs(Some(1));
    let sites = sites();
    picker.init(&ContentLoader::new(&prefs, &sites, &BuiltinCatalog));

    assert!(matches!(picker.poll(&mut subscription), Some(UiState::Content(_))));
    assert!(picker.poll(&mut subscription).is_none());
}

#[test]
fn start_seeds_header_before_content() {
    let mut picker = PickerState::default();
    picker.start(true);

    let prefs = Prefs(Some(1));
    let sites = sites();
    picker.init(&ContentLoader::new(&prefs, &sites, &BuiltinCatalog));

    assert!(picker.content().unwrap().is_header_visible);
}

/// Runs every worker-bound action through `worker` and feeds the responses
/// back into the picker. Returns the non-worker actions.
fn pump(picker: &mut PickerState, worker: &mut PickerWorker, actions: Vec<Action>) -> Vec<Action> {
    let mut pending = actions;
    let mut host_actions = Vec::new();

    while !pending.is_empty() {
        let mut next = Vec::new();
        for action in pending {
            match action {
                Action::PostToWorker(message) => {
                    let response = worker.handle_message(message);
                    let (_, more) = handle_event(picker, &Event::WorkerResponse(response)).unwrap();
                    next.extend(more);
                }
                other => host_actions.push(other),
            }
        }
        pending = next;
    }

    host_actions
}

#[test]
fn full_plugin_loop_creates_a_page_from_the_selected_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: Some(dir.path().to_string_lossy().into_owned()),
        site_name: Some("Travel notes".to_string()),
        ..Config::default()
    };
    let mut worker = PickerWorker::default();
    assert!(matches!(
        worker.handle_message(WorkerMessage::configure(config.clone())),
        WorkerResponse::Configured { selected_site: Some(_) }
    ));

    let mut picker = layout_picker::initialize(&config);
    let (_, actions) = handle_event(&mut picker, &Event::PermissionsResult { granted: true }).unwrap();
    assert!(pump(&mut picker, &mut worker, actions).is_empty());

    assert!(picker.content().is_some());
    assert!(picker.is_thumbnail_ready("about-1"));

    let (_, actions) = handle_event(&mut picker, &Event::LayoutTapped("about-1".into())).unwrap();
    assert!(actions.is_empty());
    assert_eq!(picker.selected_layout_slug(), Some("about-1"));

    let (_, actions) = handle_event(&mut picker, &Event::CreatePage).unwrap();
    let host_actions = pump(&mut picker, &mut worker, actions);

    assert_eq!(host_actions, vec![Action::CloseFocus]);
    assert_eq!(picker.selected_layout_slug(), None);

    drop(worker);
    let storage = JsonStorage::new(dir.path().join(STORAGE_FILE)).unwrap();
    let site_id = storage.selected_site_id().unwrap().unwrap();
    let pages: Vec<PageDraft> = storage.pages_for_site(site_id).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].layout_slug.as_deref(), Some("about-1"));
    assert_eq!(pages[0].title, "About me");
}

#[test]
fn builtin_catalog_is_not_empty() {
    let catalog = BuiltinCatalog.fetch_catalog().unwrap();
    assert!(!catalog.categories.is_empty());
    assert!(catalog.layout_count() > 0);
}
