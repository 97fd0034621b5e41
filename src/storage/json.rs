//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! One file backs three collaborator traits: the selected-site preference,
//! the site lookup and the page drafts created from the picker.

use crate::domain::error::{PickerError, Result};
use crate::domain::{PageDraft, Site};
use crate::storage::backend::{PageStore, PreferenceStore, SiteStore};
use crate::storage::models::{PageRecord, SiteRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Local id of the site new pages are created for.
    #[serde(default)]
    selected_site: Option<i32>,

    /// Known sites, keyed by local id.
    #[serde(default)]
    sites: BTreeMap<i32, SiteRecord>,

    /// Page drafts in creation order.
    #[serde(default)]
    pages: Vec<PageRecord>,

    /// Id handed to the next draft.
    #[serde(default = "first_page_id")]
    next_page_id: i64,
}

const fn first_page_id() -> i64 {
    1
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            selected_site: None,
            sites: BTreeMap::new(),
            pages: Vec::new(),
            next_page_id: first_page_id(),
        }
    }
}

/// JSON file storage backend.
///
/// The entire dataset is kept in memory. Every modification is written to
/// disk before it is applied in memory, so a failed write leaves the store
/// as it was.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It's designed to be used from a single
/// worker thread, matching the Zellij plugin architecture.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "selected_site": 1,
///   "sites": {
///     "1": { "local_id": 1, "name": "My Site", "url": "https://example.com", "added_at": 1700000000 }
///   },
///   "pages": [
///     { "local_id": 1, "site_id": 1, "layout_slug": "about-1", "title": "About me", "created_at": 1700000100 }
///   ],
///   "next_page_id": 2
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on creation.
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise creates a new empty storage.
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use layout_picker::storage::{JsonStorage, PreferenceStore};
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/layout-picker.json"))?;
    /// let selected = storage.selected_site_id()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            tracing::debug!("loading existing data");
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(
            site_count = data.sites.len(),
            page_count = data.pages.len(),
            selected_site = ?data.selected_site,
            "storage initialized"
        );

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| PickerError::Storage(format!("failed to parse JSON: {e}")))
    }

    /// Writes storage data to disk using atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename fails.
    fn save_to_file(path: &Path, data: &StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| PickerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!(path = ?path, "storage saved");
        Ok(())
    }

    /// Applies `mutate` to a copy of the data, saves the copy and only then
    /// replaces the in-memory data with it.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut StorageData) -> T) -> Result<T> {
        let mut next = self.data.clone();
        let value = mutate(&mut next);
        Self::save_to_file(&self.file_path, &next)?;
        self.data = next;
        Ok(value)
    }
}

impl PreferenceStore for JsonStorage {
    fn selected_site_id(&self) -> Result<Option<i32>> {
        Ok(self.data.selected_site)
    }

    fn set_selected_site_id(&mut self, local_id: i32) -> Result<()> {
        let _span = tracing::debug_span!("json_set_selected_site", local_id = local_id).entered();

        if self.data.selected_site == Some(local_id) {
            return Ok(());
        }
        self.commit(|data| data.selected_site = Some(local_id))
    }
}

impl SiteStore for JsonStorage {
    fn site_by_local_id(&self, local_id: i32) -> Result<Option<Site>> {
        let _span = tracing::debug_span!("json_site_by_local_id", local_id = local_id).entered();

        let site = self.data.sites.get(&local_id).cloned().map(SiteRecord::into_site);

        tracing::debug!(found = site.is_some(), "site lookup complete");
        Ok(site)
    }

    fn upsert_site(&mut self, site: &Site) -> Result<()> {
        let _span = tracing::debug_span!("json_upsert_site", local_id = site.local_id).entered();

        self.commit(|data| match data.sites.get_mut(&site.local_id) {
            Some(existing) => {
                existing.name.clone_from(&site.name);
                existing.url.clone_from(&site.url);
            }
            None => {
                data.sites.insert(site.local_id, SiteRecord::from_site(site));
            }
        })
    }
}

impl PageStore for JsonStorage {
    fn save_initial_page(
        &mut self,
        site_id: i32,
        layout_slug: Option<&str>,
        title: &str,
    ) -> Result<PageDraft> {
        let _span = tracing::debug_span!("json_save_initial_page",
            site_id = site_id,
            layout_slug = ?layout_slug
        ).entered();

        if !self.data.sites.contains_key(&site_id) {
            return Err(PickerError::Storage(format!("site not found: {site_id}")));
        }

        let record = self.commit(|data| {
            let record = PageRecord {
                local_id: data.next_page_id,
                site_id,
                layout_slug: layout_slug.map(String::from),
                title: title.to_string(),
                created_at: chrono::Utc::now().timestamp(),
            };
            data.next_page_id = data.next_page_id.saturating_add(1);
            data.pages.push(record.clone());
            record
        })?;

        tracing::debug!(page_id = record.local_id, "page draft saved");
        Ok(record.into_draft())
    }

    fn pages_for_site(&self, site_id: i32) -> Result<Vec<PageDraft>> {
        Ok(self
            .data
            .pages
            .iter()
            .filter(|page| page.site_id == site_id)
            .cloned()
            .map(PageRecord::into_draft)
            .collect())
    }

    fn page_by_local_id(&self, local_id: i64) -> Result<Option<PageDraft>> {
        Ok(self
            .data
            .pages
            .iter()
            .find(|page| page.local_id == local_id)
            .cloned()
            .map(PageRecord::into_draft))
    }

    fn discard_page(&mut self, local_id: i64) -> Result<bool> {
        let _span = tracing::debug_span!("json_discard_page", local_id = local_id).entered();

        if !self.data.pages.iter().any(|page| page.local_id == local_id) {
            return Ok(false);
        }
        self.commit(|data| data.pages.retain(|page| page.local_id != local_id))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("nested").join("layout-picker.json")).unwrap()
    }

    #[test]
    fn empty_storage_has_no_selected_site() {
        let dir = TempDir::new().unwrap();
        let storage = open(&dir);

        assert_eq!(storage.selected_site_id().unwrap(), None);
        assert_eq!(storage.site_by_local_id(1).unwrap(), None);
    }

    #[test]
    fn selected_site_and_sites_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut storage = open(&dir);
            storage.upsert_site(&Site::new(7, "Travel notes", "https://travel.example")).unwrap();
            storage.set_selected_site_id(7).unwrap();
        }

        let storage = open(&dir);
        assert_eq!(storage.selected_site_id().unwrap(), Some(7));
        let site = storage.site_by_local_id(7).unwrap().unwrap();
        assert_eq!(site.name, "Travel notes");
    }

    #[test]
    fn upsert_replaces_name_of_existing_site() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);
        storage.upsert_site(&Site::new(1, "Old", "")).unwrap();
        storage.upsert_site(&Site::new(1, "New", "https://new.example")).unwrap();

        let site = storage.site_by_local_id(1).unwrap().unwrap();
        assert_eq!(site.name, "New");
        assert_eq!(site.url, "https://new.example");
    }

    #[test]
    fn page_drafts_get_increasing_ids_and_persist() {
        let dir = TempDir::new().unwrap();
        {
            let mut storage = open(&dir);
            storage.upsert_site(&Site::new(1, "Site", "")).unwrap();
            let blank = storage.save_initial_page(1, None, "Untitled").unwrap();
            let about = storage.save_initial_page(1, Some("about-1"), "About me").unwrap();

            assert!(blank.is_blank());
            assert_eq!(blank.local_id, 1);
            assert_eq!(about.local_id, 2);
        }

        let storage = open(&dir);
        let pages = storage.pages_for_site(1).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].layout_slug.as_deref(), Some("about-1"));
        assert!(storage.pages_for_site(2).unwrap().is_empty());
    }

    #[test]
    fn failed_write_leaves_no_draft_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout-picker.json");
        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage.upsert_site(&Site::new(1, "Site", "")).unwrap();

        // The temporary file cannot be written over a directory.
        let blocker = path.with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();
        assert!(storage.save_initial_page(1, Some("about-1"), "About me").is_err());
        assert!(storage.pages_for_site(1).unwrap().is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        let page = storage.save_initial_page(1, Some("about-1"), "About me").unwrap();
        assert_eq!(page.local_id, 1);
        drop(storage);

        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(storage.pages_for_site(1).unwrap().len(), 1);
    }

    #[test]
    fn drafts_can_be_looked_up_and_discarded() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);
        storage.upsert_site(&Site::new(1, "Site", "")).unwrap();
        let page = storage.save_initial_page(1, None, "Untitled").unwrap();

        assert_eq!(storage.page_by_local_id(page.local_id).unwrap(), Some(page.clone()));
        assert!(storage.discard_page(page.local_id).unwrap());
        assert!(!storage.discard_page(page.local_id).unwrap());
        assert_eq!(storage.page_by_local_id(page.local_id).unwrap(), None);

        let storage = open(&dir);
        assert!(storage.pages_for_site(1).unwrap().is_empty());
    }

    #[test]
    fn page_for_unknown_site_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut storage = open(&dir);

        let err = storage.save_initial_page(42, None, "Untitled").unwrap_err();
        assert!(matches!(err, PickerError::Storage(_)));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layout-picker.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonStorage::new(path), Err(PickerError::Storage(_))));
    }
}
