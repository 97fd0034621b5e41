//! Collaborator interfaces consumed by the picker.
//!
//! The picker never reaches for a global store. Whoever builds it hands over
//! implementations of these traits, which keeps the engine testable with
//! in-memory fakes and lets the worker thread own the real backends.
//!
//! # Implementations
//!
//! - [`JsonStorage`](crate::storage::JsonStorage): preferences, sites and
//!   page drafts in one JSON file
//! - [`CatalogFile`](crate::storage::CatalogFile): TOML catalog on disk
//! - [`BuiltinCatalog`](crate::storage::BuiltinCatalog): starter catalog
//!   compiled into the plugin

use crate::domain::error::Result;
use crate::domain::{Catalog, PageDraft, Site};

/// Persisted user preferences.
pub trait PreferenceStore: Send {
    /// Returns the local id of the currently selected site, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be read.
    fn selected_site_id(&self) -> Result<Option<i32>>;

    /// Persists the currently selected site.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be written.
    fn set_selected_site_id(&mut self, local_id: i32) -> Result<()>;
}

/// Lookup of sites by local identifier.
pub trait SiteStore: Send {
    /// Returns `Ok(None)` if no site has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn site_by_local_id(&self, local_id: i32) -> Result<Option<Site>>;

    /// Adds or replaces a site, keyed by its local id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn upsert_site(&mut self, site: &Site) -> Result<()>;
}

/// Source of the layout catalog and its thumbnails.
pub trait CatalogSource: Send {
    /// Loads and validates the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreadable or fails validation.
    fn fetch_catalog(&self) -> Result<Catalog>;

    /// Resolves the thumbnail text of a layout.
    ///
    /// Returns `Ok(None)` if the layout is unknown or has no preview.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced preview file cannot be read.
    fn thumbnail(&self, slug: &str) -> Result<Option<String>>;
}

/// Store for pages created from the picker.
pub trait PageStore: Send {
    /// Saves a fresh draft for `site_id`, optionally based on a layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft cannot be persisted.
    fn save_initial_page(
        &mut self,
        site_id: i32,
        layout_slug: Option<&str>,
        title: &str,
    ) -> Result<PageDraft>;

    /// Returns every draft created for `site_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn pages_for_site(&self, site_id: i32) -> Result<Vec<PageDraft>>;

    /// Returns `Ok(None)` if no draft has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn page_by_local_id(&self, local_id: i64) -> Result<Option<PageDraft>>;

    /// Removes an abandoned draft. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn discard_page(&mut self, local_id: i64) -> Result<bool>;
}
