//! Content loading for the picker's initial transition.
//!
//! [`ContentLoader`] bundles the three collaborators needed to leave the
//! loading screen: the selected-site preference, the site lookup and the
//! catalog source. They are supplied at construction, so the same loader
//! runs on the worker thread with real backends and in tests with in-memory
//! fakes.

use crate::domain::error::{PickerError, Result};
use crate::domain::{Catalog, Site};
use crate::storage::backend::{CatalogSource, PreferenceStore, SiteStore};
use serde::{Deserialize, Serialize};

/// Everything the picker needs to show content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedContent {
    pub site: Site,
    pub catalog: Catalog,
}

/// Loads the selected site and the layout catalog.
///
/// Borrows its collaborators, so one backend (such as
/// [`JsonStorage`](crate::storage::JsonStorage)) can serve as both the
/// preference store and the site store.
#[derive(Clone, Copy)]
pub struct ContentLoader<'a> {
    prefs: &'a dyn PreferenceStore,
    sites: &'a dyn SiteStore,
    catalog: &'a dyn CatalogSource,
}

impl<'a> ContentLoader<'a> {
    #[must_use]
    pub fn new(
        prefs: &'a dyn PreferenceStore,
        sites: &'a dyn SiteStore,
        catalog: &'a dyn CatalogSource,
    ) -> Self {
        Self {
            prefs,
            sites,
            catalog,
        }
    }

    /// Resolves the selected site, then fetches the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Storage`] if no site is selected or the
    /// selected id is unknown, and propagates collaborator failures.
    pub fn load(&self) -> Result<LoadedContent> {
        let _span = tracing::debug_span!("content_loader_load").entered();

        let site_id = self
            .prefs
            .selected_site_id()?
            .ok_or_else(|| PickerError::Storage("no site selected".to_string()))?;

        let site = self
            .sites
            .site_by_local_id(site_id)?
            .ok_or_else(|| PickerError::Storage(format!("selected site not found: {site_id}")))?;

        let catalog = self.catalog.fetch_catalog()?;

        tracing::debug!(
            site_id = site.local_id,
            categories = catalog.categories.len(),
            layout_categories = catalog.layout_categories.len(),
            "content loaded"
        );

        Ok(LoadedContent { site, catalog })
    }
}

impl std::fmt::Debug for ContentLoader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BuiltinCatalog;

    struct Prefs(Option<i32>);

    impl PreferenceStore for Prefs {
        fn selected_site_id(&self) -> Result<Option<i32>> {
            Ok(self.0)
        }

        fn set_selected_site_id(&mut self, local_id: i32) -> Result<()> {
            self.0 = Some(local_id);
            Ok(())
        }
    }

    struct Sites(Vec<Site>);

    impl SiteStore for Sites {
        fn site_by_local_id(&self, local_id: i32) -> Result<Option<Site>> {
            Ok(self.0.iter().find(|s| s.local_id == local_id).cloned())
        }

        fn upsert_site(&mut self, site: &Site) -> Result<()> {
            self.0.push(site.clone());
            Ok(())
        }
    }

    fn load(selected: Option<i32>) -> Result<LoadedContent> {
        let prefs = Prefs(selected);
        let sites = Sites(vec![Site::new(1, "Site", "")]);
        ContentLoader::new(&prefs, &sites, &BuiltinCatalog).load()
    }

    #[test]
    fn loads_selected_site_and_catalog() {
        let content = load(Some(1)).unwrap();
        assert_eq!(content.site.local_id, 1);
        assert!(!content.catalog.categories.is_empty());
    }

    #[test]
    fn missing_selection_is_a_storage_error() {
        assert!(matches!(load(None), Err(PickerError::Storage(_))));
    }

    #[test]
    fn unknown_site_is_a_storage_error() {
        assert!(matches!(load(Some(9)), Err(PickerError::Storage(_))));
    }
}
