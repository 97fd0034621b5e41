//! Storage layer: collaborators behind the picker.
//!
//! Persistence of the selected site, the site list and page drafts, plus the
//! sources of the layout catalog. The picker consumes these only through the
//! traits in [`backend`].
//!
//! # Modules
//!
//! - `backend`: Collaborator traits (preferences, sites, catalog, pages)
//! - `json`: JSON file-based implementation of preferences, sites and pages
//! - `catalog`: TOML catalog file and the builtin starter catalog
//! - `loader`: Content loading for the picker's first transition
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod catalog;
pub mod json;
pub mod loader;
pub mod models;

pub use backend::{CatalogSource, PageStore, PreferenceStore, SiteStore};
pub use catalog::{BuiltinCatalog, CatalogFile};
pub use json::JsonStorage;
pub use loader::{ContentLoader, LoadedContent};
pub use models::{PageRecord, SiteRecord};
