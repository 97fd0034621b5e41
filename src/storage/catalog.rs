//! Layout catalog sources.
//!
//! Two [`CatalogSource`] implementations: [`CatalogFile`] reads a TOML
//! catalog from disk on every fetch, [`BuiltinCatalog`] serves the starter
//! catalog compiled into the plugin. Both keep the last parsed catalog for
//! thumbnail lookups.
//!
//! A layout's `preview` is either inline thumbnail text or a reference of the
//! form `file:<path>`. Relative paths are resolved against the directory of
//! the catalog file.

use crate::domain::error::{PickerError, Result};
use crate::domain::Catalog;
use crate::storage::backend::CatalogSource;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Prefix marking a preview as a path rather than inline text.
const FILE_PREVIEW_PREFIX: &str = "file:";

/// Catalog compiled into the plugin binary.
const STARTER_CATALOG: &str = include_str!("../../catalog/starter.toml");

/// Parsed starter catalog, filled on first use.
static STARTER: OnceLock<Catalog> = OnceLock::new();

/// TOML catalog stored on disk.
#[derive(Debug)]
pub struct CatalogFile {
    path: PathBuf,

    /// Catalog from the last successful fetch.
    cached: Mutex<Option<Catalog>>,
}

impl CatalogFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: Mutex::new(None),
        }
    }

    fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn read(&self) -> Result<Catalog> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            PickerError::Catalog(format!("failed to read {}: {e}", self.path.display()))
        })?;
        Catalog::from_toml_str(&contents)
    }

    fn cache(&self) -> Result<std::sync::MutexGuard<'_, Option<Catalog>>> {
        self.cached
            .lock()
            .map_err(|e| PickerError::Catalog(format!("catalog cache lock poisoned: {e}")))
    }
}

impl CatalogSource for CatalogFile {
    fn fetch_catalog(&self) -> Result<Catalog> {
        let _span = tracing::debug_span!("catalog_file_fetch", path = ?self.path).entered();

        let catalog = self.read()?;
        *self.cache()? = Some(catalog.clone());

        tracing::debug!(
            categories = catalog.categories.len(),
            layouts = catalog.layout_count(),
            "catalog loaded from file"
        );
        Ok(catalog)
    }

    fn thumbnail(&self, slug: &str) -> Result<Option<String>> {
        let mut cached = self.cache()?;
        if cached.is_none() {
            *cached = Some(self.read()?);
        }
        let Some(catalog) = cached.as_ref() else {
            return Ok(None);
        };

        let Some(preview) = catalog.layout(slug).and_then(|l| l.preview.as_deref()) else {
            return Ok(None);
        };
        resolve_preview(preview, Some(self.base_dir()))
    }
}

/// Starter catalog embedded at compile time.
///
/// Used when no `catalog_file` is configured. Previews must be inline since
/// there is no directory to resolve files against.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    fn parsed() -> Result<&'static Catalog> {
        if let Some(catalog) = STARTER.get() {
            return Ok(catalog);
        }
        let catalog = Catalog::from_toml_str(STARTER_CATALOG)?;
        Ok(STARTER.get_or_init(|| catalog))
    }
}

impl CatalogSource for BuiltinCatalog {
    fn fetch_catalog(&self) -> Result<Catalog> {
        Self::parsed().cloned()
    }

    fn thumbnail(&self, slug: &str) -> Result<Option<String>> {
        let catalog = Self::parsed()?;
        let Some(preview) = catalog.layout(slug).and_then(|l| l.preview.as_deref()) else {
            return Ok(None);
        };
        resolve_preview(preview, None)
    }
}

/// Turns a preview reference into thumbnail text.
fn resolve_preview(preview: &str, base_dir: Option<&Path>) -> Result<Option<String>> {
    let Some(reference) = preview.strip_prefix(FILE_PREVIEW_PREFIX) else {
        return Ok(Some(preview.to_string()));
    };

    let Some(base_dir) = base_dir else {
        tracing::debug!(reference = %reference, "file preview without catalog directory");
        return Ok(None);
    };

    let path = base_dir.join(reference.trim());
    if !path.exists() {
        tracing::debug!(path = ?path, "preview file missing");
        return Ok(None);
    }

    Ok(Some(std::fs::read_to_string(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
[[categories]]
slug = "about"
title = "About"

[[layout_categories]]
slug = "about"
title = "About"

[[layout_categories.layouts]]
slug = "about-1"
title = "About me"
preview = "file:previews/about-1.txt"

[[layout_categories.layouts]]
slug = "about-2"
title = "Team"
preview = "| team |"

[[layout_categories.layouts]]
slug = "about-3"
title = "Story"
preview = "file:previews/missing.txt"
"#;

    fn catalog_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("previews")).unwrap();
        std::fs::write(dir.path().join("catalog.toml"), CATALOG).unwrap();
        std::fs::write(dir.path().join("previews").join("about-1.txt"), "# About me\n").unwrap();
        dir
    }

    #[test]
    fn builtin_catalog_is_valid_and_not_empty() {
        let catalog = BuiltinCatalog.fetch_catalog().unwrap();
        assert!(!catalog.categories.is_empty());
        assert!(!catalog.layout_categories.is_empty());
        assert!(catalog.layout_count() > 0);
    }

    #[test]
    fn every_builtin_layout_has_a_thumbnail() {
        let catalog = BuiltinCatalog.fetch_catalog().unwrap();
        for section in &catalog.layout_categories {
            for layout in &section.layouts {
                assert!(
                    BuiltinCatalog.thumbnail(&layout.slug).unwrap().is_some(),
                    "missing thumbnail for {}",
                    layout.slug
                );
            }
        }
    }

    #[test]
    fn file_previews_resolve_relative_to_catalog() {
        let dir = catalog_dir();
        let source = CatalogFile::new(dir.path().join("catalog.toml"));

        assert_eq!(source.thumbnail("about-1").unwrap().as_deref(), Some("# About me\n"));
        assert_eq!(source.thumbnail("about-2").unwrap().as_deref(), Some("| team |"));
        assert_eq!(source.thumbnail("about-3").unwrap(), None);
        assert_eq!(source.thumbnail("unknown").unwrap(), None);
    }

    #[test]
    fn thumbnails_use_the_parsed_catalog() {
        let dir = catalog_dir();
        let source = CatalogFile::new(dir.path().join("catalog.toml"));
        source.fetch_catalog().unwrap();

        std::fs::remove_file(dir.path().join("catalog.toml")).unwrap();
        assert_eq!(source.thumbnail("about-2").unwrap().as_deref(), Some("| team |"));
        assert!(source.fetch_catalog().is_err());
    }

    #[test]
    fn missing_catalog_file_is_a_catalog_error() {
        let dir = TempDir::new().unwrap();
        let source = CatalogFile::new(dir.path().join("nope.toml"));

        assert!(matches!(source.fetch_catalog(), Err(PickerError::Catalog(_))));
    }
}
