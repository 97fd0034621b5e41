//! Layout catalog domain model.
//!
//! The catalog is the read-only content the picker offers: a list of filter
//! chips ([`Category`]) and a list of layout sections ([`LayoutCategory`]),
//! each holding the [`Layout`]s a page can be started from. Every entry is
//! identified by a unique `slug`.

use super::error::{PickerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A filter chip shown above the layout sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Category {
    /// Creates a category with no emoji and an empty description.
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            emoji: None,
            description: String::new(),
        }
    }
}

/// A single page layout.
///
/// `preview` holds the thumbnail source: either inline preview text or a path
/// to a preview file, resolved by the catalog source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub preview: Option<String>,
}

impl Layout {
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            preview: None,
        }
    }
}

/// A section of layouts sharing a category slug.
///
/// The slug matches the [`Category`] chip that filters it, so selecting the
/// "about" chip narrows the picker to the "about" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCategory {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layouts: Vec<Layout>,
}

/// The full content offered by the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub layout_categories: Vec<LayoutCategory>,
}

impl Catalog {
    /// Parses a catalog from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Catalog`] if the TOML is malformed or any slug is
    /// duplicated (see [`Catalog::validate`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_picker::domain::Catalog;
    ///
    /// let catalog = Catalog::from_toml_str(r#"
    ///     [[categories]]
    ///     slug = "about"
    ///     title = "About"
    ///
    ///     [[layout_categories]]
    ///     slug = "about"
    ///     title = "About"
    ///
    ///     [[layout_categories.layouts]]
    ///     slug = "about-1"
    ///     title = "About me"
    /// "#).unwrap();
    ///
    /// assert_eq!(catalog.layout_count(), 1);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(source)
            .map_err(|e| PickerError::Catalog(format!("failed to parse catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that category, section and layout slugs are unique.
    ///
    /// Layout slugs must be unique across the whole catalog since selection
    /// is tracked by slug alone.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Catalog`] naming the first duplicate found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.slug.as_str()) {
                return Err(PickerError::Catalog(format!(
                    "duplicate category slug: {}",
                    category.slug
                )));
            }
        }

        let mut sections = HashSet::new();
        let mut layouts = HashSet::new();
        for section in &self.layout_categories {
            if !sections.insert(section.slug.as_str()) {
                return Err(PickerError::Catalog(format!(
                    "duplicate layout category slug: {}",
                    section.slug
                )));
            }
            for layout in &section.layouts {
                if !layouts.insert(layout.slug.as_str()) {
                    return Err(PickerError::Catalog(format!(
                        "duplicate layout slug: {}",
                        layout.slug
                    )));
                }
            }
        }

        Ok(())
    }

    /// Finds a layout by slug in any section.
    #[must_use]
    pub fn layout(&self, slug: &str) -> Option<&Layout> {
        self.layout_categories
            .iter()
            .flat_map(|section| section.layouts.iter())
            .find(|layout| layout.slug == slug)
    }

    /// Total number of layouts across all sections.
    #[must_use]
    pub fn layout_count(&self) -> usize {
        self.layout_categories.iter().map(|s| s.layouts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(slug: &str, layouts: &[&str]) -> LayoutCategory {
        LayoutCategory {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            layouts: layouts.iter().map(|l| Layout::new(*l, *l)).collect(),
        }
    }

    #[test]
    fn duplicate_layout_slugs_across_sections_are_rejected() {
        let catalog = Catalog {
            categories: vec![],
            layout_categories: vec![section("about", &["about-1"]), section("blog", &["about-1"])],
        };

        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, PickerError::Catalog(msg) if msg.contains("about-1")));
    }

    #[test]
    fn duplicate_category_slugs_are_rejected() {
        let catalog = Catalog {
            categories: vec![Category::new("about", "About"), Category::new("about", "Again")],
            layout_categories: vec![],
        };

        assert!(catalog.validate().is_err());
    }

    #[test]
    fn layout_lookup_searches_every_section() {
        let catalog = Catalog {
            categories: vec![],
            layout_categories: vec![section("about", &["about-1"]), section("blog", &["blog-1", "blog-2"])],
        };

        assert_eq!(catalog.layout("blog-2").map(|l| l.title.as_str()), Some("blog-2"));
        assert!(catalog.layout("missing").is_none());
        assert_eq!(catalog.layout_count(), 3);
    }

    #[test]
    fn malformed_toml_is_a_catalog_error() {
        let err = Catalog::from_toml_str("[[categories]]\nslug = ").unwrap_err();
        assert!(matches!(err, PickerError::Catalog(_)));
    }
}
