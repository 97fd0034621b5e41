//! Domain layer for the layout picker.
//!
//! Core types of the picker, independent of Zellij APIs or storage concerns:
//! the layout catalog, the site a page is created for, and the page draft
//! persisted when creation is requested.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`catalog`]: Categories, layout categories and layouts
//! - [`site`]: Sites and page drafts
//!
//! # Examples
//!
//! ```
//! use layout_picker::domain::{Category, Result};
//!
//! fn about() -> Result<Category> {
//!     Ok(Category::new("about", "About"))
//! }
//!
//! assert_eq!(about().unwrap().slug, "about");
//! ```

pub mod catalog;
pub mod error;
pub mod site;

pub use catalog::{Catalog, Category, Layout, LayoutCategory};
pub use error::{PickerError, Result};
pub use site::{PageDraft, Site};
