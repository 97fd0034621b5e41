//! Site and page draft domain model.
//!
//! A [`Site`] is the destination a new page is created for; the picker only
//! needs its local id and a label for the header. A [`PageDraft`] is the
//! record saved when the user asks to create a page, optionally starting from
//! a layout.

use serde::{Deserialize, Serialize};

/// A site known to the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub local_id: i32,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Site {
    #[must_use]
    pub fn new(local_id: i32, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            local_id,
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A newly created page, saved before the editor takes over.
///
/// `layout_slug` is `None` for a blank page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub local_id: i64,
    pub site_id: i32,
    pub layout_slug: Option<String>,
    pub title: String,
    pub created_at: i64,
}

impl PageDraft {
    /// Whether the draft starts from an empty page rather than a layout.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.layout_slug.is_none()
    }
}
