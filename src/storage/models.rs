//! Storage record models for persistence layer.
//!
//! Raw record types written to disk. They are kept apart from the domain
//! types so the file format can carry bookkeeping fields (timestamps of
//! insertion, the draft counter) without leaking them into the picker.

use crate::domain::{PageDraft, Site};
use serde::{Deserialize, Serialize};

/// Represents a site record in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Local identifier, also the key of the record in the sites map.
    pub local_id: i32,

    /// Display name shown in the picker header.
    pub name: String,

    /// Public address of the site.
    #[serde(default)]
    pub url: String,

    /// Unix timestamp when the site was first stored.
    pub added_at: i64,
}

impl SiteRecord {
    /// Creates a record from a domain site, stamped with the current time.
    #[must_use]
    pub fn from_site(site: &Site) -> Self {
        Self {
            local_id: site.local_id,
            name: site.name.clone(),
            url: site.url.clone(),
            added_at: chrono::Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn into_site(self) -> Site {
        Site {
            local_id: self.local_id,
            name: self.name,
            url: self.url,
        }
    }
}

/// Represents a page draft record in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub local_id: i64,
    pub site_id: i32,
    pub layout_slug: Option<String>,
    pub title: String,
    pub created_at: i64,
}

impl PageRecord {
    #[must_use]
    pub fn into_draft(self) -> PageDraft {
        PageDraft {
            local_id: self.local_id,
            site_id: self.site_id,
            layout_slug: self.layout_slug,
            title: self.title,
            created_at: self.created_at,
        }
    }
}
