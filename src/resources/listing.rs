//! Listing resource as returned by the shop listings endpoints.

use serde::{Deserialize, Serialize};

use crate::resources::Money;

/// An Etsy shop listing.
///
/// Owned by the upstream API; the dashboard only reads listings and issues
/// partial-field PATCH mutations (auto-renew flag, tags, materials). No
/// durable copy is ever cached.
///
/// Fields the dashboard does not touch are omitted; unknown upstream
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// The unique identifier of the listing.
    pub listing_id: u64,

    /// The listing title.
    #[serde(default)]
    pub title: String,

    /// The listing price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    /// Units in stock.
    #[serde(default)]
    pub quantity: u64,

    /// Lifetime view count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,

    /// Tags, at most 13 upstream.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Materials.
    #[serde(default)]
    pub materials: Vec<String>,

    /// Whether the listing renews automatically at expiry.
    #[serde(default)]
    pub should_auto_renew: bool,

    /// The shop section the listing belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_section_id: Option<u64>,

    /// Listing state (e.g. "active").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Listing {
    /// Returns the view count, treating an absent field as zero.
    ///
    /// Used by the statistics ranking, which sorts on views.
    #[must_use]
    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(0)
    }

    /// Returns `true` if the listing belongs to the given shop section.
    #[must_use]
    pub fn in_section(&self, section_id: u64) -> bool {
        self.shop_section_id == Some(section_id)
    }

    /// Returns `true` if the title contains the search text,
    /// case-insensitively.
    #[must_use]
    pub fn title_matches(&self, search: &str) -> bool {
        self.title.to_lowercase().contains(&search.to_lowercase())
    }
}
