//! Shop resource and the upstream list envelope.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The seller's shop, as returned by the user-shops endpoint.
///
/// There is a single shop per authenticated user in this dashboard; the
/// shop id scopes every listing and receipt path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shop {
    /// The unique identifier of the shop.
    pub shop_id: u64,

    /// The shop's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
}

impl Shop {
    /// Returns the display name, falling back to `Shop {id}`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.shop_name
            .clone()
            .unwrap_or_else(|| format!("Shop {}", self.shop_id))
    }
}

/// The upstream list envelope: `{ "count": N, "results": [...] }`.
///
/// The `count` field is reliable for the boolean-flag filters but can be
/// filter-scoped or stale for keyword and category queries; the paginated
/// aggregator treats it accordingly and never trusts it past a short page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResourceList<T> {
    /// Upstream-reported total for the query.
    #[serde(default)]
    pub count: u64,
    /// The page of results actually returned.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> ResourceList<T> {
    /// Parses an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error when the body does not
    /// match the envelope shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
