//! Receipt (order) resource and the order status filter.
//!
//! "Receipt" is the upstream term for a customer order. Receipts are
//! read-only here; the dashboard lists and paginates them but never
//! mutates one.

use serde::{Deserialize, Serialize};

use crate::resources::Money;

/// An Etsy receipt: one customer order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// The unique identifier of the receipt.
    pub receipt_id: u64,

    /// The buyer's name, when shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The buyer's numeric user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_user_id: Option<u64>,

    /// Total item count as reported upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,

    /// Line-item transactions, when the endpoint includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<serde_json::Value>>,

    /// Order grand total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandtotal: Option<Money>,

    /// Upstream status string (e.g. "Paid", "Completed").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Creation time as a unix timestamp in seconds.
    #[serde(default)]
    pub created_timestamp: i64,

    /// Whether payment has been received.
    #[serde(default)]
    pub was_paid: bool,

    /// Whether the order has shipped.
    #[serde(default)]
    pub was_shipped: bool,
}

impl Receipt {
    /// Returns a customer label for table rendering: the buyer's name,
    /// falling back to their user id.
    #[must_use]
    pub fn customer_label(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.buyer_user_id
                .map_or_else(|| "Unknown buyer".to_string(), |id| format!("Buyer User ID: {id}"))
        })
    }

    /// Returns the item count: the transaction list length when included,
    /// falling back to the upstream `total_items` field.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.transactions
            .as_ref()
            .map_or_else(|| self.total_items.unwrap_or(0), |t| t.len() as u64)
    }
}

/// The order list's status filter.
///
/// Parses case-insensitively from the `status` query parameter; anything
/// unrecognized falls back to `All`. Each variant maps to the upstream
/// boolean-flag query parameters and to the matching local predicate
/// (applied to the fetched page as a second line of defense, since the
/// upstream filters are the only ones whose counts are reliable).
///
/// Pending means unpaid — the current semantics, superseding an earlier
/// draft that defined pending as paid-but-unshipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderStatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Unpaid orders (`was_paid=false`).
    Pending,
    /// Paid but unshipped orders (`was_paid=true&was_shipped=false`).
    Processing,
    /// Shipped orders (`was_shipped=true`).
    Shipped,
}

impl OrderStatusFilter {
    /// Parses the filter from the raw query value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            _ => Self::All,
        }
    }

    /// Returns the upstream query parameters for this filter.
    #[must_use]
    pub fn query_params(self) -> Vec<(&'static str, String)> {
        match self {
            Self::All => Vec::new(),
            Self::Pending => vec![("was_paid", "false".to_string())],
            Self::Processing => vec![
                ("was_paid", "true".to_string()),
                ("was_shipped", "false".to_string()),
            ],
            Self::Shipped => vec![("was_shipped", "true".to_string())],
        }
    }

    /// Returns `true` if the receipt matches this filter.
    #[must_use]
    pub const fn matches(self, receipt: &Receipt) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !receipt.was_paid,
            Self::Processing => receipt.was_paid && !receipt.was_shipped,
            Self::Shipped => receipt.was_shipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn receipt(was_paid: bool, was_shipped: bool) -> Receipt {
        serde_json::from_value(json!({
            "receipt_id": 900,
            "was_paid": was_paid,
            "was_shipped": was_shipped,
        }))
        .unwrap()
    }

    #[test]
    fn test_customer_label_prefers_name() {
        let receipt: Receipt = serde_json::from_value(json!({
            "receipt_id": 1,
            "name": "Alex Craft",
            "buyer_user_id": 555
        }))
        .unwrap();
        assert_eq!(receipt.customer_label(), "Alex Craft");
    }

    #[test]
    fn test_customer_label_falls_back_to_buyer_id() {
        let receipt: Receipt =
            serde_json::from_value(json!({"receipt_id": 1, "buyer_user_id": 555})).unwrap();
        assert_eq!(receipt.customer_label(), "Buyer User ID: 555");
    }

    #[test]
    fn test_item_count_prefers_transactions() {
        let receipt: Receipt = serde_json::from_value(json!({
            "receipt_id": 1,
            "total_items": 9,
            "transactions": [{}, {}, {}]
        }))
        .unwrap();
        assert_eq!(receipt.item_count(), 3);

        let receipt: Receipt =
            serde_json::from_value(json!({"receipt_id": 1, "total_items": 9})).unwrap();
        assert_eq!(receipt.item_count(), 9);
    }

    #[test]
    fn test_filter_parse_is_case_insensitive_with_all_fallback() {
        assert_eq!(OrderStatusFilter::parse("Pending"), OrderStatusFilter::Pending);
        assert_eq!(OrderStatusFilter::parse("SHIPPED"), OrderStatusFilter::Shipped);
        assert_eq!(OrderStatusFilter::parse("processing"), OrderStatusFilter::Processing);
        assert_eq!(OrderStatusFilter::parse("all"), OrderStatusFilter::All);
        assert_eq!(OrderStatusFilter::parse("bogus"), OrderStatusFilter::All);
    }

    #[test]
    fn test_filter_query_params() {
        assert!(OrderStatusFilter::All.query_params().is_empty());
        assert_eq!(
            OrderStatusFilter::Pending.query_params(),
            vec![("was_paid", "false".to_string())]
        );
        assert_eq!(
            OrderStatusFilter::Processing.query_params(),
            vec![
                ("was_paid", "true".to_string()),
                ("was_shipped", "false".to_string())
            ]
        );
        assert_eq!(
            OrderStatusFilter::Shipped.query_params(),
            vec![("was_shipped", "true".to_string())]
        );
    }

    #[test]
    fn test_filter_predicates_match_flag_combinations() {
        let unpaid = receipt(false, false);
        let paid = receipt(true, false);
        let shipped = receipt(true, true);

        assert!(OrderStatusFilter::Pending.matches(&unpaid));
        assert!(!OrderStatusFilter::Pending.matches(&paid));

        assert!(OrderStatusFilter::Processing.matches(&paid));
        assert!(!OrderStatusFilter::Processing.matches(&shipped));
        assert!(!OrderStatusFilter::Processing.matches(&unpaid));

        assert!(OrderStatusFilter::Shipped.matches(&shipped));
        assert!(!OrderStatusFilter::Shipped.matches(&paid));

        assert!(OrderStatusFilter::All.matches(&unpaid));
        assert!(OrderStatusFilter::All.matches(&shipped));
    }
}
