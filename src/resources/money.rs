//! Money amounts as the upstream API represents them.

use serde::{Deserialize, Serialize};

/// A money amount in Etsy's amount/divisor representation.
///
/// The upstream API transmits prices and totals as an integer `amount`
/// with a `divisor` (typically 100), avoiding floats on the wire.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::resources::Money;
///
/// let total = Money {
///     amount: 1999,
///     divisor: 100,
///     currency_code: "USD".to_string(),
/// };
/// assert_eq!(total.display(), "19.99");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Money {
    /// The amount in the currency's smallest unit times the divisor.
    pub amount: i64,
    /// The divisor to apply to `amount` (defaults to 100 when absent).
    #[serde(default = "default_divisor")]
    pub divisor: i64,
    /// The three-letter ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: String,
}

const fn default_divisor() -> i64 {
    100
}

impl Money {
    /// Formats the amount as a fixed two-decimal string, the way the
    /// dashboard tables render totals.
    #[must_use]
    pub fn display(&self) -> String {
        let divisor = if self.divisor == 0 { 100 } else { self.divisor };
        #[allow(clippy::cast_precision_loss)]
        let value = self.amount as f64 / divisor as f64;
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_divides_by_divisor() {
        let money = Money {
            amount: 1999,
            divisor: 100,
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.display(), "19.99");
    }

    #[test]
    fn test_display_with_zero_divisor_falls_back_to_100() {
        let money = Money {
            amount: 500,
            divisor: 0,
            currency_code: "EUR".to_string(),
        };
        assert_eq!(money.display(), "5.00");
    }

    #[test]
    fn test_deserialize_defaults_divisor() {
        let money: Money = serde_json::from_value(json!({"amount": 250})).unwrap();
        assert_eq!(money.divisor, 100);
        assert_eq!(money.display(), "2.50");
    }

    #[test]
    fn test_deserialize_full_payload() {
        let money: Money = serde_json::from_value(json!({
            "amount": 123456,
            "divisor": 100,
            "currency_code": "GBP"
        }))
        .unwrap();
        assert_eq!(money.currency_code, "GBP");
        assert_eq!(money.display(), "1234.56");
    }
}
