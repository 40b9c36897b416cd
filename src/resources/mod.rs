//! Upstream resource models.
//!
//! Thin typed views over the upstream JSON: only the fields the dashboard
//! reads or mutates are modeled, and unknown fields are ignored so the
//! crate tolerates additive upstream changes.

mod listing;
mod money;
mod receipt;
mod shop;

pub use listing::Listing;
pub use money::Money;
pub use receipt::{OrderStatusFilter, Receipt};
pub use shop::{ResourceList, Shop};
