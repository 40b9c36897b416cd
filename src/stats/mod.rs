//! Listing view statistics.
//!
//! Ranks the shop's active listings by lifetime view count. The ranking
//! needs the whole collection, so it reuses the full-scan aggregator with
//! no filter, then sorts locally.

use crate::clients::{ApiClient, ApiError};
use crate::pagination::{fetch_all, ScanPolicy};
use crate::resources::Listing;

/// Number of listings reported on each end of the ranking.
pub const STATS_RANK_SIZE: usize = 20;

/// The most- and least-viewed listings of a shop.
///
/// Each side holds at most [`STATS_RANK_SIZE`] listings; a shop with fewer
/// listings appears in full on both sides. Ties in view count keep the
/// upstream order.
#[derive(Clone, Debug, Default)]
pub struct ListingStats {
    /// Listings ranked by descending view count.
    pub most_viewed: Vec<Listing>,
    /// Listings ranked by ascending view count.
    pub least_viewed: Vec<Listing>,
}

/// Computes the view-count ranking for a shop's active listings.
///
/// Scans the full listing collection, sorts a copy each way, and truncates
/// to the rank size. Missing view counts rank as zero.
///
/// # Errors
///
/// Returns [`ApiError`] when the underlying scan fails.
pub async fn listing_stats(
    client: &ApiClient,
    shop_id: u64,
    policy: &ScanPolicy,
) -> Result<ListingStats, ApiError> {
    let path = format!("application/shops/{shop_id}/listings/active");
    let listings: Vec<Listing> = fetch_all(client, &path, &[], policy).await?;
    Ok(rank(listings))
}

fn rank(listings: Vec<Listing>) -> ListingStats {
    let mut most_viewed = listings.clone();
    most_viewed.sort_by(|a, b| b.view_count().cmp(&a.view_count()));
    most_viewed.truncate(STATS_RANK_SIZE);

    let mut least_viewed = listings;
    least_viewed.sort_by(|a, b| a.view_count().cmp(&b.view_count()));
    least_viewed.truncate(STATS_RANK_SIZE);

    ListingStats {
        most_viewed,
        least_viewed,
    }
}
