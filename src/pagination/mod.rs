//! Paginated aggregation over the upstream list endpoints.
//!
//! Two strategies exist because the upstream `count` field is only
//! trustworthy for some queries:
//!
//! - **Direct** ([`fetch_page`]): one request at the requested offset,
//!   trusting the reported count for the window. Used for order lists,
//!   whose boolean-flag filters report accurate totals.
//! - **Full scan** ([`fetch_all`] + [`paginate_filtered`]): walk the whole
//!   collection at the upstream maximum page size, filter locally, and
//!   window over the filtered set. Used for listing views, where keyword
//!   and category totals are unreliable.
//!
//! Either way the window arithmetic is the pure [`PageWindow::compute`],
//! and an out-of-range page request clamps instead of erroring.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::clients::{ApiClient, ApiError};
use crate::resources::{Listing, ResourceList};

/// Upstream hard cap on the `limit` query parameter.
pub const UPSTREAM_MAX_PAGE_SIZE: u64 = 100;

/// Pause between consecutive scan fetches, to stay under the upstream
/// rate limit.
pub const SCAN_DELAY: Duration = Duration::from_millis(250);

/// The computed pagination window for one rendered page.
///
/// `current_page` is the requested page clamped into `[1, total_pages]`;
/// an empty collection still has page 1 as its (empty) current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    /// The page the caller asked for, before clamping.
    pub requested_page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Total items in the (possibly filtered) collection.
    pub total_items: u64,
    /// Total pages, at least 1.
    pub total_pages: u64,
    /// The page actually served.
    pub current_page: u64,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_prev: bool,
}

impl PageWindow {
    /// Computes the window for a page request against a known total.
    ///
    /// A requested page of 0 is treated as 1; a request past the end
    /// clamps to the last page.
    #[must_use]
    pub const fn compute(requested_page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size)
        };

        let mut current_page = if requested_page == 0 { 1 } else { requested_page };
        if current_page > total_pages {
            current_page = total_pages;
        }

        Self {
            requested_page,
            page_size,
            total_items,
            total_pages,
            current_page,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Returns the zero-based item offset of this window's current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }
}

/// One rendered page of items plus its window.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// The items on the served page.
    pub items: Vec<T>,
    /// The window the page was sliced from.
    pub window: PageWindow,
}

/// Tuning knobs for the full-scan strategy.
///
/// Tests inject a zero delay; production uses the defaults.
#[derive(Clone, Copy, Debug)]
pub struct ScanPolicy {
    /// Page size used while scanning, capped by the upstream maximum.
    pub max_page_size: u64,
    /// Pause between consecutive fetches.
    pub delay: Duration,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            max_page_size: UPSTREAM_MAX_PAGE_SIZE,
            delay: SCAN_DELAY,
        }
    }
}

impl ScanPolicy {
    /// A policy with no inter-fetch delay, for tests against local mocks.
    #[must_use]
    pub const fn without_delay() -> Self {
        Self {
            max_page_size: UPSTREAM_MAX_PAGE_SIZE,
            delay: Duration::ZERO,
        }
    }
}

/// Local filter applied to scanned listings.
///
/// Both criteria must hold when both are present. Section match is exact;
/// search matches the title case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct ListingFilter {
    /// Shop section to restrict to.
    pub section_id: Option<u64>,
    /// Title search text.
    pub search: Option<String>,
}

impl ListingFilter {
    /// Returns `true` if a listing passes the filter.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(section_id) = self.section_id {
            if !listing.in_section(section_id) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !listing.title_matches(search) {
                return false;
            }
        }
        true
    }

    /// Returns `true` if no criteria are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.section_id.is_none() && self.search.is_none()
    }
}

/// Fetches one page directly, trusting the upstream-reported count.
///
/// Issues a single request at the requested offset. When the reported
/// total shows the requested page was past the end, the window clamps to
/// the last page and the fetch is retried once at the clamped offset, so
/// the caller never renders an empty page for a nonempty collection.
///
/// # Errors
///
/// Returns [`ApiError`] when a request fails; a failure on the clamped
/// refetch surfaces as-is.
pub async fn fetch_page<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    filter_params: &[(&str, String)],
    requested_page: u64,
    page_size: u64,
) -> Result<Page<T>, ApiError> {
    // Saturate: the page number comes straight from the query string, so
    // an absurd value must degrade to a clamped refetch, not overflow.
    let first_page = if requested_page == 0 { 1 } else { requested_page };
    let first_offset = first_page.saturating_sub(1).saturating_mul(page_size);

    let list: ResourceList<T> =
        fetch_window(client, path, filter_params, page_size, first_offset).await?;

    let window = PageWindow::compute(requested_page, page_size, list.count);
    if window.current_page == first_page {
        return Ok(Page {
            items: list.results,
            window,
        });
    }

    // Requested past the end; one refetch at the clamped page.
    let clamped: ResourceList<T> =
        fetch_window(client, path, filter_params, page_size, window.offset()).await?;
    Ok(Page {
        items: clamped.results,
        window,
    })
}

/// Scans an entire collection at the policy's page size.
///
/// Termination is two-fold: the scan stops as soon as the accumulated
/// item count reaches the first response's reported total, or as soon as
/// any fetch returns a short page (fewer items than requested). The short
/// page check makes an over-reported total harmless; the total check makes
/// an exact-multiple collection finish without a trailing empty fetch. A
/// reported total of zero with an empty first page stops immediately.
///
/// The policy's delay is awaited between consecutive fetches, never after
/// the last one.
///
/// # Errors
///
/// Returns [`ApiError`] on the first failed fetch; partial results are
/// discarded.
pub async fn fetch_all<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    filter_params: &[(&str, String)],
    policy: &ScanPolicy,
) -> Result<Vec<T>, ApiError> {
    let mut items: Vec<T> = Vec::new();
    let mut reported_total: Option<u64> = None;
    let mut offset = 0u64;

    loop {
        if offset > 0 && !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }

        let list: ResourceList<T> =
            fetch_window(client, path, filter_params, policy.max_page_size, offset).await?;

        let fetched = list.results.len() as u64;
        let total = *reported_total.get_or_insert(list.count);
        items.extend(list.results);

        let reached_reported_total = items.len() as u64 >= total;
        let short_page = fetched < policy.max_page_size;
        if reached_reported_total || short_page {
            return Ok(items);
        }

        offset += policy.max_page_size;
    }
}

/// Serves one locally windowed page of listings via a full scan.
///
/// The whole collection is scanned, the filter is applied locally, the
/// window is computed from the true filtered total, and exactly one page
/// is sliced out. The reported upstream count never reaches the window,
/// which is what makes category and keyword pagination honest.
///
/// # Errors
///
/// Returns [`ApiError`] when the underlying scan fails.
pub async fn paginate_filtered(
    client: &ApiClient,
    path: &str,
    filter_params: &[(&str, String)],
    filter: &ListingFilter,
    policy: &ScanPolicy,
    requested_page: u64,
    page_size: u64,
) -> Result<Page<Listing>, ApiError> {
    let all: Vec<Listing> = fetch_all(client, path, filter_params, policy).await?;

    let filtered: Vec<Listing> = if filter.is_empty() {
        all
    } else {
        all.into_iter()
            .filter(|listing| filter.matches(listing))
            .collect()
    };

    let window = PageWindow::compute(requested_page, page_size, filtered.len() as u64);
    let start = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let items = filtered
        .into_iter()
        .skip(start)
        .take(usize::try_from(page_size).unwrap_or(usize::MAX))
        .collect();

    Ok(Page { items, window })
}

async fn fetch_window<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    filter_params: &[(&str, String)],
    limit: u64,
    offset: u64,
) -> Result<ResourceList<T>, ApiError> {
    let mut query: Vec<(&str, String)> = Vec::with_capacity(filter_params.len() + 2);
    query.push(("limit", limit.to_string()));
    query.push(("offset", offset.to_string()));
    query.extend(filter_params.iter().map(|(key, value)| (*key, value.clone())));

    let Some(body) = client.get_with_query(path, &query).await? else {
        return Ok(ResourceList {
            count: 0,
            results: Vec::new(),
        });
    };

    match ResourceList::from_value(body) {
        Ok(list) => Ok(list),
        Err(error) => {
            tracing::warn!("Unrecognized list payload at {path}: {error}");
            Ok(ResourceList {
                count: 0,
                results: Vec::new(),
            })
        }
    }
}
