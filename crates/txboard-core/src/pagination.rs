//! Pagination state and the visible page-number window

use serde::{Deserialize, Serialize};

/// Default number of page links shown around the current page
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// URL query parameter holding the current page
pub const PAGE_PARAM: &str = "p";

/// Pagination metadata for one fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Current page, 1-based
    pub page: u32,
    /// Records per page
    pub limit: u32,
    /// Total number of records across all pages
    pub total: u64,
    /// Number of pages, `ceil(total / limit)`
    pub total_pages: u32,
}

impl PaginationState {
    /// Build a consistent state; `total_pages` is derived and `page` clamped
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = total_pages(total, limit);
        Self {
            page: page.clamp(1, total_pages.max(1)),
            limit,
            total,
            total_pages,
        }
    }

    /// The state shown before the first fetch and after a failed one
    pub fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            total_pages: 0,
        }
    }

    /// Re-derive `total_pages` and clamp `page` on a state received from the API
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit, self.total)
    }

    /// Check whether `page` is a valid navigation target
    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// There is a page before the current one
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// There is a page after the current one
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first record on this page, 0 when empty
    pub fn first_item(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        (u64::from(self.page) - 1) * u64::from(self.limit) + 1
    }

    /// 1-based index of the last record on this page, 0 when empty
    pub fn last_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }

    /// Visible page-number window around the current page
    pub fn window(&self, max_visible: u32) -> Vec<u32> {
        page_window(self.page, self.total_pages, max_visible)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::empty(10)
    }
}

/// `ceil(total / limit)`, zero when `limit` is zero
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Compute the sliding window of page links around `current`.
///
/// The window is centred on `current` when possible and shifted left when it
/// would run past `total_pages`, so it always holds
/// `min(max_visible, total_pages)` pages. Empty when there are no pages.
pub fn page_window(current: u32, total_pages: u32, max_visible: u32) -> Vec<u32> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = total_pages.min(start.saturating_add(max_visible - 1));

    if end - start + 1 < max_visible {
        start = end.saturating_sub(max_visible - 1).max(1);
    }

    (start..=end).collect()
}

/// Read a page number from a raw query value; anything malformed yields 1
pub fn parse_page_param(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
