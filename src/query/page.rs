//! Pagination engine -- bounded result windows and navigation metadata.

use serde::{Deserialize, Serialize};

/// Navigation metadata for one page of a result set. Matches the shape the
/// feed returns alongside incident lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    /// The 1-indexed inclusive range of rows this page displays, or `None`
    /// for an empty result set (rendered as a single empty page).
    pub fn display_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let start = (self.page - 1) * self.per_page + 1;
        let end = (self.page * self.per_page).min(self.total);
        Some((start, end))
    }
}

/// Compute page metadata for a result set of `total` rows.
///
/// `page` is 1-indexed; out-of-range requests are clamped rather than
/// rejected, so the window is always valid. A zero total keeps
/// `total_pages == 0` in the metadata but clamps the page to 1 so callers
/// render one empty page.
pub fn paginate(total: u64, page: u64, per_page: u64) -> PageMeta {
    let per_page = per_page.max(1);
    let total_pages = total.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    PageMeta {
        page,
        per_page,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}
