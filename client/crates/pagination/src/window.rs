//! Page window arithmetic over a collection of known length.

use std::ops::Range;

use serde::Serialize;

use crate::PageSize;

/// Pagination view over `total_items` rows split into pages of `page_size`.
///
/// Requested page indices are 0-based and may be stale (larger than the
/// current last page); every accessor clamps them instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    total_items: usize,
    page_size: PageSize,
}

impl PageWindow {
    /// Build a window over `total_items` rows.
    #[must_use]
    pub const fn new(total_items: usize, page_size: PageSize) -> Self {
        Self {
            total_items,
            page_size,
        }
    }

    /// Number of pages; zero when there are no rows.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size.get())
    }

    /// Index of the last valid page, or `None` when there are no pages.
    #[must_use]
    pub const fn last_index(&self) -> Option<usize> {
        self.total_pages().checked_sub(1)
    }

    /// Clamp a requested index into `[0, total_pages - 1]` (zero when empty).
    #[must_use]
    pub fn effective_index(&self, requested: usize) -> usize {
        self.last_index().map_or(0, |last| requested.min(last))
    }

    /// 1-based page number for display; zero when there are no pages.
    #[must_use]
    pub fn current_page(&self, requested: usize) -> usize {
        if self.total_pages() == 0 {
            0
        } else {
            self.effective_index(requested).saturating_add(1)
        }
    }

    /// Whether a page exists after the effective page.
    #[must_use]
    pub fn has_next(&self, requested: usize) -> bool {
        self.last_index()
            .is_some_and(|last| self.effective_index(requested) < last)
    }

    /// Whether a page exists before the effective page.
    #[must_use]
    pub fn has_previous(&self, requested: usize) -> bool {
        self.effective_index(requested) > 0
    }

    /// Row range visible for the requested page.
    ///
    /// The range is empty when the window holds no rows.
    #[must_use]
    pub fn range(&self, requested: usize) -> Range<usize> {
        let start = self
            .effective_index(requested)
            .saturating_mul(self.page_size.get())
            .min(self.total_items);
        let end = start
            .saturating_add(self.page_size.get())
            .min(self.total_items);
        start..end
    }

    /// Borrow the rows visible for the requested page.
    ///
    /// `items` is expected to hold `total_items` rows; a shorter slice yields
    /// an empty page rather than panicking.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T], requested: usize) -> &'a [T] {
        items.get(self.range(requested)).unwrap_or_default()
    }

    /// Summarise the requested page for rendering.
    #[must_use]
    pub fn summary(&self, requested: usize) -> PageSummary {
        PageSummary {
            current_page: self.current_page(requested),
            total_pages: self.total_pages(),
            total_results: self.total_items,
            page_size: self.page_size.get(),
        }
    }
}

/// Counters describing one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// 1-based page number, zero when there are no results.
    pub current_page: usize,
    /// Number of pages for the current result set.
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total_results: usize,
    /// Rows per page.
    pub page_size: usize,
}
