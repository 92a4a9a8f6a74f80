//! Page-boundary detection for category pagination.
//!
//! The buyer API has no pagination header or cursor: the crawler requests
//! numbered pages and the *length* of each response decides whether another
//! page exists. A page holding exactly the requested page size is "full" and
//! the next page is requested; any other length — including zero — is a
//! "short" page and ends the category.

/// Per-category pagination state. Owned exclusively by the category's
/// pagination task; pages are strictly sequential within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub category: String,
    /// 1-based page number of the next request.
    pub page: u32,
}

impl PageCursor {
    /// Cursor for a category's first page.
    #[must_use]
    pub fn first(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            page: 1,
        }
    }

    /// Advances to the next page. Called only after a full page was observed.
    pub fn advance(&mut self) {
        self.page += 1;
    }
}

/// The full/short decision: a page is full iff it holds exactly `page_size`
/// items.
#[must_use]
pub fn page_is_full(item_count: usize, page_size: u32) -> bool {
    item_count == page_size as usize
}
