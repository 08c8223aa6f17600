//! Page-number window for pagination controls.
//!
//! Shows every page within [`WINDOW_RADIUS`] of the current one, anchored by
//! the first and last page, with an ellipsis wherever pages are skipped.
//! Requests for pages outside `1..=pages` are the caller's to reject; the
//! window does not clamp them.

use std::fmt;

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// One control in the page bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl PageItem {
    /// The page a click on this control requests. Ellipses request nothing.
    pub fn target(&self) -> Option<u32> {
        match self {
            PageItem::Page(n) => Some(*n),
            PageItem::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Derived pagination state for one listing response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    pages: u32,
}

impl PageWindow {
    /// `limit` of zero is treated as one.
    pub fn new(page: u32, total: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        Self {
            page,
            pages: total.div_ceil(limit).max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total number of pages, at least 1.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.pages
    }

    /// Page requested by the "previous" control, if it is enabled.
    pub fn previous(&self) -> Option<u32> {
        self.can_go_previous().then(|| self.page - 1)
    }

    /// Page requested by the "next" control, if it is enabled.
    pub fn next(&self) -> Option<u32> {
        self.can_go_next().then(|| self.page + 1)
    }

    /// The controls to display, in order. Empty when the current page lies
    /// entirely outside `1..=pages`.
    pub fn items(&self) -> Vec<PageItem> {
        let lo = self.page.saturating_sub(WINDOW_RADIUS).max(1);
        let hi = self.page.saturating_add(WINDOW_RADIUS).min(self.pages);
        if lo > hi {
            return Vec::new();
        }

        let mut items = Vec::with_capacity((hi - lo + 5) as usize);
        if lo > 1 {
            items.push(PageItem::Page(1));
            if lo > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((lo..=hi).map(PageItem::Page));
        if hi < self.pages {
            if hi < self.pages - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(self.pages));
        }
        items
    }
}
