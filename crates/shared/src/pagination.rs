//! Page-number pagination for listings and dashboard tables.

use serde::Serialize;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageSlice<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `total_items`; zero when there is nothing to show.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    }
}

/// Cuts page `page` (1-based) out of `items`.
///
/// A page outside `1..=total_pages` falls back to page 1, so a listing whose
/// filter shrank never shows an empty page past the end.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageSlice<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, per_page);
    let page = if page == 0 || page > total_pages { 1 } else { page };

    let items = if per_page == 0 {
        Vec::new()
    } else {
        items
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect()
    };

    PageSlice {
        items,
        page,
        total_pages,
        total_items,
    }
}
