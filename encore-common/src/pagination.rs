//! List pagination with out-of-range clamping
//!
//! Page requests arrive as raw query-string text. The policy is
//! "clamp, never error": a missing, non-integer, zero or negative page
//! yields page 1; a page past the end yields the last page.

use serde::Serialize;

/// Default number of items per page for artist and venue lists
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a larger sequence, with enough metadata to render controls
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub total: usize,
}

/// Resolve a raw page parameter against the number of available pages.
pub fn clamp_page(requested: Option<&str>, num_pages: usize) -> usize {
    let num_pages = num_pages.max(1);
    match requested.map(str::trim) {
        None | Some("") => 1,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 1 => (n as usize).min(num_pages),
            // Zero, negative, or not an integer: deliver the first page
            _ => 1,
        },
    }
}

/// Slice a full result sequence down to the requested page.
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested: Option<&str>) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let num_pages = (total.max(1) + page_size - 1) / page_size;
    let page = clamp_page(requested, num_pages);

    let start = (page - 1) * page_size;
    let items = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        num_pages,
        total,
    }
}
