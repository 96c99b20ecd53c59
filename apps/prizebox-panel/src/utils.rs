use serde::Serialize;

pub const PAGE_SIZE: usize = 5;

/// One page of an in-memory list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Slices out the 1-based `page`. Page 0 reads as page 1; a page past the
/// end comes back empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_items = items.len();

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages: total_pages(total_items, page_size),
        total_items,
        page_size,
    }
}

pub fn current_version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}
