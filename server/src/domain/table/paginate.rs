//! Page window slicing

use super::Record;

/// One page of a filtered collection plus the filtered total.
#[derive(Debug)]
pub struct Page {
    pub items: Vec<Record>,
    /// Count of the filtered-but-unpaginated set.
    pub total: usize,
}

/// Slice the window `[(page-1)*size, +size)` out of `items`.
///
/// A page beyond the end yields an empty slice; `total` is always the full
/// filtered count.
pub fn paginate(mut items: Vec<Record>, page: usize, size: usize) -> Page {
    let total = items.len();
    let start = page.saturating_sub(1).saturating_mul(size);
    let items = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(size).min(total);
        items.drain(start..end).collect()
    };
    Page { items, total }
}
