//! Fixed-size pagination over a result list.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Zero-based index of this page, always `< page_count` unless the list is empty.
    pub index: usize,
    pub page_count: usize,
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            index: self.index,
            page_count: self.page_count,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Human-facing "Page 2/3" label.
    pub fn label(&self) -> String {
        format!("Page {}/{}", self.index + 1, self.page_count.max(1))
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Slice `items` into page `index`. An index past the end is clamped to the last page.
pub fn paginate<T: Clone>(items: &[T], index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let pages = page_count(items.len(), page_size);
    let index = index.min(pages.saturating_sub(1));
    let start = index * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        index,
        page_count: pages,
        total: items.len(),
        items: items[start..end].to_vec(),
    }
}
