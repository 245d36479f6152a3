use serde::Serialize;

/// Page size used by listing services.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// One page of items together with navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_items: usize, per_page: usize) -> Self {
        Self {
            items,
            page,
            total_pages: total_items.div_ceil(per_page.max(1)),
            total_items,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
