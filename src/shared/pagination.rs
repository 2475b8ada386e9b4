//! Pagination Helper
//!
//! Slices an ordered result set into fixed-size pages. Pure and stateless:
//! the caller supplies either a full in-memory sequence or a total count plus
//! an offset/limit fetch against the repository.
//!
//! Page numbers are 1-based. Invalid requests are forgiving by design:
//! a missing, non-numeric, or non-positive page resolves to page 1 and a
//! page past the end is clamped to the last page, so listing endpoints
//! always have *some* page of content to show.

/// A single page of an ordered result set plus paging metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Entities belonging to this page (at most `page_size` of them).
    pub items: Vec<T>,
    /// 1-based page number after clamping.
    pub number: i64,
    /// Total items across all pages.
    pub total_items: i64,
    /// Total page count (ceiling division, at least 1).
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Map the page items while keeping the paging metadata intact.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Fixed-size paginator.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: i64,
}

impl Paginator {
    /// Create a paginator. A page size below 1 is treated as 1.
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Parse a raw page-number query value. Missing or non-numeric input
    /// resolves to page 1.
    pub fn parse_page(raw: Option<&str>) -> i64 {
        raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1)
    }

    /// Total page count for `total_items`. An empty set still has one
    /// (empty) page.
    pub fn total_pages(&self, total_items: i64) -> i64 {
        ((total_items.max(0) + self.page_size - 1) / self.page_size).max(1)
    }

    /// Clamp a requested page number to the valid range `[1, total_pages]`.
    pub fn clamp(&self, requested: i64, total_items: i64) -> i64 {
        requested.max(1).min(self.total_pages(total_items))
    }

    /// Row offset for a (clamped) page number.
    pub fn offset(&self, page: i64) -> i64 {
        (page.max(1) - 1) * self.page_size
    }

    /// Assemble a page from items the caller already fetched with
    /// `offset`/`page_size`. `number` must be the clamped page number.
    pub fn assemble<T>(&self, items: Vec<T>, number: i64, total_items: i64) -> Page<T> {
        Page {
            items,
            number,
            total_items,
            total_pages: self.total_pages(total_items),
        }
    }

    /// Paginate a full in-memory sequence (used by the in-memory
    /// repositories and tests).
    pub fn paginate<T: Clone>(&self, all: &[T], requested: i64) -> Page<T> {
        let total_items = all.len() as i64;
        let number = self.clamp(requested, total_items);
        let start = self.offset(number) as usize;
        let end = (start + self.page_size as usize).min(all.len());
        let items = if start < all.len() {
            all[start..end].to_vec()
        } else {
            Vec::new()
        };
        self.assemble(items, number, total_items)
    }
}
