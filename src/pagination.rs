//! Page windows over an ordered record sequence.

use serde::Serialize;

/// Page size used when a caller omits `limit` or sends a non-positive one.
pub const DEFAULT_LIMIT: u32 = 10;

/// A normalized `(page, limit)` request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Clamp `page` to at least 1 and substitute [`DEFAULT_LIMIT`] for a
    /// non-positive `limit`. Proto3 sends `0` for unset integers, so a zero
    /// on the wire means "use the default".
    pub fn new(page: i64, limit: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            u32::try_from(limit).unwrap_or(u32::MAX)
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records skipped before this page starts.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_LIMIT))
    }
}

/// One window of results plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slice `items` to the requested window. `total` always reflects the full
/// input length, even when the window falls past the end.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(request.limit() as usize)
        .collect();
    Page { items, total }
}
