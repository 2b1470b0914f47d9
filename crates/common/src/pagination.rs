use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// One-based page request. Absent values take the list defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Returns `(zero_based_page, clamped_page_size)` ready for the paginator.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(DEFAULT_PAGE);
        let page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        (page - 1, page_size)
    }
}

/// Page payload inside the result envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub pages: u64,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_page_of_ten() {
        let (page, size) = Pagination::new(None, None).normalize();
        assert_eq!((page, size), (0, 10));
    }

    #[test]
    fn zero_values_are_repaired() {
        let (page, size) = Pagination::new(Some(0), Some(0)).normalize();
        assert_eq!((page, size), (0, 1));
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let (_, size) = Pagination::new(Some(3), Some(10_000)).normalize();
        assert_eq!(size, MAX_PAGE_SIZE);
    }
}
