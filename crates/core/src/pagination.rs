//! Offset pagination helpers and the paginated response envelope.
//!
//! Pages are 1-based at the HTTP boundary and converted to `skip`/`limit`
//! before reaching the repository layer.

use serde::Serialize;

use crate::error::CoreError;

/// Default page size for film and person listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for film and person listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for genre listings.
pub const DEFAULT_GENRE_PAGE_SIZE: i64 = 100;

/// Maximum page size for genre listings.
pub const MAX_GENRE_PAGE_SIZE: i64 = 200;

/// A page of results plus the metadata needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Convert the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// Ceiling division of `total` by `page_size`. Zero when `page_size` is not positive.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Convert a 1-based page number into a row offset.
///
/// Saturates at `i64::MAX`, so a page past the end of any table yields an
/// empty result rather than wrapping back to the first page.
pub fn page_to_skip(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(0))
}

/// Check user-supplied page parameters: `page >= 1` and `1 <= page_size <= max`.
pub fn validate_page_params(page: i64, page_size: i64, max_page_size: i64) -> Result<(), CoreError> {
    if page < 1 {
        return Err(CoreError::Validation(format!(
            "page_number must be at least 1, got {page}"
        )));
    }
    if page_size < 1 || page_size > max_page_size {
        return Err(CoreError::Validation(format!(
            "page_size must be between 1 and {max_page_size}, got {page_size}"
        )));
    }
    Ok(())
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(101, 50), 3);
    }

    #[test]
    fn total_pages_guards_zero_page_size() {
        assert_eq!(total_pages(42, 0), 0);
    }

    #[test]
    fn page_to_skip_is_zero_based() {
        assert_eq!(page_to_skip(1, 50), 0);
        assert_eq!(page_to_skip(3, 50), 100);
        assert_eq!(page_to_skip(0, 50), 0);
    }

    #[test]
    fn page_to_skip_saturates_on_huge_page() {
        assert_eq!(page_to_skip(i64::MAX, 100), i64::MAX);
        assert_eq!(page_to_skip(i64::MAX, 1), i64::MAX - 1);
    }

    #[test]
    fn page_new_fills_metadata() {
        let page = Page::new(vec![1, 2, 3], 7, 1, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 3);

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.total, 7);
        assert_eq!(mapped.total_pages, 3);
    }

    #[test]
    fn validate_page_params_bounds() {
        assert!(validate_page_params(1, 50, 100).is_ok());
        assert!(validate_page_params(1, 100, 100).is_ok());
        assert_matches!(validate_page_params(0, 50, 100), Err(CoreError::Validation(_)));
        assert_matches!(validate_page_params(1, 0, 100), Err(CoreError::Validation(_)));
        assert_matches!(validate_page_params(1, 101, 100), Err(CoreError::Validation(_)));
    }

    #[test]
    fn clamp_helpers() {
        assert_eq!(clamp_limit(None, 10, 50), 10);
        assert_eq!(clamp_limit(Some(500), 10, 50), 50);
        assert_eq!(clamp_limit(Some(0), 10, 50), 1);
    }
}
