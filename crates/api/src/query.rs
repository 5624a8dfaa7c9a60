//! Shared query parameter and request body types for API handlers.

use filmcat_core::error::CoreError;
use filmcat_core::pagination::{page_to_skip, validate_page_params};
use filmcat_core::sorting::DEFAULT_FILM_SORT;
use filmcat_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Page-based pagination parameters (`?page_number=&page_size=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn skip(self) -> i64 {
        page_to_skip(self.page, self.page_size)
    }
}

impl PageParams {
    /// Apply defaults and reject `page_number < 1` or a page size outside
    /// `1..=max_page_size`.
    pub fn resolve(&self, default_page_size: i64, max_page_size: i64) -> Result<PageRequest, CoreError> {
        resolve_page(self.page_number, self.page_size, default_page_size, max_page_size)
    }
}

fn resolve_page(
    page_number: Option<i64>,
    page_size: Option<i64>,
    default_page_size: i64,
    max_page_size: i64,
) -> Result<PageRequest, CoreError> {
    let page = page_number.unwrap_or(1);
    let page_size = page_size.unwrap_or(default_page_size);
    validate_page_params(page, page_size, max_page_size)?;
    Ok(PageRequest { page, page_size })
}

/// Query parameters for `GET /films`.
#[derive(Debug, Deserialize)]
pub struct FilmListQuery {
    #[serde(default = "default_film_sort")]
    pub sort: String,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    /// Genre UUID to filter by.
    pub genre: Option<DbId>,
}

fn default_film_sort() -> String {
    DEFAULT_FILM_SORT.to_string()
}

impl FilmListQuery {
    pub fn resolve(&self, default_page_size: i64, max_page_size: i64) -> Result<PageRequest, CoreError> {
        resolve_page(self.page_number, self.page_size, default_page_size, max_page_size)
    }
}

/// Query parameters for the substring search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl SearchQuery {
    pub fn resolve(&self, default_page_size: i64, max_page_size: i64) -> Result<PageRequest, CoreError> {
        resolve_page(self.page_number, self.page_size, default_page_size, max_page_size)
    }
}

/// Optional `?role=` filter when unlinking a person from a film.
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

/// Body of the `bulk-delete` endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}

/// Response of the `bulk-delete` endpoints.
#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_apply_when_params_missing() {
        let req = PageParams::default().resolve(50, 100).unwrap();
        assert_eq!(req, PageRequest { page: 1, page_size: 50 });
        assert_eq!(req.skip(), 0);
    }

    #[test]
    fn skip_is_derived_from_page() {
        let params = PageParams {
            page_number: Some(3),
            page_size: Some(20),
        };
        assert_eq!(params.resolve(50, 100).unwrap().skip(), 40);
    }

    #[test]
    fn out_of_range_params_are_rejected() {
        let zero_page = PageParams {
            page_number: Some(0),
            page_size: None,
        };
        let too_big = PageParams {
            page_number: None,
            page_size: Some(101),
        };
        assert_matches!(zero_page.resolve(50, 100), Err(CoreError::Validation(_)));
        assert_matches!(too_big.resolve(50, 100), Err(CoreError::Validation(_)));
    }
}
