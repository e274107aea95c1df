//! Page-number pagination for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::admin::{AdminFavoriteRow, AdminMovieRow};
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::{FavoriteResponse, Genre, MovieResponse, RatingResponse, UserResponse};
use crate::errors::{AppError, AppResult};

/// Requested page (1-indexed) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub page_size: u64,
}

impl PaginationParams {
    /// Parse raw `page` / `page_size` query values.
    ///
    /// A page that is not a positive integer is an invalid page. A page size
    /// that does not parse or is zero falls back to the default; larger
    /// sizes are capped at [`MAX_PAGE_SIZE`].
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> AppResult<Self> {
        let page = match page {
            None | Some("") => DEFAULT_PAGE_NUMBER,
            Some(raw) => match raw.parse::<u64>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(AppError::InvalidPage),
            },
        };

        let page_size = page_size
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .map(|n| n.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Ok(Self { page, page_size })
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-based page index, as SeaORM paginators expect
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Number of pages for `total` items; an empty set still has one page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit()).max(1)
    }

    /// Reject pages past the end of the result set.
    pub fn ensure_page_exists(&self, total: u64) -> AppResult<()> {
        if self.page > self.num_pages(total) {
            return Err(AppError::InvalidPage);
        }
        Ok(())
    }

    pub fn has_next(&self, total: u64) -> bool {
        self.page < self.num_pages(total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[aliases(
    UserPage = Page<UserResponse>,
    GenrePage = Page<Genre>,
    MoviePage = Page<MovieResponse>,
    FavoritePage = Page<FavoriteResponse>,
    RatingPage = Page<RatingResponse>,
    AdminMoviePage = Page<AdminMovieRow>,
    AdminFavoritePage = Page<AdminFavoriteRow>
)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Convert the items while keeping counts and links.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::parse(None, None).unwrap();
        assert_eq!(params, PaginationParams::default());
        assert_eq!(params.page_index(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_page_size_capped_and_defaulted() {
        assert_eq!(PaginationParams::parse(None, Some("500")).unwrap().page_size, 100);
        assert_eq!(PaginationParams::parse(None, Some("0")).unwrap().page_size, 10);
        assert_eq!(PaginationParams::parse(None, Some("abc")).unwrap().page_size, 10);
    }

    #[test]
    fn test_bad_page_is_invalid() {
        assert!(matches!(
            PaginationParams::parse(Some("0"), None),
            Err(AppError::InvalidPage)
        ));
        assert!(matches!(
            PaginationParams::parse(Some("two"), None),
            Err(AppError::InvalidPage)
        ));
    }

    #[test]
    fn test_page_bounds() {
        let params = PaginationParams::parse(Some("3"), Some("10")).unwrap();
        assert_eq!(params.page_index(), 2);
        assert!(params.ensure_page_exists(21).is_ok());
        assert!(params.ensure_page_exists(20).is_err());
        assert!(!params.has_next(30));
        assert!(params.has_next(31));

        let first = PaginationParams::default();
        assert!(first.ensure_page_exists(0).is_ok());
        assert!(!first.has_previous());
    }
}
