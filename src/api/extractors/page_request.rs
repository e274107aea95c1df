//! Pagination extractor that also knows how to link neighbouring pages.

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};

use crate::errors::AppError;
use crate::types::{Page, PaginationParams};

/// `page` / `page_size` from the query string plus the request path, so
/// `next` and `previous` links keep every other query parameter.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub params: PaginationParams,
    path: String,
    /// Raw `key=value` pairs other than `page`
    other_pairs: Vec<String>,
}

impl PageRequest {
    fn new(path: &str, query: Option<&str>) -> Result<Self, AppError> {
        let mut page = None;
        let mut page_size = None;
        let mut other_pairs = Vec::new();

        for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "page" => page = Some(value),
                "page_size" => {
                    page_size = Some(value);
                    other_pairs.push(pair.to_string());
                }
                _ => other_pairs.push(pair.to_string()),
            }
        }

        Ok(Self {
            params: PaginationParams::parse(page, page_size)?,
            path: path.to_string(),
            other_pairs,
        })
    }

    /// Link to `page`; page 1 drops the parameter entirely.
    fn link(&self, page: u64) -> String {
        let mut pairs = self.other_pairs.clone();
        if page > 1 {
            pairs.push(format!("page={}", page));
        }

        if pairs.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, pairs.join("&"))
        }
    }

    /// Wrap one page of results in the response envelope.
    pub fn page<T>(&self, results: Vec<T>, total: u64) -> Page<T> {
        let params = self.params;
        Page {
            count: total,
            next: params.has_next(total).then(|| self.link(params.page + 1)),
            previous: params.has_previous().then(|| self.link(params.page - 1)),
            results,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());

        Self::new(uri.path(), uri.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_preserve_other_parameters() {
        let request = PageRequest::new("/movies", Some("page=2&page_size=1&q=war")).unwrap();
        let page = request.page(vec!["b"], 3);

        assert_eq!(page.count, 3);
        assert_eq!(page.next.as_deref(), Some("/movies?page_size=1&q=war&page=3"));
        assert_eq!(page.previous.as_deref(), Some("/movies?page_size=1&q=war"));
    }

    #[test]
    fn test_single_page_has_no_links() {
        let request = PageRequest::new("/genres", None).unwrap();
        let page = request.page(vec![1, 2], 2);

        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_invalid_page_rejected() {
        assert!(matches!(
            PageRequest::new("/genres", Some("page=zero")),
            Err(AppError::InvalidPage)
        ));
    }
}
