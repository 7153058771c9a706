//! Extract the 1-indexed `page` query parameter.

use crate::pagination::parse_page;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// `?page=N`; absent or non-integer values fall back to page 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(p)| p)
            .unwrap_or_default();
        Ok(Page(parse_page(params.get("page").map(String::as_str))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn page_of(uri: &str) -> i64 {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Page::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn reads_page_parameter() {
        assert_eq!(page_of("/questions?page=3").await, 3);
        assert_eq!(page_of("/questions?foo=1&page=2").await, 2);
    }

    #[tokio::test]
    async fn defaults_to_first_page() {
        assert_eq!(page_of("/questions").await, 1);
        assert_eq!(page_of("/questions?page=two").await, 1);
    }
}
