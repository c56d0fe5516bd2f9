//! Page source seam between the loader and its backends

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Url;
use sportdesk_core::PageResponse;

/// Anything that can hand out one page of a collection
///
/// Implemented by the HTTP client and by the in-memory mock used in tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch and parse the page at `url`
    async fn fetch_page(&self, url: &Url) -> ClientResult<PageResponse>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for std::sync::Arc<S> {
    async fn fetch_page(&self, url: &Url) -> ClientResult<PageResponse> {
        (**self).fetch_page(url).await
    }
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch_page(&self, url: &Url) -> ClientResult<PageResponse> {
        (**self).fetch_page(url).await
    }
}

/// Parse a start URL, rejecting empty input
pub(crate) fn parse_start(start: &str) -> ClientResult<Url> {
    let trimmed = start.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_url(start, "start URL is empty"));
    }
    Url::parse(trimmed).map_err(|e| ClientError::invalid_url(start, e.to_string()))
}

/// Resolve a `next` cursor against the page that produced it
pub(crate) fn resolve_next(current: &Url, next: &str) -> ClientResult<Url> {
    current
        .join(next.trim())
        .map_err(|e| ClientError::invalid_url(next, e.to_string()))
}
