//! In-memory page source for testing

use crate::error::{ClientError, ClientResult};
use crate::source::PageSource;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Url;
use sportdesk_core::PageResponse;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum MockReply {
    Page(PageResponse),
    Status(u16),
    Malformed(String),
}

/// Page source serving canned pages keyed by URL
///
/// Every fetch is recorded so tests can assert order and count. Unknown URLs
/// answer with status 404.
#[derive(Debug, Clone, Default)]
pub struct MockPageSource {
    replies: HashMap<String, MockReply>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockPageSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` at `url`
    #[must_use]
    pub fn with_page(mut self, url: &str, page: PageResponse) -> Self {
        self.replies.insert(normalize(url), MockReply::Page(page));
        self
    }

    /// Answer `url` with an HTTP error status
    #[must_use]
    pub fn with_failure(mut self, url: &str, status: u16) -> Self {
        self.replies.insert(normalize(url), MockReply::Status(status));
        self
    }

    /// Answer `url` with a body that does not parse
    #[must_use]
    pub fn with_malformed(mut self, url: &str, message: impl Into<String>) -> Self {
        self.replies
            .insert(normalize(url), MockReply::Malformed(message.into()));
        self
    }

    /// URLs fetched so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of fetches so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), String::from)
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, url: &Url) -> ClientResult<PageResponse> {
        self.requests.lock().push(url.to_string());

        match self.replies.get(url.as_str()) {
            Some(MockReply::Page(page)) => Ok(page.clone()),
            Some(MockReply::Status(status)) => {
                Err(ClientError::unexpected_status(url.as_str(), *status))
            }
            Some(MockReply::Malformed(message)) => {
                Err(ClientError::malformed(url.as_str(), message.clone()))
            }
            None => Err(ClientError::unexpected_status(url.as_str(), 404)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sportdesk_core::Item;

    #[tokio::test]
    async fn test_mock_serves_and_records() {
        let source = MockPageSource::new()
            .with_page("http://api.test/users/", PageResponse::last(vec![Item::new(1)]))
            .with_malformed("http://api.test/bad/", "expected value");

        let users = Url::parse("http://api.test/users/").unwrap();
        let bad = Url::parse("http://api.test/bad/").unwrap();
        let missing = Url::parse("http://api.test/missing/").unwrap();

        assert_eq!(source.fetch_page(&users).await.unwrap().results.len(), 1);
        assert!(matches!(
            source.fetch_page(&bad).await,
            Err(ClientError::MalformedResponse { .. })
        ));
        assert!(matches!(
            source.fetch_page(&missing).await,
            Err(ClientError::UnexpectedStatus { status: 404, .. })
        ));
        assert_eq!(source.request_count(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_request_log() {
        let source = MockPageSource::new()
            .with_page("http://api.test/users/", PageResponse::last(Vec::new()));
        let clone = source.clone();

        let url = Url::parse("http://api.test/users/").unwrap();
        clone.fetch_page(&url).await.unwrap();

        assert_eq!(source.requests(), vec!["http://api.test/users/".to_string()]);
    }
}
