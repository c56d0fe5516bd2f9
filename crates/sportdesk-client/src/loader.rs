//! Paginated collection loader
//!
//! Follows `next` cursors from a start URL until the server stops handing one
//! out, concatenating every page's `results` into a single [`Collection`].
//! Pages are fetched strictly one after another. A run either delivers the
//! whole collection or fails without handing back anything.

use crate::error::{ClientError, ClientResult};
use crate::source::{PageSource, parse_start, resolve_next};
use sportdesk_core::Collection;
use sportdesk_core::config::LoaderConfig;
use tracing::{debug, error, info};

/// Loads a complete collection from a [`PageSource`]
#[derive(Debug, Clone)]
pub struct CollectionLoader<S> {
    source: S,
    max_pages: Option<usize>,
}

impl<S: PageSource> CollectionLoader<S> {
    /// Create a loader with no page cap
    pub const fn new(source: S) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    /// Create a loader from configuration
    pub const fn with_config(source: S, config: &LoaderConfig) -> Self {
        Self {
            source,
            max_pages: config.max_pages,
        }
    }

    /// Abort runs that would fetch more than `max_pages` pages
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Fetch every page reachable from `start` and concatenate the results
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is empty or not a URL, if any page fetch or
    /// parse fails, or if the page cap is exceeded. No partial collection is
    /// returned in any of these cases.
    pub async fn load(&self, start: &str) -> ClientResult<Collection> {
        let result = self.run(start).await;
        if let Err(ref e) = result {
            error!(start, error = %e, "Collection load aborted");
        }
        result
    }

    async fn run(&self, start: &str) -> ClientResult<Collection> {
        let mut url = parse_start(start)?;
        let mut collection = Collection::new();
        let mut pages = 0usize;

        loop {
            if let Some(limit) = self.max_pages
                && pages >= limit
            {
                return Err(ClientError::PageLimitExceeded {
                    limit,
                    start: start.to_string(),
                });
            }

            let page = self.source.fetch_page(&url).await?;
            pages += 1;

            debug!(
                url = %url,
                page = pages,
                items = page.results.len(),
                has_next = page.next_cursor().is_some(),
                "Fetched page"
            );

            let next = page
                .next_cursor()
                .map(|cursor| resolve_next(&url, cursor))
                .transpose()?;
            collection.extend_page(page.results);

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        info!(
            start,
            pages,
            items = collection.len(),
            "Collection loaded"
        );
        Ok(collection)
    }
}
