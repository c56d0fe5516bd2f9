//! Dashboard controller tying a loader to a listing view
//!
//! Load runs and local interactions both write the same [`ListingView`].
//! Runs are never cancelled: whichever run finishes last decides what the
//! view shows. The lock is only held for the synchronous state transitions,
//! never across a fetch.

use crate::listing::ListingKind;
use crate::view::{ListingView, LoadStatus};
use parking_lot::RwLock;
use sportdesk_client::{ApiClient, ClientError, ClientResult, CollectionLoader, PageSource};
use sportdesk_core::config::{Config, ResourceConfig};
use sportdesk_core::{Collection, Item, ItemId};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// What happens upstream after a confirmed delete
#[derive(Debug, Clone, Default)]
pub enum DeletePolicy {
    /// Only the in-memory collection changes
    #[default]
    LocalOnly,
    /// Also send a DELETE to the API
    Remote {
        /// Client used for the DELETE
        client: ApiClient,
        /// Resource whose `delete_path` names the item endpoint
        resource: ResourceConfig,
    },
}

/// One listing page: its loader, its start URL and its view state
#[derive(Debug)]
pub struct Dashboard<S> {
    kind: ListingKind,
    start_url: String,
    loader: CollectionLoader<S>,
    view: Arc<RwLock<ListingView>>,
    delete_policy: DeletePolicy,
}

impl Dashboard<ApiClient> {
    /// Build a dashboard for `kind` against the configured API
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL or the resource path is invalid.
    pub fn from_config(kind: ListingKind, config: &Config) -> ClientResult<Self> {
        let client = ApiClient::from_config(&config.api)?;
        let resource = kind.resource(config);
        let start_url = client.resolve(&resource.path)?.to_string();

        let delete_policy = if config.listing.persist_deletes && resource.delete_path.is_some() {
            DeletePolicy::Remote {
                client: client.clone(),
                resource: resource.clone(),
            }
        } else {
            DeletePolicy::LocalOnly
        };

        let loader = CollectionLoader::with_config(client, &config.loader);
        Ok(Self::new(kind, loader, start_url).with_delete_policy(delete_policy))
    }
}

impl<S: PageSource> Dashboard<S> {
    /// Create a dashboard over any page source
    pub fn new(kind: ListingKind, loader: CollectionLoader<S>, start_url: impl Into<String>) -> Self {
        Self {
            kind,
            start_url: start_url.into(),
            loader,
            view: Arc::new(RwLock::new(ListingView::new(kind))),
            delete_policy: DeletePolicy::LocalOnly,
        }
    }

    /// Choose what a confirmed delete does upstream
    #[must_use]
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Listing shown by this dashboard
    pub const fn kind(&self) -> ListingKind {
        self.kind
    }

    /// URL of the first page
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Shared handle to the view state
    pub fn view(&self) -> Arc<RwLock<ListingView>> {
        Arc::clone(&self.view)
    }

    /// Copy of the current collection
    pub fn snapshot(&self) -> Collection {
        self.view.read().collection().clone()
    }

    /// Current load status
    pub fn status(&self) -> LoadStatus {
        self.view.read().status().clone()
    }

    /// Run one load and apply its outcome to the view
    ///
    /// On failure the previous collection stays in place and the error is
    /// both recorded on the view and returned.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when the run aborts.
    #[instrument(skip(self), fields(listing = %self.kind))]
    pub async fn refresh(&self) -> ClientResult<usize> {
        self.view.write().begin_load();

        match self.loader.load(&self.start_url).await {
            Ok(collection) => {
                let items = collection.len();
                self.view.write().apply_load::<ClientError>(Ok(collection));
                info!(items, "Listing refreshed");
                Ok(items)
            }
            Err(e) => {
                self.view.write().apply_load(Err(&e));
                Err(e)
            }
        }
    }

    /// Open the details dialog for the item with `id`
    ///
    /// Returns false if no such item is loaded.
    pub fn view_item(&self, id: &ItemId) -> bool {
        let mut view = self.view.write();
        let Some(item) = view.collection().get(id).cloned() else {
            return false;
        };
        view.view_requested(item);
        true
    }

    /// Open the details dialog for `item`
    pub fn view_requested(&self, item: Item) {
        self.view.write().view_requested(item);
    }

    /// Close the details dialog
    pub fn close_details(&self) {
        self.view.write().close_details();
    }

    /// Ask for confirmation before deleting `id`
    pub fn delete_requested(&self, id: ItemId) {
        self.view.write().delete_requested(id);
    }

    /// Dismiss the delete confirmation
    pub fn delete_cancelled(&self) {
        self.view.write().delete_cancelled();
    }

    /// Confirm the pending delete
    ///
    /// The item leaves the local collection immediately. With a remote delete
    /// policy a DELETE follows; if it fails the failure is logged and recorded
    /// on the view, and the local removal stands.
    pub async fn delete_confirmed(&self) -> Option<Item> {
        let removed = self.view.write().delete_confirmed()?;

        if let DeletePolicy::Remote { client, resource } = &self.delete_policy
            && let Some(path) = resource.delete_path_for(&removed.id)
        {
            let result = match client.resolve(&path) {
                Ok(url) => client.delete_item(&url).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                error!(listing = %self.kind, id = %removed.id, error = %e, "Upstream delete failed");
                self.view
                    .write()
                    .record_error(format!("Failed to delete {} {}: {e}", self.kind.noun(), removed.id));
            } else {
                info!(listing = %self.kind, id = %removed.id, "Deleted upstream");
            }
        }

        Some(removed)
    }
}
