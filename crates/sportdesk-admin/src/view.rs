//! Interaction state of one listing page

use crate::listing::{ItemDetails, ListingKind};
use serde::Serialize;
use sportdesk_core::{Collection, Item, ItemId};
use std::fmt;
use tracing::{debug, warn};

/// Where the listing's data currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing requested yet
    Idle,
    /// A load run is in flight
    Loading,
    /// Last finished run delivered `items` items
    Loaded {
        /// Item count of the delivered collection
        items: usize,
    },
    /// Last finished run failed
    Failed {
        /// Error text
        message: String,
    },
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Loaded { items } => write!(f, "loaded ({items} items)"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Collection plus the dialog state layered on top of it
#[derive(Debug, Clone)]
pub struct ListingView {
    kind: ListingKind,
    collection: Collection,
    selected: Option<Item>,
    pending_delete: Option<ItemId>,
    status: LoadStatus,
    last_error: Option<String>,
}

impl ListingView {
    /// Create an empty view
    pub const fn new(kind: ListingKind) -> Self {
        Self {
            kind,
            collection: Collection::new(),
            selected: None,
            pending_delete: None,
            status: LoadStatus::Idle,
            last_error: None,
        }
    }

    /// Listing this view shows
    pub const fn kind(&self) -> ListingKind {
        self.kind
    }

    /// Current collection
    pub const fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Current load status
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Most recent failure, from a load or an upstream delete
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Item shown in the details dialog
    pub const fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    /// Details dialog content, when open
    pub fn selected_details(&self) -> Option<ItemDetails> {
        self.selected.as_ref().map(|item| self.kind.details(item))
    }

    /// Id awaiting delete confirmation
    pub const fn pending_delete(&self) -> Option<&ItemId> {
        self.pending_delete.as_ref()
    }

    /// Table rows in collection order
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.collection.iter().map(|item| self.kind.row(item)).collect()
    }

    /// Mark a run as started
    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Apply a finished load run
    ///
    /// Success replaces the collection wholesale. Failure keeps whatever was
    /// shown before and records the message.
    pub fn apply_load<E: fmt::Display>(&mut self, result: Result<Collection, E>) {
        match result {
            Ok(collection) => {
                self.status = LoadStatus::Loaded {
                    items: collection.len(),
                };
                self.collection = collection;
                self.last_error = None;
            }
            Err(e) => {
                let message = e.to_string();
                warn!(listing = %self.kind, error = %message, "Keeping previous collection after failed load");
                self.status = LoadStatus::Failed {
                    message: message.clone(),
                };
                self.last_error = Some(message);
            }
        }
    }

    /// Open the details dialog for `item`
    pub fn view_requested(&mut self, item: Item) {
        debug!(listing = %self.kind, id = %item.id, "View requested");
        self.selected = Some(item);
    }

    /// Close the details dialog
    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Open the delete confirmation dialog for `id`
    pub fn delete_requested(&mut self, id: ItemId) {
        debug!(listing = %self.kind, id = %id, "Delete requested");
        self.pending_delete = Some(id);
    }

    /// Confirm the pending delete
    ///
    /// Removes the pending id from the collection and closes the dialog.
    /// Returns the removed item; `None` if nothing was pending or the id is no
    /// longer present.
    pub fn delete_confirmed(&mut self) -> Option<Item> {
        let id = self.pending_delete.take()?;
        let removed = self.collection.remove(&id);

        if removed.is_some() {
            if self.selected.as_ref().is_some_and(|item| item.id == id) {
                self.selected = None;
            }
            if let LoadStatus::Loaded { items } = &mut self.status {
                *items = self.collection.len();
            }
        }

        debug!(listing = %self.kind, id = %id, removed = removed.is_some(), "Delete confirmed");
        removed
    }

    /// Dismiss the delete confirmation dialog
    pub fn delete_cancelled(&mut self) {
        self.pending_delete = None;
    }

    /// Record a failure that did not come from a load
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded(ids: &[i64]) -> ListingView {
        let mut view = ListingView::new(ListingKind::Clubs);
        view.apply_load::<String>(Ok(ids.iter().copied().map(Item::new).collect()));
        view
    }

    fn ids(view: &ListingView) -> Vec<ItemId> {
        view.collection().iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn test_new_view_is_idle_and_empty() {
        let view = ListingView::new(ListingKind::Users);

        assert_eq!(view.status(), &LoadStatus::Idle);
        assert!(view.collection().is_empty());
        assert!(view.selected().is_none());
        assert!(view.pending_delete().is_none());
    }

    #[test]
    fn test_delete_confirm_removes_item() {
        let mut view = loaded(&[1, 2, 3]);

        view.delete_requested(ItemId::Number(2));
        assert_eq!(view.pending_delete(), Some(&ItemId::Number(2)));

        let removed = view.delete_confirmed();

        assert_eq!(removed, Some(Item::new(2)));
        assert_eq!(ids(&view), vec![ItemId::Number(1), ItemId::Number(3)]);
        assert!(view.pending_delete().is_none());
        assert_eq!(view.status(), &LoadStatus::Loaded { items: 2 });
    }

    #[test]
    fn test_delete_cancel_keeps_collection() {
        let mut view = loaded(&[1, 2, 3]);

        view.delete_requested(ItemId::Number(2));
        view.delete_cancelled();

        assert!(view.pending_delete().is_none());
        assert!(view.delete_confirmed().is_none());
        assert_eq!(view.collection().len(), 3);
    }

    #[test]
    fn test_confirm_absent_id_is_noop() {
        let mut view = loaded(&[1, 2, 3]);

        view.delete_requested(ItemId::Number(9));
        assert!(view.delete_confirmed().is_none());
        assert_eq!(view.collection().len(), 3);
    }

    #[test]
    fn test_view_and_close_details() {
        let mut view = loaded(&[1]);
        let item = Item::new(1).with("sport_name", "Aqua Center");

        view.view_requested(item);
        assert_eq!(
            view.selected_details().map(|d| d.heading),
            Some("Aqua Center".to_string())
        );

        view.close_details();
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_deleting_selected_item_closes_details() {
        let mut view = loaded(&[1, 2]);
        view.view_requested(Item::new(2));
        view.delete_requested(ItemId::Number(2));
        view.delete_confirmed();

        assert!(view.selected().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_collection() {
        let mut view = loaded(&[1, 2]);

        view.begin_load();
        assert_eq!(view.status(), &LoadStatus::Loading);

        view.apply_load(Err("HTTP request failed: connection refused"));

        assert_eq!(view.collection().len(), 2);
        assert_eq!(
            view.last_error(),
            Some("HTTP request failed: connection refused")
        );
        assert!(matches!(view.status(), LoadStatus::Failed { .. }));
    }

    #[test]
    fn test_successful_load_replaces_wholesale() {
        let mut view = loaded(&[1, 2]);
        view.apply_load::<String>(Err("boom".to_string()));
        view.apply_load::<String>(Ok(Collection::from(vec![Item::new(7)])));

        assert_eq!(ids(&view), vec![ItemId::Number(7)]);
        assert!(view.last_error().is_none());
        assert_eq!(view.status().to_string(), "loaded (1 items)");
    }

    #[test]
    fn test_delete_keeps_loading_and_failed_status() {
        let mut view = loaded(&[1, 2, 3]);

        view.begin_load();
        view.delete_requested(ItemId::Number(1));
        view.delete_confirmed();
        assert_eq!(view.status(), &LoadStatus::Loading);

        view.apply_load(Err("Request to http://api.test/c/ returned status 502"));
        view.delete_requested(ItemId::Number(2));
        view.delete_confirmed();

        assert_eq!(ids(&view), vec![ItemId::Number(3)]);
        assert_eq!(
            view.status(),
            &LoadStatus::Failed {
                message: "Request to http://api.test/c/ returned status 502".to_string()
            }
        );
    }

    #[test]
    fn test_rows_follow_collection_order() {
        let mut view = ListingView::new(ListingKind::Users);
        view.apply_load::<String>(Ok(Collection::from(vec![
            Item::new(2).with("name", "B"),
            Item::new(1).with("name", "A"),
        ])));

        let names: Vec<String> = view.rows().into_iter().filter_map(|row| row.into_iter().next()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
