//! Core data types for sportdesk listings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of an item within a collection
///
/// The dashboard API hands out numeric ids for some resources and string ids
/// for others, so both are accepted. Integer ids cover the whole `i64` and
/// `u64` range; fractional ids are not ids and make the item malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Integer id
    Number(i64),
    /// Integer id above `i64::MAX`
    Unsigned(u64),
    /// String id
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::convert::Infallible;

    /// Parses integers as [`ItemId::Number`] or [`ItemId::Unsigned`], anything
    /// else as [`ItemId::Text`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Number(n));
        }
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Unsigned))
    }
}

/// One record of a collection (a user or a sport club)
///
/// Only `id` is interpreted. Every other attribute is carried verbatim for
/// the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id within one collection snapshot
    pub id: ItemId,

    /// Remaining attributes, unvalidated
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Item {
    /// Create an item with no attributes
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute, treating JSON `null` as absent
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Look up a non-empty string attribute
    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.attr(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// One server reply holding a slice of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Items on this page, in server order
    pub results: Vec<Item>,

    /// Location of the following page, if any
    #[serde(default)]
    pub next: Option<String>,
}

impl PageResponse {
    /// Page that ends the collection
    pub const fn last(results: Vec<Item>) -> Self {
        Self {
            results,
            next: None,
        }
    }

    /// Page followed by `next`
    pub fn with_next(results: Vec<Item>, next: impl Into<String>) -> Self {
        Self {
            results,
            next: Some(next.into()),
        }
    }

    /// Cursor to the next page; empty strings count as absent
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Wire shapes a listing endpoint may answer with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageBody {
    /// `{ "results": [...], "next": ... }`
    Envelope(PageResponse),
    /// `[...]` with no pagination envelope
    Bare(Vec<Item>),
}

impl From<PageBody> for PageResponse {
    fn from(body: PageBody) -> Self {
        match body {
            PageBody::Envelope(page) => page,
            PageBody::Bare(results) => Self::last(results),
        }
    }
}

impl PageResponse {
    /// Parse either wire shape from a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the body is neither an envelope nor an array of items.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        let body: PageBody = serde_json::from_slice(body)?;
        Ok(body.into())
    }
}

/// Fully materialized, order-preserving listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    /// Create an empty collection
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append one page worth of items
    pub fn extend_page(&mut self, results: Vec<Item>) {
        self.items.extend(results);
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Find an item by id
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Remove the item with `id`, keeping the order of the rest
    ///
    /// An absent id leaves the collection untouched.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let position = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Consume into the underlying items
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl From<Vec<Item>> for Collection {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl FromIterator<Item> for Collection {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
