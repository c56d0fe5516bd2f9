//! Paginated REST collection loading for sportdesk
//!
//! The [`CollectionLoader`] walks a paginated listing from its first page to
//! its last and hands back one ordered [`Collection`](sportdesk_core::Collection).
//! Pages come from a [`PageSource`]: the reqwest-backed [`ApiClient`] in
//! production, or the in-memory [`MockPageSource`] in tests.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod error;
pub mod http;
pub mod loader;
pub mod mock;
pub mod source;

pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use loader::CollectionLoader;
pub use mock::MockPageSource;
pub use source::PageSource;

// Re-exported so callers do not need a direct reqwest dependency
pub use reqwest::Url;
