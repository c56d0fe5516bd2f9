//! sportdesk admin
//!
//! Listing definitions, the per-listing interaction state, and the dashboard
//! controller that keeps that state in step with the upstream API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod dashboard;
pub mod listing;
pub mod render;
pub mod view;

pub use dashboard::{Dashboard, DeletePolicy};
pub use listing::{Column, ItemDetails, ListingKind};
pub use view::{ListingView, LoadStatus};
