//! Plain-text rendering for the CLI

use crate::listing::{ItemDetails, ListingKind};
use sportdesk_core::Item;
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render items as a table under a "{title} ({count})" line
pub fn table(kind: ListingKind, items: &[Item]) -> String {
    let mut builder = Builder::default();
    builder.push_record(kind.columns().iter().map(|column| column.name));
    for item in items {
        builder.push_record(kind.row(item));
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("{} ({})\n{table}\n", kind.title(), items.len())
}

/// Render the details dialog content
pub fn details(details: &ItemDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", details.heading);
    let _ = writeln!(out, "image: {}", details.image);
    if !details.body.is_empty() {
        let _ = writeln!(out, "{}", details.body);
    }
    out
}
