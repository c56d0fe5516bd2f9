//! Listing definitions for the dashboard tables
//!
//! Each listing declares its table columns, how an item turns into a row,
//! and what the "view details" dialog shows.

use serde::Serialize;
use serde_json::Value;
use sportdesk_core::config::{Config, ResourceConfig};
use sportdesk_core::Item;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Image shown when an item carries none
pub const DEFAULT_IMAGE: &str =
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRGh5WFH8TOIfRKxUrIgJZoDCs1yvQ4hIcppw&s";

/// Heading shown when an item carries no name
pub const UNKNOWN_HEADING: &str = "Unknown";

/// One table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Header text
    pub name: &'static str,
    /// Item attribute rendered in this column
    pub field: &'static str,
    /// Whether the table may sort on this column
    pub sortable: bool,
}

impl Column {
    const fn new(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field,
            sortable: false,
        }
    }

    const fn sortable(name: &'static str, field: &'static str) -> Self {
        Self {
            name,
            field,
            sortable: true,
        }
    }
}

const USER_COLUMNS: &[Column] = &[
    Column::new("User Name", "name"),
    Column::new("Role", "role"),
    Column::new("Email", "email"),
];

const CLUB_COLUMNS: &[Column] = &[
    Column::new("Club Name", "sport_name"),
    Column::new("Sport Category", "sport_category_name"),
    Column::new("Image", "image"),
    Column::sortable("Seat Number", "seat_number"),
    Column::sortable("Price (USD)", "price"),
];

/// Content of the "view details" dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDetails {
    /// Picture URL
    pub image: String,
    /// Dialog heading
    pub heading: String,
    /// Body text
    pub body: String,
}

/// The listings the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    /// Registered users
    Users,
    /// Sport clubs
    Clubs,
}

impl ListingKind {
    /// Page title
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "All Users",
            Self::Clubs => "All Sport Clubs",
        }
    }

    /// Singular noun used in prompts
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Clubs => "club",
        }
    }

    /// Table columns in display order
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::Users => USER_COLUMNS,
            Self::Clubs => CLUB_COLUMNS,
        }
    }

    /// Text of the delete confirmation dialog
    pub fn delete_prompt(self) -> String {
        format!("Are you sure you want to delete this {}?", self.noun())
    }

    /// Resource configuration for this listing
    pub const fn resource(self, config: &Config) -> &ResourceConfig {
        match self {
            Self::Users => &config.users,
            Self::Clubs => &config.clubs,
        }
    }

    /// Project an item into cells, in column order
    pub fn row(self, item: &Item) -> Vec<String> {
        self.columns()
            .iter()
            .map(|column| cell(item, column.field))
            .collect()
    }

    /// Build the details dialog content for an item
    pub fn details(self, item: &Item) -> ItemDetails {
        let (image_field, heading_field, body_field) = match self {
            Self::Users => ("avatar", "name", "email"),
            Self::Clubs => ("image", "sport_name", "description"),
        };

        ItemDetails {
            image: item
                .str_attr(image_field)
                .unwrap_or(DEFAULT_IMAGE)
                .to_string(),
            heading: item
                .str_attr(heading_field)
                .unwrap_or(UNKNOWN_HEADING)
                .to_string(),
            body: cell(item, body_field),
        }
    }

    /// Sort items on a sortable column
    ///
    /// Numbers and numeric strings come first and compare numerically; every
    /// other value follows and compares as text. Items missing the attribute
    /// sort last in either direction. The sort is stable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the field if it is not a sortable column of this listing.
    pub fn sort(self, items: &mut [Item], field: &str, descending: bool) -> Result<(), String> {
        let sortable = self
            .columns()
            .iter()
            .any(|column| column.sortable && column.field == field);
        if !sortable {
            return Err(format!(
                "'{field}' is not a sortable column of {}",
                self.title()
            ));
        }

        items.sort_by(|a, b| {
            match (a.attr(field), b.attr(field)) {
                (Some(x), Some(y)) => {
                    let ordering = compare_values(x, y);
                    if descending { ordering.reverse() } else { ordering }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        Ok(())
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => f.write_str("users"),
            Self::Clubs => f.write_str("clubs"),
        }
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(Self::Users),
            "clubs" | "club" | "sportclubs" | "sport-clubs" => Ok(Self::Clubs),
            other => Err(format!("unknown listing '{other}', expected users or clubs")),
        }
    }
}

/// Render one attribute as cell text
fn cell(item: &Item, field: &str) -> String {
    match item.attr(field) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numeric values rank before text so mixed columns still form a total order
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => text(a).cmp(&text(b)),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn club(id: i64, name: &str, seats: i64, price: &str) -> Item {
        Item::new(id)
            .with("sport_name", name)
            .with("sport_category_name", "Football")
            .with("image", format!("https://img.test/{id}.png"))
            .with("seat_number", seats)
            .with("price", price)
    }

    #[test]
    fn test_user_row() {
        let user = Item::new(5)
            .with("name", "Ana")
            .with("role", "admin")
            .with("email", "ana@example.com");

        assert_eq!(
            ListingKind::Users.row(&user),
            vec!["Ana", "admin", "ana@example.com"]
        );
    }

    #[test]
    fn test_club_row_renders_non_strings() {
        let row = ListingKind::Clubs.row(&club(1, "Aqua Center", 40, "12.50"));

        assert_eq!(
            row,
            vec![
                "Aqua Center",
                "Football",
                "https://img.test/1.png",
                "40",
                "12.50"
            ]
        );
    }

    #[test]
    fn test_missing_and_null_cells_are_empty() {
        let user = Item::new(1).with("name", "Bo").with("role", json!(null));
        assert_eq!(ListingKind::Users.row(&user), vec!["Bo", "", ""]);
    }

    #[test]
    fn test_user_details_fallbacks() {
        let bare = Item::new(1);
        let details = ListingKind::Users.details(&bare);

        assert_eq!(details.image, DEFAULT_IMAGE);
        assert_eq!(details.heading, "Unknown");
        assert_eq!(details.body, "");

        let full = Item::new(2)
            .with("name", "Cleo")
            .with("email", "cleo@example.com")
            .with("avatar", "https://img.test/cleo.png");
        assert_eq!(
            ListingKind::Users.details(&full),
            ItemDetails {
                image: "https://img.test/cleo.png".to_string(),
                heading: "Cleo".to_string(),
                body: "cleo@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_club_details() {
        let item = club(3, "Box Gym", 12, "9").with("description", "Open late");
        let details = ListingKind::Clubs.details(&item);

        assert_eq!(details.heading, "Box Gym");
        assert_eq!(details.body, "Open late");
        assert_eq!(details.image, "https://img.test/3.png");

        let empty_image = Item::new(4).with("image", "");
        assert_eq!(ListingKind::Clubs.details(&empty_image).image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ListingKind::Users.title(), "All Users");
        assert_eq!(ListingKind::Clubs.title(), "All Sport Clubs");
        assert_eq!(
            ListingKind::Users.delete_prompt(),
            "Are you sure you want to delete this user?"
        );
        assert_eq!(
            ListingKind::Clubs.delete_prompt(),
            "Are you sure you want to delete this club?"
        );
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("users".parse::<ListingKind>().unwrap(), ListingKind::Users);
        assert_eq!("Clubs".parse::<ListingKind>().unwrap(), ListingKind::Clubs);
        assert!("teams".parse::<ListingKind>().is_err());
        assert_eq!(ListingKind::Clubs.to_string(), "clubs");
    }

    #[test]
    fn test_resource_lookup() {
        let config = Config::default();
        assert_eq!(ListingKind::Users.resource(&config).path, "users/");
        assert_eq!(ListingKind::Clubs.resource(&config).path, "sportclubs/all/");
    }

    #[test]
    fn test_sort_numeric_strings_and_missing() {
        let mut items = vec![
            club(1, "A", 40, "12.50"),
            club(2, "B", 5, "9"),
            Item::new(3).with("sport_name", "C"),
            club(4, "D", 100, "100.00"),
        ];

        ListingKind::Clubs.sort(&mut items, "price", false).unwrap();
        let ids: Vec<String> = items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "1", "4", "3"]);

        ListingKind::Clubs.sort(&mut items, "seat_number", true).unwrap();
        let ids: Vec<String> = items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn test_sort_rejects_unsortable_column() {
        let mut items = vec![club(1, "A", 1, "1")];
        assert!(ListingKind::Clubs.sort(&mut items, "sport_name", false).is_err());
        assert!(ListingKind::Users.sort(&mut items, "email", false).is_err());
    }

    #[test]
    fn test_sort_mixed_numbers_and_text() {
        let values = [json!("5x"), json!(9), json!("10"), json!("abc"), json!(true), json!(2.5)];
        let mut items: Vec<Item> = values
            .iter()
            .enumerate()
            .map(|(id, value)| Item::new(i64::try_from(id).unwrap()).with("price", value.clone()))
            .collect();
        items.push(Item::new(99));

        ListingKind::Clubs.sort(&mut items, "price", false).unwrap();
        let cells: Vec<String> = items.iter().map(|item| cell(item, "price")).collect();
        assert_eq!(cells, vec!["2.5", "9", "10", "5x", "abc", "true", ""]);

        ListingKind::Clubs.sort(&mut items, "price", true).unwrap();
        let cells: Vec<String> = items.iter().map(|item| cell(item, "price")).collect();
        assert_eq!(cells, vec!["true", "abc", "5x", "10", "9", "2.5", ""]);
    }

    fn price_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i32>().prop_map(Value::from),
            (-1000.0f64..1000.0).prop_map(Value::from),
            (0u32..200).prop_map(|n| Value::from(n.to_string())),
            "[0-9]{0,3}[a-z]{1,3}".prop_map(Value::from),
            Just(Value::Null),
        ]
    }

    proptest! {
        #[test]
        fn prop_sort_mixed_column_is_ordered(
            values in prop::collection::vec(price_value(), 0..500),
            descending in any::<bool>(),
        ) {
            let mut items: Vec<Item> = values
                .into_iter()
                .zip(0i64..)
                .map(|(value, id)| Item::new(id).with("price", value))
                .collect();

            ListingKind::Clubs.sort(&mut items, "price", descending).unwrap();

            for pair in items.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match (a.attr("price"), b.attr("price")) {
                    (Some(x), Some(y)) => {
                        let ordering = compare_values(x, y);
                        let expected = if descending { ordering.reverse() } else { ordering };
                        prop_assert_ne!(expected, Ordering::Greater);
                    }
                    (None, Some(_)) => prop_assert!(false, "missing value sorted before a present one"),
                    _ => {}
                }
            }
        }
    }
}
