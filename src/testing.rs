//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::config::{FieldRegistry, FieldSpec, Widget};
use crate::types::{Item, Site, Value};

/// Build an item from `(field, value)` pairs, keeping their order.
pub fn item(fields: &[(&str, Value)]) -> Item {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Create a simple page with a slug, url and title.
pub fn make_page(slug: &str, title: &str) -> Item {
    item(&[
        ("slug", slug.into()),
        ("url", format!("/{}/", slug).into()),
        ("title", title.into()),
    ])
}

/// Create a field spec with boost 1.
pub fn spec(searchfield: &str, jekyllfields: &[&str], widget: Widget) -> FieldSpec {
    FieldSpec {
        searchfield: searchfield.to_string(),
        jekyllfields: jekyllfields.iter().map(|f| f.to_string()).collect(),
        widget,
        boost: 1.0,
    }
}

/// Create a plain field spec with an explicit boost.
pub fn boosted(searchfield: &str, jekyllfields: &[&str], boost: f64) -> FieldSpec {
    FieldSpec {
        boost,
        ..spec(searchfield, jekyllfields, Widget::None)
    }
}

/// `title -> title` (boost 10) and `content -> body` (boost 1).
pub fn title_body_registry() -> FieldRegistry {
    FieldRegistry::from_specs(vec![
        boosted("title", &["title"], 10.0),
        boosted("body", &["content"], 1.0),
    ])
}

/// A site with a single collection.
pub fn site_with(collection: &str, items: Vec<Item>) -> Site {
    let mut site = Site::new();
    site.insert_collection(collection, items);
    site
}
