// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Widget resolution: computing a search field's value from an item.
//!
//! Each field spec reads one or more source fields. The widget decides where
//! the value actually comes from:
//!
//! | Widget       | Source                                                    |
//! |--------------|-----------------------------------------------------------|
//! | `none`       | `item[field]`                                             |
//! | `flatten`    | values of the mapping at `item[field]`                    |
//! | `relational` | `other[field]` for items of another collection whose     |
//! |              | `matchfield` references this item's slug                  |
//! | `nested`     | `parent[field]` for each parent under `item[parentfield]` |
//!
//! Resolution never fails. A missing field, a missing parent, or a related
//! item without a `matchfield` simply contributes nothing.

use crate::config::{FieldSpec, Widget};
use crate::types::{Item, Site, Value};

/// Raw outcome of a widget, before post-processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Absent,
    Scalar(Value),
    Sequence(Vec<Value>),
}

impl Resolved {
    fn from_field(value: Option<&Value>) -> Self {
        match value {
            None => Resolved::Absent,
            Some(Value::List(items)) => Resolved::Sequence(items.clone()),
            Some(other) => Resolved::Scalar(other.clone()),
        }
    }
}

/// What one (spec, source field) pair adds to an item's document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    /// Trimmed display text, if any.
    pub text: Option<String>,
    /// Raw values for flat data. Only set for widget-backed specs.
    pub values: Option<Vec<Value>>,
}

/// Run a spec's widget for one source field.
pub fn resolve_widget(item: &Item, widget: &Widget, jekyllfield: &str, site: &Site) -> Resolved {
    match widget {
        Widget::None => Resolved::from_field(item.get(jekyllfield)),
        Widget::Flatten => flatten(item.get(jekyllfield)),
        Widget::Relational {
            collection,
            matchfield,
            secondaryfield,
        } => relational(
            item,
            site,
            collection,
            matchfield,
            secondaryfield.as_deref(),
            jekyllfield,
        ),
        Widget::Nested { parentfield } => nested(item, parentfield, jekyllfield),
    }
}

/// Resolve and post-process one source field of a spec.
pub fn resolve(item: &Item, spec: &FieldSpec, jekyllfield: &str, site: &Site) -> Contribution {
    let resolved = resolve_widget(item, &spec.widget, jekyllfield, site);

    if spec.widget == Widget::None {
        let text = match resolved {
            Resolved::Absent => None,
            Resolved::Scalar(value) => value.to_text(),
            Resolved::Sequence(values) => join(&dedup(values)),
        };
        return Contribution {
            text: trimmed(text),
            values: None,
        };
    }

    match resolved {
        Resolved::Absent => Contribution::default(),
        Resolved::Scalar(value) => {
            if value.is_empty() {
                return Contribution::default();
            }
            Contribution {
                text: trimmed(value.to_text()),
                values: Some(vec![value]),
            }
        }
        Resolved::Sequence(values) => {
            let values = compact(values);
            Contribution {
                text: trimmed(join(&values)),
                values: Some(values),
            }
        }
    }
}

fn flatten(value: Option<&Value>) -> Resolved {
    match value {
        Some(Value::Map(map)) => Resolved::Sequence(flatten_once(map.values().cloned())),
        other => Resolved::from_field(other),
    }
}

fn relational(
    item: &Item,
    site: &Site,
    collection: &str,
    matchfield: &str,
    secondaryfield: Option<&str>,
    jekyllfield: &str,
) -> Resolved {
    let (Some(slug), Some(related)) = (item.slug(), site.collection(collection)) else {
        return Resolved::Absent;
    };

    let matches = related
        .iter()
        .filter(|other| references(other.get(matchfield), secondaryfield, slug))
        .map(|other| other.get(jekyllfield).cloned().unwrap_or(Value::Null))
        .collect();
    Resolved::Sequence(matches)
}

/// Whether a `matchfield` value points at `slug`.
///
/// The value is a list of references (or a single one). With a secondary
/// field, each reference is a mapping and the slug sits under that key.
fn references(matchfield: Option<&Value>, secondaryfield: Option<&str>, slug: &str) -> bool {
    let Some(value) = matchfield else {
        return false;
    };
    let entries = match value {
        Value::List(entries) => entries.as_slice(),
        single => std::slice::from_ref(single),
    };
    entries.iter().any(|entry| {
        let target = match secondaryfield {
            Some(key) => entry.get(key),
            None => Some(entry),
        };
        target.and_then(Value::as_str) == Some(slug)
    })
}

fn nested(item: &Item, parentfield: &str, jekyllfield: &str) -> Resolved {
    match item.get(parentfield) {
        // No parent: keep whatever the item itself holds.
        None => Resolved::from_field(item.get(jekyllfield)),
        Some(Value::List(parents)) => Resolved::Sequence(
            parents
                .iter()
                .map(|parent| parent.get(jekyllfield).cloned().unwrap_or(Value::Null))
                .collect(),
        ),
        Some(parent) => match parent.get(jekyllfield) {
            Some(value) => Resolved::Scalar(value.clone()),
            None => Resolved::Absent,
        },
    }
}

fn flatten_once(values: impl Iterator<Item = Value>) -> Vec<Value> {
    let mut out = Vec::new();
    for value in values {
        match value {
            Value::List(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    out
}

/// Flatten one level, drop empty entries, dedupe keeping first occurrence.
fn compact(values: Vec<Value>) -> Vec<Value> {
    dedup(
        flatten_once(values.into_iter())
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect(),
    )
}

fn dedup(values: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !value.is_null() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn join(values: &[Value]) -> Option<String> {
    let parts: Vec<String> = values.iter().filter_map(Value::to_text).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn trimmed(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
