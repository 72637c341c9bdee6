// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows through an index build.
//!
//! Items arrive as open maps: a page's front matter can hold anything, and the
//! field configuration decides what matters. Rather than a struct per content
//! type, every field value is a [`Value`], a small tagged union that mirrors
//! what YAML front matter and JSON can express.
//!
//! # Lifecycle
//!
//! ```text
//! Item ──resolve──▶ Document + FlatData ──▶ SubmittedDoc ──▶ engine
//!   │                    │
//!   └──────merge─────────┴──▶ DocStore entry
//! ```
//!
//! Nothing here is mutated after assembly. An item is read, never written.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A field value from an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Absent, blank, or an empty container.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key on a mapping. Null entries count as missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key).filter(|v| !v.is_null())
    }

    /// Render as display text.
    ///
    /// Containers are joined with single spaces, skipping entries that render
    /// to nothing. Returns `None` when there is no text at all.
    pub fn to_text(&self) -> Option<String> {
        let text = match self {
            Value::Null => return None,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => join_texts(items.iter()),
            Value::Map(map) => join_texts(map.values()),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn join_texts<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .filter_map(Value::to_text)
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Value of `recordstatus` that hides an item from production builds.
pub const INACTIVE_STATUS: &str = "inactive";

/// A content item: page, post, or record of any collection.
///
/// Field order is preserved from the source so stored documents serialize
/// the same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: IndexMap<String, Value>,
}

impl Item {
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Item { fields }
    }

    /// Field lookup by name. Null counts as missing.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn slug(&self) -> Option<&str> {
        self.get_str("slug")
    }

    pub fn url(&self) -> Option<&str> {
        self.get_str("url")
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn content(&self) -> Option<&str> {
        self.get_str("content")
    }

    pub fn recordstatus(&self) -> Option<&str> {
        self.get_str("recordstatus")
    }

    pub fn is_inactive(&self) -> bool {
        self.recordstatus() == Some(INACTIVE_STATUS)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Item {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All content of a site, by collection name, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Site {
    collections: IndexMap<String, Vec<Item>>,
}

impl Site {
    pub fn new() -> Self {
        Site::default()
    }

    pub fn insert_collection(&mut self, name: impl Into<String>, items: Vec<Item>) {
        self.collections.insert(name.into(), items);
    }

    pub fn collection(&self, name: &str) -> Option<&[Item]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

/// Per-item search text: one joined string per searchfield.
///
/// **Invariant**: each searchfield appears once. Later contributions to the
/// same searchfield are appended after a single space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub id: String,
    fields: IndexMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Fold one contribution into a searchfield. Blank text is ignored.
    pub fn append(&mut self, searchfield: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match self.fields.get_mut(searchfield) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => {
                self.fields.insert(searchfield.to_string(), text.to_string());
            }
        }
    }

    pub fn get(&self, searchfield: &str) -> Option<&str> {
        self.fields.get(searchfield).map(String::as_str)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }
}

/// Per-item raw resolved values for widget-backed searchfields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatData {
    fields: IndexMap<String, Vec<Value>>,
}

impl FlatData {
    /// Append values to a searchfield. Empty contributions leave no key behind.
    pub fn extend(&mut self, searchfield: &str, values: Vec<Value>) {
        if values.is_empty() {
            return;
        }
        self.fields
            .entry(searchfield.to_string())
            .or_default()
            .extend(values);
    }

    pub fn get(&self, searchfield: &str) -> Option<&[Value]> {
        self.fields.get(searchfield).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Value>)> {
        self.fields.iter()
    }
}

/// One stored document: every item field, overlaid with flat data and the
/// plain-text excerpt.
pub type StoredDoc = IndexMap<String, Value>;

/// Serialized items keyed by slug, for displaying search hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocStore {
    docs: IndexMap<String, StoredDoc>,
}

impl DocStore {
    pub fn new() -> Self {
        DocStore::default()
    }

    /// Store a document. Returns true if the slug was already present.
    pub fn insert(&mut self, slug: String, doc: StoredDoc) -> bool {
        self.docs.insert(slug, doc).is_some()
    }

    pub fn get(&self, slug: &str) -> Option<&StoredDoc> {
        self.docs.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.docs.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}

/// A field as handed to the index engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Joined search text, split by the tokenizer.
    Text(String),
    /// Structured values, one token per element.
    Values(Vec<Value>),
}

/// A document as submitted to the index engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedDoc {
    pub doc_ref: String,
    pub fields: IndexMap<String, FieldInput>,
}

impl SubmittedDoc {
    /// Combine joined text with flat data; structured values take precedence.
    pub fn from_parts(document: &Document, flat_data: &FlatData) -> Self {
        let mut fields: IndexMap<String, FieldInput> = document
            .fields()
            .iter()
            .map(|(name, text)| (name.clone(), FieldInput::Text(text.clone())))
            .collect();
        for (name, values) in flat_data.iter() {
            fields.insert(name.clone(), FieldInput::Values(values.clone()));
        }
        SubmittedDoc {
            doc_ref: document.id.clone(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldInput> {
        self.fields.get(field)
    }
}
