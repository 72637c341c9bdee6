// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The compiled index, in the lunr 2.x serialized layout.
//!
//! ```json
//! {
//!   "version": "2.3.9",
//!   "fields": ["title", "body"],
//!   "fieldVectors": [["title/a", [0, 0.288, 1, 0.288]], ...],
//!   "invertedIndex": [["hello", {"_index": 0, "title": {"a": {}}, "body": {}}], ...],
//!   "pipeline": []
//! }
//! ```
//!
//! # Invariants
//!
//! - `invertedIndex` is sorted by term, comparing UTF-16 code units the way
//!   lunr's `TokenSet.Builder` does.
//! - Every `_index` is unique and below the number of terms.
//! - Field vectors are sorted by term index and list each index once.
//! - `fieldVectors` follows submission order.

use indexmap::IndexMap;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::types::Value;

/// Index format version the client loader expects.
pub const LUNR_VERSION: &str = "2.3.9";

/// Joins field name and document ref in field vector keys.
pub const FIELD_REF_JOINER: char = '/';

/// Per-occurrence metadata. Empty unless a metadata whitelist is configured.
pub type TermMetadata = IndexMap<String, Value>;

/// Term order of the serialized inverted index.
///
/// lunr compares JavaScript strings, so terms mixing characters above U+FFFF
/// with characters in U+E000..=U+FFFF sort differently than by code point.
pub fn term_order(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Documents containing a term, per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(rename = "_index")]
    pub index: usize,
    #[serde(flatten)]
    pub fields: IndexMap<String, IndexMap<String, TermMetadata>>,
}

impl Posting {
    pub fn new<'a>(index: usize, fields: impl Iterator<Item = &'a str>) -> Self {
        Posting {
            index,
            fields: fields.map(|f| (f.to_string(), IndexMap::new())).collect(),
        }
    }

    /// (field, document) pairs containing the term.
    pub fn document_frequency(&self) -> usize {
        self.fields.values().map(IndexMap::len).sum()
    }
}

/// Sparse term-weight vector, serialized flat as `[index, weight, ...]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldVector {
    elements: Vec<(usize, f64)>,
}

impl FieldVector {
    /// Insert keeping index order. Returns false if the index is taken.
    pub fn insert(&mut self, index: usize, weight: f64) -> bool {
        match self.elements.binary_search_by_key(&index, |&(i, _)| i) {
            Ok(_) => false,
            Err(pos) => {
                self.elements.insert(pos, (index, weight));
                true
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.elements
            .binary_search_by_key(&index, |&(i, _)| i)
            .ok()
            .map(|pos| self.elements[pos].1)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.elements.iter().copied()
    }
}

impl Serialize for FieldVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len() * 2))?;
        for &(index, weight) in &self.elements {
            seq.serialize_element(&index)?;
            seq.serialize_element(&weight)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for FieldVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlatPairs;

        impl<'de> Visitor<'de> for FlatPairs {
            type Value = FieldVector;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a flat array of index, weight pairs")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldVector, A::Error> {
                let mut vector = FieldVector::default();
                while let Some(index) = seq.next_element::<f64>()? {
                    let weight = seq
                        .next_element::<f64>()?
                        .ok_or_else(|| de::Error::custom("odd number of vector elements"))?;
                    if index < 0.0 || index.fract() != 0.0 {
                        return Err(de::Error::custom(format!("bad term index {}", index)));
                    }
                    if !vector.insert(index as usize, weight) {
                        return Err(de::Error::custom(format!("duplicate term index {}", index)));
                    }
                }
                Ok(vector)
            }
        }

        deserializer.deserialize_seq(FlatPairs)
    }
}

/// The serialized index handed to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledIndex {
    pub version: String,
    pub fields: Vec<String>,
    pub field_vectors: Vec<(String, FieldVector)>,
    pub inverted_index: Vec<(String, Posting)>,
    pub pipeline: Vec<String>,
}

impl CompiledIndex {
    pub fn term_count(&self) -> usize {
        self.inverted_index.len()
    }

    pub fn posting(&self, term: &str) -> Option<&Posting> {
        self.inverted_index
            .binary_search_by(|(t, _)| term_order(t, term))
            .ok()
            .map(|pos| &self.inverted_index[pos].1)
    }

    /// Documents with `term` in any field, in first-seen order.
    pub fn docs_for(&self, term: &str) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        if let Some(posting) = self.posting(term) {
            for doc_ref in posting.fields.values().flat_map(IndexMap::keys) {
                if !refs.contains(&doc_ref.as_str()) {
                    refs.push(doc_ref);
                }
            }
        }
        refs
    }

    pub fn field_vector(&self, field: &str, doc_ref: &str) -> Option<&FieldVector> {
        let key = format!("{}{}{}", field, FIELD_REF_JOINER, doc_ref);
        self.field_vectors
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Distinct document refs, in submission order.
    pub fn doc_refs(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        for (key, _) in &self.field_vectors {
            let doc_ref = key
                .split_once(FIELD_REF_JOINER)
                .map_or(key.as_str(), |(_, r)| r);
            if !refs.contains(&doc_ref) {
                refs.push(doc_ref);
            }
        }
        refs
    }
}
