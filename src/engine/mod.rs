// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Embedded index engine.
//!
//! The builder mirrors what a lunr 2.x `lunr.Builder` does with the default
//! `ref: "id"` and no stemmer or stop-word stages, so the serialized output
//! loads directly into `lunr.Index.load` on the client.
//!
//! # Build flow
//!
//! ```text
//! field(name, boost)*  ->  add(doc)*  ->  build()
//!                          │                │
//!                          │ tokenize       │ average field lengths
//!                          │ trim           │ BM25 field vectors
//!                          │ count terms    │ sort inverted index
//!                          ▼                ▼
//!                      postings        CompiledIndex
//! ```
//!
//! The engine sits behind [`IndexEngine`] so the assembly side never depends
//! on how terms are weighted.

pub mod index;
pub mod scoring;
pub mod tokenizer;

pub use index::{term_order, CompiledIndex, FieldVector, Posting, TermMetadata, LUNR_VERSION};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::FieldRegistry;
use crate::error::EngineError;
use crate::types::SubmittedDoc;
use index::FIELD_REF_JOINER;
use scoring::{bm25, idf, round_score};

/// An index builder: declare fields, add documents, build once.
pub trait IndexEngine {
    /// Register a searchable field. Declaring a field again replaces its boost.
    fn field(&mut self, name: &str, boost: f64) -> Result<(), EngineError>;

    /// Add one document. Fields the document lacks are indexed as empty.
    fn add(&mut self, doc: &SubmittedDoc) -> Result<(), EngineError>;

    /// Consume the builder and produce the serializable index.
    fn build(self) -> Result<CompiledIndex, EngineError>;
}

/// lunr-compatible BM25 index builder.
#[derive(Debug, Default)]
pub struct LunrBuilder {
    fields: IndexMap<String, f64>,
    field_lengths: IndexMap<String, usize>,
    field_term_frequencies: IndexMap<String, IndexMap<String, usize>>,
    inverted_index: IndexMap<String, Posting>,
    document_count: usize,
    term_index: usize,
}

impl LunrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    fn field_ref(field: &str, doc_ref: &str) -> String {
        format!("{}{}{}", field, FIELD_REF_JOINER, doc_ref)
    }

    fn record_term(&mut self, term: &str, field: &str, doc_ref: &str) {
        if !self.inverted_index.contains_key(term) {
            let posting = Posting::new(self.term_index, self.fields.keys().map(String::as_str));
            self.term_index += 1;
            self.inverted_index.insert(term.to_string(), posting);
        }
        if let Some(posting) = self.inverted_index.get_mut(term) {
            posting
                .fields
                .entry(field.to_string())
                .or_default()
                .entry(doc_ref.to_string())
                .or_default();
        }
    }

    /// Mean length of each field over every (field, document) pair.
    fn average_field_lengths(&self) -> IndexMap<&str, f64> {
        let mut totals: IndexMap<&str, (usize, usize)> = IndexMap::new();
        for (field_ref, &length) in &self.field_lengths {
            let field = field_ref
                .split_once(FIELD_REF_JOINER)
                .map_or(field_ref.as_str(), |(f, _)| f);
            let entry = totals.entry(field).or_insert((0, 0));
            entry.0 += length;
            entry.1 += 1;
        }
        totals
            .into_iter()
            .map(|(field, (sum, count))| (field, sum as f64 / count as f64))
            .collect()
    }

    fn field_vectors(&self) -> Result<Vec<(String, FieldVector)>, EngineError> {
        let averages = self.average_field_lengths();
        let mut idf_cache: IndexMap<&str, f64> = IndexMap::new();
        let mut vectors = Vec::with_capacity(self.field_term_frequencies.len());

        for (field_ref, term_frequencies) in &self.field_term_frequencies {
            let field = field_ref
                .split_once(FIELD_REF_JOINER)
                .map_or(field_ref.as_str(), |(f, _)| f);
            let boost = self.fields.get(field).copied().unwrap_or(1.0);
            let length = self.field_lengths.get(field_ref).copied().unwrap_or(0);
            let average = averages.get(field).copied().unwrap_or(0.0);

            let mut vector = FieldVector::default();
            for (term, &tf) in term_frequencies {
                let Some(posting) = self.inverted_index.get(term) else {
                    continue;
                };
                let term_idf = *idf_cache
                    .entry(term.as_str())
                    .or_insert_with(|| idf(posting.document_frequency(), self.document_count));
                let score = round_score(bm25(tf, length, average, term_idf) * boost);
                if !vector.insert(posting.index, score) {
                    return Err(EngineError::DuplicateVectorIndex(posting.index));
                }
            }
            vectors.push((field_ref.clone(), vector));
        }
        Ok(vectors)
    }
}

impl IndexEngine for LunrBuilder {
    fn field(&mut self, name: &str, boost: f64) -> Result<(), EngineError> {
        if name.contains(FIELD_REF_JOINER) {
            return Err(EngineError::InvalidFieldName(name.to_string()));
        }
        self.fields.insert(name.to_string(), boost);
        Ok(())
    }

    fn add(&mut self, doc: &SubmittedDoc) -> Result<(), EngineError> {
        if doc.doc_ref.is_empty() {
            return Err(EngineError::EmptyRef);
        }
        self.document_count += 1;

        let fields: Vec<String> = self.fields.keys().cloned().collect();
        for field in &fields {
            let terms = match doc.get(field) {
                Some(input) => tokenizer::terms(input, field, &doc.doc_ref)?,
                None => Vec::new(),
            };
            let field_ref = Self::field_ref(field, &doc.doc_ref);
            self.field_lengths.insert(field_ref.clone(), terms.len());

            let mut frequencies: IndexMap<String, usize> = IndexMap::new();
            for term in &terms {
                *frequencies.entry(term.clone()).or_insert(0) += 1;
                self.record_term(term, field, &doc.doc_ref);
            }
            self.field_term_frequencies.insert(field_ref, frequencies);
        }
        Ok(())
    }

    fn build(self) -> Result<CompiledIndex, EngineError> {
        let field_vectors = self.field_vectors()?;

        let mut inverted_index: Vec<(String, Posting)> = self.inverted_index.into_iter().collect();
        inverted_index.sort_by(|a, b| term_order(&a.0, &b.0));

        debug!(
            documents = self.document_count,
            terms = inverted_index.len(),
            "index built"
        );

        Ok(CompiledIndex {
            version: LUNR_VERSION.to_string(),
            fields: self.fields.into_keys().collect(),
            field_vectors,
            inverted_index,
            pipeline: Vec::new(),
        })
    }
}

/// Build an index from submissions, with fields declared from the registry.
pub fn build_index(
    submissions: &[SubmittedDoc],
    registry: &FieldRegistry,
) -> Result<CompiledIndex, EngineError> {
    build_with(LunrBuilder::new(), submissions, registry)
}

/// Drive any engine through the declare, add, build sequence.
pub fn build_with<E: IndexEngine>(
    mut engine: E,
    submissions: &[SubmittedDoc],
    registry: &FieldRegistry,
) -> Result<CompiledIndex, EngineError> {
    for (name, boost) in registry.index_fields() {
        engine.field(name, boost)?;
    }
    for doc in submissions {
        engine.add(doc)?;
    }
    engine.build()
}
