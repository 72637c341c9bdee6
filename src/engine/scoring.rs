// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 weights for field vectors.
//!
//! Each (field, document) pair gets a sparse vector of term weights. The
//! client scores a query by comparing against these vectors, so the numbers
//! written here must be the ones a lunr 2.x builder would have produced:
//! same constants, same idf, same rounding to three decimals.
//!
//! ```text
//! idf   = ln(1 + |(N - n + 0.5) / (n + 0.5)|)
//! score = idf * (k1 + 1) * tf / (k1 * (1 - b + b * len / avg_len) + tf)
//!       * field_boost * doc_boost
//! ```

/// Term frequency saturation.
pub const K1: f64 = 1.2;

/// Field length normalization.
pub const B: f64 = 0.75;

/// Inverse document frequency.
///
/// `docs_with_term` counts (field, document) postings across all fields, so a
/// term present in two fields of one document counts twice.
pub fn idf(docs_with_term: usize, document_count: usize) -> f64 {
    let n = docs_with_term as f64;
    let x = (document_count as f64 - n + 0.5) / (n + 0.5);
    (1.0 + x.abs()).ln()
}

/// BM25 weight of one term in one field of one document.
pub fn bm25(tf: usize, field_length: usize, average_field_length: f64, idf: f64) -> f64 {
    let tf = tf as f64;
    let norm = 1.0 - B + B * (field_length as f64 / average_field_length);
    idf * ((K1 + 1.0) * tf) / (K1 * norm + tf)
}

/// Round to three decimals, as stored in the serialized index.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
