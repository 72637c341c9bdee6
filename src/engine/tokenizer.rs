// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization and the index-time pipeline.
//!
//! Text is lowercased and split on whitespace and `, . ; : / ? ! ( )`.
//! Hyphens and apostrophes are not separators, so `well-known` and `it's`
//! survive as single tokens. Structured values are not split: each element
//! of a sequence becomes exactly one token.
//!
//! The only pipeline stage is the trimmer, which strips non-word characters
//! from both ends of a token. There is no stemmer and no stop-word filter:
//! `running` stays `running` and `the` is indexed like any other word.

use crate::error::EngineError;
use crate::types::{FieldInput, Value};

/// Word separators: whitespace plus `, . ; : / ? ! ( )`.
#[inline]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || c == '\u{feff}'
        || matches!(c, ',' | '.' | ';' | ':' | '/' | '?' | '!' | '(' | ')')
}

/// Split text into lowercased tokens. Empty pieces are dropped.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize a submitted field.
///
/// `field` and `doc_ref` only serve the error message when a sequence holds
/// a mapping, which has no token form.
pub fn tokenize(input: &FieldInput, field: &str, doc_ref: &str) -> Result<Vec<String>, EngineError> {
    match input {
        FieldInput::Text(text) => Ok(tokenize_text(text)),
        FieldInput::Values(values) => values
            .iter()
            .filter(|value| !value.is_null())
            .map(|value| match value {
                Value::Map(_) => Err(EngineError::UnsupportedFieldType {
                    field: field.to_string(),
                    doc_ref: doc_ref.to_string(),
                }),
                other => Ok(other.to_text().unwrap_or_default().to_lowercase()),
            })
            .collect(),
    }
}

/// Strip leading and trailing non-word characters.
///
/// Returns `None` when nothing is left, which removes the token.
pub fn trim(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Tokenize and run the pipeline: the terms that get indexed.
pub fn terms(input: &FieldInput, field: &str, doc_ref: &str) -> Result<Vec<String>, EngineError> {
    Ok(tokenize(input, field, doc_ref)?
        .iter()
        .filter_map(|token| trim(token))
        .collect())
}
