// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the index build.
//!
//! Only two kinds of failure ever stop a build: bad configuration and a
//! failing index engine. Missing fields on items are not errors at all; the
//! resolver turns them into empty contributions before they get this far.

use thiserror::Error;

/// Configuration problems, detected before any item is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field spec #{index} is missing required key '{key}'")]
    MissingKey { index: usize, key: &'static str },

    #[error("field spec '{searchfield}' has an empty jekyllfields list")]
    EmptyJekyllFields { searchfield: String },

    #[error("unknown widget '{widget}' on field '{searchfield}' (expected flatten, relational or nested)")]
    UnknownWidget { searchfield: String, widget: String },

    #[error("field '{searchfield}' has invalid boost {boost} (must be a positive number)")]
    InvalidBoost { searchfield: String, boost: f64 },

    #[error("unsupported output format '{0}' (expected 'json' or 'js')")]
    UnknownFormat(String),

    #[error("lunr_settings.collections is empty; nothing to index")]
    NoCollections,

    #[error("config file has no lunr_settings section")]
    MissingSettings,
}

/// Failures inside the index engine. Always fatal.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("field name '{0}' contains the reserved '/' separator")]
    InvalidFieldName(String),

    #[error("field '{field}' of document '{doc_ref}' holds a mapping, which cannot be tokenized")]
    UnsupportedFieldType { field: String, doc_ref: String },

    #[error("document submitted with an empty reference")]
    EmptyRef,

    #[error("duplicate term index {0} while building field vector")]
    DuplicateVectorIndex(usize),
}

/// Encoding and decoding of the final artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("script artifact is missing the '{0}' assignment")]
    MissingAssignment(&'static str),

    #[error("unexpected line in script artifact: {0}")]
    UnexpectedLine(String),
}

/// Anything that can abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("index engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("item #{index} in collection '{collection}' has no slug")]
    MissingSlug { collection: String, index: usize },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
