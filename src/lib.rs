// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time search index generation for lunr.js sites.
//!
//! Takes a site's content collections and a list of field specs, and writes a
//! single artifact holding a precompiled lunr 2.x index plus the stored
//! documents needed to render hits. Nothing is indexed in the browser.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  config/    │────▶│  resolve.rs  │────▶│   build/     │
//! │ (FieldSpec, │     │  (widgets:   │     │ (Document,   │
//! │  Registry)  │     │  flatten,    │     │  FlatData,   │
//! └─────────────┘     │  relational, │     │  DocStore)   │
//!                     │  nested)     │     └──────┬───────┘
//!                     └──────────────┘            │
//!                                                 ▼
//!                     ┌──────────────┐     ┌──────────────┐
//!                     │ artifact.rs  │◀────│   engine/    │
//!                     │ (js | json)  │     │ (tokenizer,  │
//!                     └──────────────┘     │  BM25, lunr  │
//!                                          │  layout)     │
//!                                          └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lunrdex::{run_build, Environment};
//!
//! let report = run_build(
//!     Path::new("_config.yml"),
//!     Path::new("content"),
//!     Path::new("_site"),
//!     Environment::Production,
//!     None,
//! )?;
//! assert_eq!(report.generated, vec![PathBuf::from("js/index.js")]);
//! ```

pub mod artifact;
pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod types;

#[doc(hidden)]
pub mod testing;

pub use artifact::{decode, encode, Artifact};
pub use build::{
    build_artifact, run_build, BuildReport, BuildStats, ContentRenderer, MarkdownRenderer,
};
pub use config::registry::DEFAULT_BOOST;
pub use config::{
    BuildConfig, Environment, FieldRegistry, FieldSpec, Format, SearchSettings, SiteConfig, Widget,
};
pub use engine::{build_index, CompiledIndex, IndexEngine, LunrBuilder, LUNR_VERSION};
pub use error::{ArtifactError, BuildError, ConfigError, EngineError};
pub use resolve::{resolve, Contribution, Resolved};
pub use types::{
    DocStore, Document, FieldInput, FlatData, Item, Site, StoredDoc, SubmittedDoc, Value,
};
