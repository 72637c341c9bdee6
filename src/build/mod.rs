// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build orchestration: content in, artifact out.
//!
//! ```text
//! _config.yml ──▶ BuildConfig ─┐
//!                              ├─▶ assemble ──▶ build_index ──▶ encode ──▶ js/index.<ext>
//! manifest.json ──▶ Site ──────┘
//! ```
//!
//! [`build_artifact`] is the pure part and does no I/O. [`run_build`] adds
//! config and content loading plus the final write.

pub mod document;
pub mod excerpt;
pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifact::{encode, Artifact};
use crate::config::{BuildConfig, Environment, Format, SiteConfig};
use crate::engine::{build_index, LUNR_VERSION};
use crate::error::BuildError;
use crate::types::Site;

pub use document::*;
pub use excerpt::{ContentRenderer, MarkdownRenderer};
pub use manifest::*;
pub use parallel::*;

/// Counts from one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Documents submitted to the engine.
    pub documents: usize,
    /// Distinct slugs in the stored documents.
    pub stored: usize,
    /// Distinct terms in the inverted index.
    pub terms: usize,
}

/// What a build wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Generated files relative to the output directory. The host must keep
    /// these when it cleans stale output.
    pub generated: Vec<PathBuf>,
    pub format: Format,
    pub stats: BuildStats,
}

/// Assemble, index and encode. No filesystem access.
pub fn build_artifact(
    site: &Site,
    config: &BuildConfig,
    renderer: &dyn ContentRenderer,
) -> Result<(Vec<u8>, BuildStats), BuildError> {
    let assembly = assemble(site, config, renderer)?;
    let index = build_index(&assembly.submissions(), &config.registry)?;

    let stats = BuildStats {
        documents: assembly.len(),
        stored: assembly.doc_store.len(),
        terms: index.term_count(),
    };
    let artifact = Artifact {
        docs: assembly.doc_store,
        index,
        baseurl: config.baseurl.clone(),
        lunr_settings: config.settings.clone(),
    };
    Ok((encode(&artifact, config.format)?, stats))
}

/// Load config and content, build, and write the artifact under `output_dir`.
pub fn run_build(
    config_path: &Path,
    input_dir: &Path,
    output_dir: &Path,
    environment: Environment,
    format_override: Option<Format>,
) -> Result<BuildReport, BuildError> {
    info!("Creating search index...");

    let mut config = BuildConfig::new(SiteConfig::load(config_path)?, environment)?;
    if let Some(format) = format_override {
        config = config.with_format(format);
    }

    let manifest = InputManifest::read(input_dir)?;
    let site = load_site(input_dir, &manifest)?;

    let (bytes, stats) = build_artifact(&site, &config, &MarkdownRenderer)?;

    let relative = config.artifact_path();
    let path = output_dir.join(&relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(&path, &bytes).map_err(|source| BuildError::Write {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        documents = stats.documents,
        terms = stats.terms,
        path = %path.display(),
        "Index ready (lunr.js v{})",
        LUNR_VERSION
    );

    Ok(BuildReport {
        generated: vec![relative],
        format: config.format,
        stats,
    })
}
