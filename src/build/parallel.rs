// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel content loading and document assembly.
//!
//! Both steps are per-item pure work: reading a JSON file, or resolving every
//! spec against one item. Rayon's indexed `par_iter().collect()` returns
//! results in input order, which matters here: the index engine's document
//! numbering follows submission order and must be the same on every run.
//!
//! Without the `parallel` feature the same code runs on a plain iterator.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::Path;

use super::document::{assemble_item, store_item, AssembledItem, SourceItem};
use super::excerpt::ContentRenderer;
use super::manifest::{CollectionEntry, InputManifest};
use crate::config::FieldRegistry;
use crate::error::BuildError;
use crate::types::{Item, Site, StoredDoc};

fn load_entry(input_dir: &Path, entry: &CollectionEntry) -> Result<Item, BuildError> {
    match entry {
        CollectionEntry::Inline(item) => Ok(item.clone()),
        CollectionEntry::File(filename) => {
            let path = input_dir.join(filename);
            let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| BuildError::Json {
                path: path.display().to_string(),
                source,
            })
        }
    }
}

/// Load every collection listed in the manifest.
///
/// Items keep manifest order within each collection. The first unreadable or
/// malformed file fails the whole load.
pub fn load_site(input_dir: &Path, manifest: &InputManifest) -> Result<Site, BuildError> {
    let mut site = Site::new();
    for (name, entries) in &manifest.collections {
        #[cfg(feature = "parallel")]
        let entries = entries.par_iter();
        #[cfg(not(feature = "parallel"))]
        let entries = entries.iter();

        let items = entries
            .map(|entry| load_entry(input_dir, entry))
            .collect::<Result<Vec<Item>, BuildError>>()?;
        site.insert_collection(name.clone(), items);
    }
    Ok(site)
}

/// Assemble items, returning search documents and stored copies in input order.
pub fn assemble_items(
    sources: &[SourceItem<'_>],
    registry: &FieldRegistry,
    site: &Site,
    renderer: &dyn ContentRenderer,
) -> Vec<(AssembledItem, StoredDoc)> {
    #[cfg(feature = "parallel")]
    let sources = sources.par_iter();
    #[cfg(not(feature = "parallel"))]
    let sources = sources.iter();

    sources
        .map(|source| {
            let assembled = assemble_item(*source, registry, site);
            let stored = store_item(source.item, &assembled.flat_data, renderer);
            (assembled, stored)
        })
        .collect()
}
