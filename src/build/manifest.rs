use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::BuildError;
use crate::types::Item;

/// Manifest file name inside the input directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Content source description: collections and their items, in order.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    #[serde(default)]
    pub collections: IndexMap<String, Vec<CollectionEntry>>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CollectionEntry {
    /// Path of a JSON item file, relative to the input directory
    File(String),
    /// Item given inline
    Inline(Item),
}

impl InputManifest {
    /// Read `manifest.json` from an input directory.
    pub fn read(input_dir: &Path) -> Result<Self, BuildError> {
        let path = input_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| BuildError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn item_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}
