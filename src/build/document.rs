// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document assembly: items in, search documents and stored documents out.
//!
//! For every visible item, every spec, every source field (in that order) the
//! resolver's contribution is folded into the item's [`Document`] and, for
//! widget-backed specs, its [`FlatData`]. The stored copy of the item is the
//! item itself with the flat data laid over it and `content` replaced by a
//! plain-text excerpt.
//!
//! # Ordering
//!
//! The index engine numbers terms in submission order, so documents must come
//! out in traversal order: collections as configured, items as the content
//! source lists them. Parallel assembly (see [`super::parallel`]) keeps this.

use tracing::{debug, warn};

use super::excerpt::{excerpt, ContentRenderer};
use super::parallel::assemble_items;
use crate::config::{BuildConfig, Environment, FieldRegistry};
use crate::error::BuildError;
use crate::resolve::resolve;
use crate::types::{DocStore, Document, FlatData, Item, Site, StoredDoc, SubmittedDoc, Value};

/// One item queued for assembly.
#[derive(Debug, Clone, Copy)]
pub struct SourceItem<'a> {
    pub collection: &'a str,
    pub slug: &'a str,
    pub item: &'a Item,
}

/// Search-side result of assembling one item.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledItem {
    pub document: Document,
    pub flat_data: FlatData,
}

impl AssembledItem {
    /// The document as the index engine receives it.
    pub fn submission(&self) -> SubmittedDoc {
        SubmittedDoc::from_parts(&self.document, &self.flat_data)
    }
}

/// All assembled documents, in submission order, plus the document store.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub items: Vec<AssembledItem>,
    pub doc_store: DocStore,
}

impl Assembly {
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.items.iter().map(|a| &a.document)
    }

    pub fn submissions(&self) -> Vec<SubmittedDoc> {
        self.items.iter().map(AssembledItem::submission).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Inactive items are hidden in production and shown everywhere else.
pub fn is_visible(item: &Item, environment: &Environment) -> bool {
    !(item.is_inactive() && environment.is_production())
}

/// Items of the configured collections, in order, with visibility applied.
///
/// A configured collection that the content source does not have is logged
/// and skipped. An item without a slug aborts the build.
pub fn collect_items<'a>(
    site: &'a Site,
    collections: &'a [String],
    environment: &Environment,
) -> Result<Vec<SourceItem<'a>>, BuildError> {
    let mut out = Vec::new();
    for collection in collections {
        let Some(items) = site.collection(collection) else {
            warn!(collection = %collection, "configured collection not found in content");
            continue;
        };
        for (index, item) in items.iter().enumerate() {
            let slug = item.slug().ok_or_else(|| BuildError::MissingSlug {
                collection: collection.clone(),
                index,
            })?;
            if is_visible(item, environment) {
                out.push(SourceItem {
                    collection: collection.as_str(),
                    slug,
                    item,
                });
            }
        }
    }
    Ok(out)
}

/// Resolve every spec against one item.
pub fn assemble_item(
    source: SourceItem<'_>,
    registry: &FieldRegistry,
    site: &Site,
) -> AssembledItem {
    let mut document = Document::new(source.slug);
    let mut flat_data = FlatData::default();

    for spec in registry.specs() {
        for jekyllfield in &spec.jekyllfields {
            let contribution = resolve(source.item, spec, jekyllfield, site);
            if let Some(values) = contribution.values {
                flat_data.extend(&spec.searchfield, values);
            }
            if let Some(text) = contribution.text {
                document.append(&spec.searchfield, &text);
            }
        }
    }

    AssembledItem {
        document,
        flat_data,
    }
}

/// Build the stored copy of an item.
pub fn store_item(item: &Item, flat_data: &FlatData, renderer: &dyn ContentRenderer) -> StoredDoc {
    let mut stored = item.fields().clone();
    if let Some(content) = item.content() {
        stored.insert("content".to_string(), Value::from(excerpt(renderer, content)));
    }
    for (searchfield, values) in flat_data.iter() {
        stored.insert(searchfield.clone(), Value::List(values.clone()));
    }
    stored
}

/// Assemble every visible item of the configured collections.
pub fn assemble(
    site: &Site,
    config: &BuildConfig,
    renderer: &dyn ContentRenderer,
) -> Result<Assembly, BuildError> {
    for collection in config.registry.related_collections() {
        if !site.has_collection(collection) {
            warn!(
                collection,
                "relational widget names a collection missing from content; it will match nothing"
            );
        }
    }

    let sources = collect_items(site, &config.settings.collections, &config.environment)?;
    let assembled = assemble_items(&sources, &config.registry, site, renderer);

    let mut assembly = Assembly {
        items: Vec::with_capacity(assembled.len()),
        doc_store: DocStore::new(),
    };
    for (source, (item, stored)) in sources.iter().zip(assembled) {
        match source.item.title() {
            Some(title) => debug!("{} ({})", title, source.item.url().unwrap_or_default()),
            None => debug!("{}", source.item.url().unwrap_or(source.slug)),
        }
        if assembly.doc_store.insert(source.slug.to_string(), stored) {
            warn!(
                slug = source.slug,
                collection = source.collection,
                "duplicate slug; the later item replaces the stored document"
            );
        }
        assembly.items.push(item);
    }
    Ok(assembly)
}
