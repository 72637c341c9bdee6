// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `lunrdex inspect`: a boxed summary of a decoded artifact.

use lunrdex::{Artifact, Format, DEFAULT_BOOST};

use super::display::{field, format_size, section_bot, section_mid, section_top, styled, GREEN};

/// Boost configured for an index field, read back from the echoed settings.
///
/// Several specs may share a searchfield; the last one wins, as at build time.
fn configured_boost(artifact: &Artifact, name: &str) -> f64 {
    artifact
        .lunr_settings
        .fields
        .iter()
        .filter(|spec| spec.searchfield.as_deref() == Some(name))
        .filter_map(|spec| spec.boost.as_ref().and_then(serde_json::Number::as_f64))
        .last()
        .unwrap_or(DEFAULT_BOOST)
}

/// Summary lines for an artifact of `size` bytes in `format`.
pub fn summary(artifact: &Artifact, format: Format, size: usize) -> Vec<String> {
    let index = &artifact.index;
    let mut lines = vec![
        section_top("ARTIFACT"),
        field("format", &format!("{} ({})", format, format_size(size))),
        field("lunr", &index.version),
        field(
            "baseurl",
            artifact.baseurl.as_deref().unwrap_or("(none)"),
        ),
        field("collections", &artifact.lunr_settings.collections.join(", ")),
        section_mid("INDEX"),
        field("documents", &styled(&[GREEN], &index.doc_refs().len().to_string())),
        field("stored", &artifact.docs.len().to_string()),
        field("terms", &index.term_count().to_string()),
        field(
            "pipeline",
            &if index.pipeline.is_empty() {
                "(empty)".to_string()
            } else {
                index.pipeline.join(", ")
            },
        ),
        section_mid("FIELDS"),
    ];
    for name in &index.fields {
        lines.push(field(name, &format!("boost {}", configured_boost(artifact, name))));
    }
    lines.push(section_bot());
    lines
}
