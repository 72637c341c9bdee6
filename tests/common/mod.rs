//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::cmp::Ordering;

use lunrdex::build::{build_artifact, MarkdownRenderer};
use lunrdex::engine::term_order;
use lunrdex::testing::{item, site_with, title_body_registry};
use lunrdex::{
    decode, Artifact, BuildConfig, CompiledIndex, Environment, Format, SearchSettings, Site,
};

// Re-export canonical test utilities from lunrdex::testing
pub use lunrdex::testing::make_page;

/// Directory containing the build fixtures.
pub const FIXTURES_DIR: &str = "data/build-fixtures";

/// A `posts` collection with one item per text, slugs `d0`, `d1`, ...
///
/// Each text goes into both `title` and `content`.
pub fn corpus_site(texts: &[String]) -> Site {
    let items = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            item(&[
                ("slug", format!("d{}", i).into()),
                ("title", text.as_str().into()),
                ("content", text.as_str().into()),
            ])
        })
        .collect();
    site_with("posts", items)
}

/// Title (boost 10) and body config over `posts`.
pub fn posts_config(format: Format, environment: Environment) -> BuildConfig {
    BuildConfig {
        registry: title_body_registry(),
        format,
        environment,
        baseurl: None,
        settings: SearchSettings {
            collections: vec!["posts".to_string()],
            ..Default::default()
        },
    }
}

/// Build and decode an artifact for a site.
pub fn build_and_decode(site: &Site, format: Format) -> Artifact {
    let config = posts_config(format, Environment::Development);
    let (bytes, _) = build_artifact(site, &config, &MarkdownRenderer).expect("build should succeed");
    decode(&bytes).expect("artifact should decode")
}

/// Check structural invariants of a compiled index.
pub fn assert_index_well_formed(index: &CompiledIndex) {
    assert!(
        index
            .inverted_index
            .windows(2)
            .all(|w| term_order(&w[0].0, &w[1].0) == Ordering::Less),
        "inverted index must be strictly sorted by term"
    );

    let mut indices: Vec<usize> = index.inverted_index.iter().map(|(_, p)| p.index).collect();
    indices.sort_unstable();
    assert_eq!(
        indices,
        (0..index.term_count()).collect::<Vec<_>>(),
        "term indices must be a permutation of 0..terms"
    );

    for (key, vector) in &index.field_vectors {
        let ids: Vec<usize> = vector.iter().map(|(i, _)| i).collect();
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "vector {} must be sorted with unique indices",
            key
        );
        assert!(
            vector.iter().all(|(i, s)| i < index.term_count() && s.is_finite()),
            "vector {} holds an out-of-range index or non-finite score",
            key
        );
    }

    for (term, posting) in &index.inverted_index {
        let fields: Vec<&String> = posting.fields.keys().collect();
        assert_eq!(
            fields,
            index.fields.iter().collect::<Vec<_>>(),
            "posting for {} must list every field",
            term
        );
    }
}
