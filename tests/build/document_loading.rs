//! Tests for loading content from an input directory.

use lunrdex::build::{load_site, InputManifest};
use lunrdex::{BuildError, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

fn load_fixture(fixture: &str) -> lunrdex::Site {
    let input = Path::new(BUILD_FIXTURES_DIR).join(fixture);
    let manifest = InputManifest::read(&input).unwrap();
    load_site(&input, &manifest).unwrap()
}

#[test]
fn test_load_keeps_manifest_order() {
    let site = load_fixture("valid");
    let names: Vec<_> = site.collection_names().collect();
    assert_eq!(names, vec!["books", "people", "chapters"]);

    let slugs: Vec<_> = site
        .collection("books")
        .unwrap()
        .iter()
        .map(|item| item.slug().unwrap())
        .collect();
    assert_eq!(slugs, vec!["dune", "emma", "untitled"]);
}

#[test]
fn test_loaded_items_keep_structure() {
    let site = load_fixture("valid");
    let dune = &site.collection("books").unwrap()[0];
    assert_eq!(dune.title(), Some("Dune"));
    assert!(dune.get("genres").and_then(Value::as_map).is_some());

    let chapter = &site.collection("chapters").unwrap()[0];
    let parent = chapter.get("parent").unwrap();
    assert_eq!(parent.get("title").and_then(Value::as_str), Some("Dune"));
}

#[test]
fn test_inactive_flag_survives_loading() {
    let site = load_fixture("valid");
    let untitled = &site.collection("books").unwrap()[2];
    assert!(untitled.is_inactive());
}

#[test]
fn test_malformed_item_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{not json").unwrap();
    let manifest: InputManifest =
        serde_json::from_str(r#"{"version": 1, "collections": {"posts": ["bad.json"]}}"#).unwrap();

    let err = load_site(dir.path(), &manifest).unwrap_err();
    assert!(matches!(err, BuildError::Json { ref path, .. } if path.ends_with("bad.json")));
}
