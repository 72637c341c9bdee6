//! End-to-end tests for the build workflow.

use lunrdex::artifact::decode;
use lunrdex::build::run_build;
use lunrdex::{BuildError, ConfigError, Environment, Format, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

fn fixture_config() -> PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join("valid/_config.yml")
}

fn fixture_input(name: &str) -> PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join(name)
}

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("_site");

    let report = run_build(
        &fixture_config(),
        &fixture_input("valid"),
        &output,
        Environment::Development,
        None,
    )
    .expect("Build should succeed");

    assert_eq!(report.generated, vec![PathBuf::from("assets/js/index.json")]);
    assert_eq!(report.format, Format::Json);
    assert_eq!(report.stats.documents, 4);
    assert!(output.join("assets/js/index.json").exists());
}

#[test]
fn test_run_build_e2e_doc_store_contents() {
    let temp_dir = TempDir::new().unwrap();
    run_build(
        &fixture_config(),
        &fixture_input("valid"),
        temp_dir.path(),
        Environment::Production,
        None,
    )
    .unwrap();

    let bytes = fs::read(temp_dir.path().join("assets/js/index.json")).unwrap();
    let artifact = decode(&bytes).unwrap();
    assert_eq!(artifact.baseurl.as_deref(), Some("/library"));

    let slugs: Vec<_> = artifact.docs.slugs().collect();
    assert_eq!(slugs, vec!["dune", "emma", "dune-1"]);

    let dune = artifact.docs.get("dune").unwrap();
    assert_eq!(dune["content"], Value::from("Arrakis A desert planet."));
    assert_eq!(dune["authors"], Value::from(vec!["Frank Herbert"]));
    assert_eq!(dune["genres"], Value::from(vec!["Science Fiction", "Adventure"]));

    let emma = artifact.docs.get("emma").unwrap();
    assert_eq!(emma["content"], Value::from("Matchmaking in Highbury."));
}

#[test]
fn test_run_build_e2e_format_override() {
    let temp_dir = TempDir::new().unwrap();
    let report = run_build(
        &fixture_config(),
        &fixture_input("valid"),
        temp_dir.path(),
        Environment::Development,
        Some(Format::Js),
    )
    .unwrap();

    assert_eq!(report.generated, vec![PathBuf::from("assets/js/index.js")]);
    let text = fs::read_to_string(temp_dir.path().join("assets/js/index.js")).unwrap();
    assert!(text.starts_with("var docs = "));
    assert!(text.contains("\nvar baseurl = \"/library\"\n"));
    assert!(!temp_dir.path().join("assets/js/index.json").exists());

    let artifact = decode(text.as_bytes()).unwrap();
    assert_eq!(artifact.lunr_settings.format.as_deref(), Some("js"));
}

#[test]
fn test_run_build_e2e_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        run_build(
            &fixture_config(),
            &fixture_input("valid"),
            dir.path(),
            Environment::Development,
            None,
        )
        .unwrap();
    }
    let a = fs::read(first.path().join("assets/js/index.json")).unwrap();
    let b = fs::read(second.path().join("assets/js/index.json")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let result = run_build(
        &fixture_config(),
        temp_dir.path(),
        &temp_dir.path().join("out"),
        Environment::Development,
        None,
    );

    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("manifest.json"),
        "Error should mention manifest: {}",
        err
    );
}

#[test]
fn test_run_build_e2e_invalid_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_build(
        &fixture_config(),
        &fixture_input("invalid-manifest"),
        temp_dir.path(),
        Environment::Development,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Json { .. }));
}

#[test]
fn test_run_build_e2e_missing_slug_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_build(
        &fixture_config(),
        &fixture_input("missing-slug"),
        temp_dir.path(),
        Environment::Development,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::MissingSlug { index: 0, .. }));
    assert!(!temp_dir.path().join("assets").exists());
}

#[test]
fn test_run_build_e2e_bad_config_fails_before_content() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("_config.yml");
    fs::write(
        &config,
        "lunr_settings:\n  collections: [books]\n  format: txt\n",
    )
    .unwrap();

    // The input directory does not exist; the config error must win.
    let err = run_build(
        &config,
        &temp_dir.path().join("no-such-input"),
        temp_dir.path(),
        Environment::Development,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Config(ConfigError::UnknownFormat(_))));
}
