//! Tests for config loading and validation.

use lunrdex::{BuildConfig, BuildError, ConfigError, Environment, Format, SiteConfig, Widget};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

fn config_from_yaml(yaml: &str) -> Result<BuildConfig, ConfigError> {
    let site = SiteConfig::from_yaml(yaml).expect("fixture YAML should parse");
    BuildConfig::new(site, Environment::Development)
}

#[test]
fn test_load_fixture_config() {
    let path = Path::new(BUILD_FIXTURES_DIR).join("valid/_config.yml");
    let site = SiteConfig::load(&path).unwrap();
    assert_eq!(site.baseurl.as_deref(), Some("/library"));

    let config = BuildConfig::new(site, Environment::Production).unwrap();
    assert_eq!(config.format, Format::Json);
    assert_eq!(config.artifact_path(), Path::new("assets/js/index.json"));
    assert_eq!(config.settings.collections, vec!["books", "chapters"]);

    let fields: Vec<_> = config.registry.index_fields().collect();
    assert_eq!(
        fields,
        vec![
            ("title", 10.0),
            ("body", 1.0),
            ("authors", 5.0),
            ("genres", 1.0),
            ("book", 1.0)
        ]
    );
    assert!(matches!(
        config.registry.specs()[2].widget,
        Widget::Relational { .. }
    ));
}

#[test]
fn test_load_json_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"lunr_settings": {"collections": ["posts"], "fields": [
            {"searchfield": "title", "jekyllfields": ["title"]}
        ]}}"#,
    )
    .unwrap();

    let site = SiteConfig::load(&path).unwrap();
    assert!(site.baseurl.is_none());
    let config = BuildConfig::new(site, Environment::Development).unwrap();
    assert_eq!(config.format, Format::Js);
    assert_eq!(config.artifact_path(), Path::new("js/index.js"));
}

#[test]
fn test_missing_config_file() {
    let err = SiteConfig::load(Path::new("does/not/exist.yml")).unwrap_err();
    assert!(matches!(err, BuildError::Read { .. }));
}

#[test]
fn test_malformed_yaml_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("_config.yml");
    fs::write(&path, "lunr_settings: [unclosed").unwrap();
    let err = SiteConfig::load(&path).unwrap_err();
    assert!(matches!(err, BuildError::Yaml { .. }));
    assert!(err.to_string().contains("_config.yml"));
}

#[test]
fn test_unknown_format_fails_fast() {
    let err = config_from_yaml(
        "lunr_settings:\n  collections: [posts]\n  format: xml\n  fields: []\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormat(ref f) if f == "xml"));
}

#[test]
fn test_unknown_widget() {
    let err = config_from_yaml(
        r#"
lunr_settings:
  collections: [posts]
  fields:
    - searchfield: tags
      jekyllfields: [tags]
      widget: explode
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownWidget { ref widget, .. } if widget == "explode"));
}

#[test]
fn test_relational_requires_collection() {
    let err = config_from_yaml(
        r#"
lunr_settings:
  collections: [posts]
  fields:
    - searchfield: authors
      jekyllfields: [title]
      widget: relational
      matchfield: books
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingKey {
            index: 0,
            key: "collection"
        }
    ));
}

#[test]
fn test_missing_searchfield() {
    let err = config_from_yaml(
        "lunr_settings:\n  collections: [posts]\n  fields:\n    - jekyllfields: [title]\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingKey {
            key: "searchfield",
            ..
        }
    ));
}

#[test]
fn test_non_positive_boost() {
    let err = config_from_yaml(
        r#"
lunr_settings:
  collections: [posts]
  fields:
    - searchfield: title
      jekyllfields: [title]
      boost: 0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBoost { .. }));
}

#[test]
fn test_missing_settings_and_collections() {
    assert!(matches!(
        config_from_yaml("baseurl: /x\n").unwrap_err(),
        ConfigError::MissingSettings
    ));
    assert!(matches!(
        config_from_yaml("lunr_settings:\n  fields: []\n").unwrap_err(),
        ConfigError::NoCollections
    ));
}

#[test]
fn test_shared_searchfield_last_boost_wins() {
    let config = config_from_yaml(
        r#"
lunr_settings:
  collections: [posts]
  fields:
    - searchfield: text
      jekyllfields: [title]
      boost: 3
    - searchfield: body
      jekyllfields: [content]
    - searchfield: text
      jekyllfields: [summary]
      boost: 7
"#,
    )
    .unwrap();
    let fields: Vec<_> = config.registry.index_fields().collect();
    assert_eq!(fields, vec![("text", 7.0), ("body", 1.0)]);
}

#[test]
fn test_format_override_updates_echoed_settings() {
    let config = config_from_yaml("lunr_settings:\n  collections: [posts]\n  format: json\n")
        .unwrap()
        .with_format(Format::Js);
    assert_eq!(config.format, Format::Js);
    assert_eq!(config.settings.format.as_deref(), Some("js"));
}

#[test]
fn test_environment_names() {
    assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
    assert_eq!(Environment::default(), Environment::Development);

    let staging: Environment = "staging".parse().unwrap();
    assert_eq!(staging, Environment::Other("staging".to_string()));
    assert!(!staging.is_production());
    assert_eq!(staging.to_string(), "staging");
}
