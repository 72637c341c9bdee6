//! Tests for index construction.

use lunrdex::build::{assemble, load_site, InputManifest, MarkdownRenderer};
use lunrdex::engine::{build_index, build_with, IndexEngine, LunrBuilder};
use lunrdex::testing::{item, site_with, spec, title_body_registry};
use lunrdex::{
    BuildConfig, CompiledIndex, EngineError, Environment, FieldInput, FieldRegistry, Format,
    SearchSettings, SiteConfig, SubmittedDoc, Value, Widget,
};
use std::path::Path;

const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

fn build_fixture(fixture: &str, environment: Environment) -> CompiledIndex {
    let input = Path::new(BUILD_FIXTURES_DIR).join(fixture);
    let site_config = SiteConfig::load(&input.join("_config.yml")).unwrap();
    let config = BuildConfig::new(site_config, environment).unwrap();
    let manifest = InputManifest::read(&input).unwrap();
    let site = load_site(&input, &manifest).unwrap();
    let assembly = assemble(&site, &config, &MarkdownRenderer).unwrap();
    build_index(&assembly.submissions(), &config.registry).unwrap()
}

#[test]
fn test_fixture_fields_registered_in_order() {
    let index = build_fixture("valid", Environment::Development);
    assert_eq!(index.fields, vec!["title", "body", "authors", "genres", "book"]);
    assert_eq!(index.doc_refs(), vec!["dune", "emma", "untitled", "dune-1"]);
}

#[test]
fn test_fixture_production_drops_inactive() {
    let index = build_fixture("valid", Environment::Production);
    assert_eq!(index.doc_refs(), vec!["dune", "emma", "dune-1"]);
    assert!(index.docs_for("untitled").is_empty());
}

#[test]
fn test_structured_values_indexed_whole() {
    let index = build_fixture("valid", Environment::Development);
    assert_eq!(index.docs_for("frank herbert"), vec!["dune"]);
    assert_eq!(index.docs_for("science fiction"), vec!["dune"]);
    assert!(index.docs_for("frank").is_empty());
    assert!(index.docs_for("science").is_empty());
}

#[test]
fn test_nested_parent_title_reaches_child() {
    let index = build_fixture("valid", Environment::Development);
    let posting = index.posting("dune").unwrap();
    assert!(posting.fields["book"].contains_key("dune-1"));
    assert!(posting.fields["title"].contains_key("dune"));
    assert!(!posting.fields["title"].contains_key("dune-1"));
}

#[test]
fn test_markdown_body_tokens() {
    let index = build_fixture("valid", Environment::Development);
    assert_eq!(index.docs_for("arrakis"), vec!["dune"]);
    assert_eq!(index.docs_for("highbury"), vec!["emma"]);
    assert!(index.posting("#").is_none());
}

#[test]
fn test_every_field_vector_present() {
    let index = build_fixture("valid", Environment::Development);
    assert_eq!(index.field_vectors.len(), 4 * 5);
    let chapter_genres = index.field_vector("genres", "dune-1").unwrap();
    assert!(chapter_genres.is_empty());
}

#[test]
fn test_term_indices_unique() {
    let index = build_fixture("valid", Environment::Development);
    let mut seen: Vec<usize> = index.inverted_index.iter().map(|(_, p)| p.index).collect();
    seen.sort_unstable();
    let expected: Vec<usize> = (0..index.term_count()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_inverted_index_sorted() {
    let index = build_fixture("valid", Environment::Development);
    assert!(index.inverted_index.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn test_rebuild_is_identical() {
    let first = build_fixture("valid", Environment::Development);
    let second = build_fixture("valid", Environment::Development);
    assert_eq!(first, second);
}

#[test]
fn test_title_boost_outranks_body() {
    let mut submission = SubmittedDoc {
        doc_ref: "a".to_string(),
        fields: Default::default(),
    };
    submission
        .fields
        .insert("title".to_string(), FieldInput::Text("rust".to_string()));
    submission
        .fields
        .insert("body".to_string(), FieldInput::Text("rust".to_string()));
    let index = build_index(&[submission], &title_body_registry()).unwrap();

    let term = index.posting("rust").unwrap().index;
    let title = index.field_vector("title", "a").unwrap().get(term).unwrap();
    let body = index.field_vector("body", "a").unwrap().get(term).unwrap();
    assert!(title > body);
}

#[test]
fn test_mapping_value_fails_build() {
    let mut submission = SubmittedDoc {
        doc_ref: "a".to_string(),
        fields: Default::default(),
    };
    submission.fields.insert(
        "title".to_string(),
        FieldInput::Values(vec![Value::Map(Default::default())]),
    );
    let err = build_index(&[submission], &title_body_registry()).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedFieldType { ref field, .. } if field == "title"));
}

#[test]
fn test_flattened_nested_mapping_fails_build() {
    let genre: Value = Value::Map([("name".to_string(), Value::from("scifi"))].into_iter().collect());
    let genres = Value::Map([("primary".to_string(), genre)].into_iter().collect());
    let site = site_with("posts", vec![item(&[("slug", "a".into()), ("genres", genres)])]);
    let config = BuildConfig {
        registry: FieldRegistry::from_specs(vec![spec("g", &["genres"], Widget::Flatten)]),
        format: Format::Json,
        environment: Environment::Development,
        baseurl: None,
        settings: SearchSettings {
            collections: vec!["posts".to_string()],
            ..Default::default()
        },
    };
    let assembly = assemble(&site, &config, &MarkdownRenderer).unwrap();
    let err = build_index(&assembly.submissions(), &config.registry).unwrap_err();
    assert!(matches!(
        err,
        EngineError::UnsupportedFieldType { ref field, ref doc_ref } if field == "g" && doc_ref == "a"
    ));
}

#[test]
fn test_custom_engine_driven_in_order() {
    #[derive(Default)]
    struct Recorder {
        inner: LunrBuilder,
        calls: Vec<String>,
    }

    impl IndexEngine for Recorder {
        fn field(&mut self, name: &str, boost: f64) -> Result<(), EngineError> {
            self.calls.push(format!("field {}", name));
            self.inner.field(name, boost)
        }

        fn add(&mut self, doc: &SubmittedDoc) -> Result<(), EngineError> {
            self.calls.push(format!("add {}", doc.doc_ref));
            self.inner.add(doc)
        }

        fn build(self) -> Result<CompiledIndex, EngineError> {
            assert_eq!(
                self.calls,
                vec!["field title", "field body", "add x", "add y"]
            );
            self.inner.build()
        }
    }

    let docs: Vec<_> = ["x", "y"]
        .iter()
        .map(|r| SubmittedDoc {
            doc_ref: r.to_string(),
            fields: Default::default(),
        })
        .collect();
    let index = build_with(Recorder::default(), &docs, &title_body_registry()).unwrap();
    assert_eq!(index.doc_refs(), vec!["x", "y"]);
}
