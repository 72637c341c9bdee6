// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Site configuration.
//!
//! The search settings live under `lunr_settings` in the site's config file,
//! next to `baseurl`. YAML and JSON are both accepted; the extension decides.
//!
//! ```yaml
//! baseurl: /docs
//! lunr_settings:
//!   collections: [posts, pages]
//!   format: json
//!   fields:
//!     - searchfield: title
//!       jekyllfields: [title]
//!       boost: 10
//!     - searchfield: authors
//!       jekyllfields: [title]
//!       widget: relational
//!       collection: people
//!       matchfield: books
//! ```
//!
//! Settings are echoed verbatim into the artifact, so keys this crate does
//! not understand are kept in `extra` rather than dropped.

pub mod registry;

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, ConfigError};
use crate::types::Value;

pub use registry::{FieldRegistry, FieldSpec, Widget};

/// Default output subdirectory for the artifact.
pub const DEFAULT_JS_DIR: &str = "js";

/// Default output subdirectory for stylesheets shipped with the search UI.
pub const DEFAULT_CSS_DIR: &str = "css";

/// One field descriptor as written in the config file.
///
/// Every key is optional at this level so that a missing key becomes a
/// [`ConfigError::MissingKey`] naming the spec, not a serde error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpecConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jekyllfields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondaryfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentfield: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The `lunr_settings` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub fields: Vec<FieldSpecConfig>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SearchSettings {
    pub fn js_dir(&self) -> &str {
        self.js_dir.as_deref().unwrap_or(DEFAULT_JS_DIR)
    }

    pub fn css_dir(&self) -> &str {
        self.css_dir.as_deref().unwrap_or(DEFAULT_CSS_DIR)
    }

    /// Output format. Absent means the script format; unknown is an error.
    pub fn format(&self) -> Result<Format, ConfigError> {
        match self.format.as_deref() {
            None => Ok(Format::Js),
            Some(name) => name.parse(),
        }
    }
}

/// The parts of the site config file this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub baseurl: Option<String>,
    #[serde(default)]
    pub lunr_settings: Option<SearchSettings>,
}

impl SiteConfig {
    /// Load from a `.json`, `.yml` or `.yaml` file.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content).map_err(|source| BuildError::Json {
                path: path.display().to_string(),
                source,
            })
        } else {
            Self::from_yaml(&content).map_err(|source| BuildError::Yaml {
                path: path.display().to_string(),
                source,
            })
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Artifact encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `var docs = ...` assignments, loadable with a `<script>` tag.
    #[default]
    Js,
    /// A single JSON object.
    Json,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Js => "js",
            Format::Json => "json",
        }
    }

    /// File extension of the artifact; the format name doubles as one.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "js" => Ok(Format::Js),
            "json" => Ok(Format::Json),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment of the build.
///
/// Decides whether inactive items are published: they are hidden only in
/// production so authors can preview them locally. Any name other than
/// `production` (say `staging`) is a non-production build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
    Other(String),
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "development" => Environment::Development,
            "test" => Environment::Test,
            "production" => Environment::Production,
            other => Environment::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
            Environment::Other(name) => name.as_str(),
        })
    }
}

/// Validated configuration for one build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub registry: FieldRegistry,
    pub format: Format,
    pub environment: Environment,
    pub baseurl: Option<String>,
    pub settings: SearchSettings,
}

impl BuildConfig {
    /// Validate everything that can be checked before touching content.
    pub fn new(site: SiteConfig, environment: Environment) -> Result<Self, ConfigError> {
        let settings = site.lunr_settings.ok_or(ConfigError::MissingSettings)?;
        Self::from_settings(settings, site.baseurl, environment)
    }

    pub fn from_settings(
        settings: SearchSettings,
        baseurl: Option<String>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        if settings.collections.is_empty() {
            return Err(ConfigError::NoCollections);
        }
        let registry = FieldRegistry::from_configs(&settings.fields)?;
        let format = settings.format()?;
        Ok(BuildConfig {
            registry,
            format,
            environment,
            baseurl,
            settings,
        })
    }

    /// Override the configured format. The echoed settings follow along.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self.settings.format = Some(format.as_str().to_string());
        self
    }

    /// Artifact location relative to the site output directory.
    pub fn artifact_path(&self) -> PathBuf {
        Path::new(self.settings.js_dir()).join(format!("index.{}", self.format.extension()))
    }
}
