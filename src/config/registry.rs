// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The field spec registry: validated, immutable field configuration.
//!
//! Several specs may feed the same searchfield (say, `title` and `subtitle`
//! both into `title`). The index registers each searchfield once, in order of
//! first appearance. If the specs disagree on boost, the last one wins and a
//! warning is logged.

use indexmap::IndexMap;
use tracing::warn;

use super::FieldSpecConfig;
use crate::error::ConfigError;

/// Boost applied when a spec does not set one.
pub const DEFAULT_BOOST: f64 = 1.0;

/// How a field's value is derived from an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Read the field as is.
    None,
    /// Flatten a mapping's values into one sequence.
    Flatten,
    /// Collect the field from items of another collection that point back
    /// at this item through `matchfield`.
    Relational {
        collection: String,
        matchfield: String,
        secondaryfield: Option<String>,
    },
    /// Read the field from the parent structure(s) under `parentfield`.
    Nested { parentfield: String },
}

impl Widget {
    pub fn name(&self) -> &'static str {
        match self {
            Widget::None => "none",
            Widget::Flatten => "flatten",
            Widget::Relational { .. } => "relational",
            Widget::Nested { .. } => "nested",
        }
    }

    fn parse(index: usize, searchfield: &str, raw: &FieldSpecConfig) -> Result<Self, ConfigError> {
        let required = |value: &Option<String>, key: &'static str| {
            value.clone().ok_or(ConfigError::MissingKey { index, key })
        };
        match raw.widget.as_deref() {
            None | Some("none") => Ok(Widget::None),
            Some("flatten") => Ok(Widget::Flatten),
            Some("relational") => Ok(Widget::Relational {
                collection: required(&raw.collection, "collection")?,
                matchfield: required(&raw.matchfield, "matchfield")?,
                secondaryfield: raw.secondaryfield.clone(),
            }),
            Some("nested") => Ok(Widget::Nested {
                parentfield: required(&raw.parentfield, "parentfield")?,
            }),
            Some(other) => Err(ConfigError::UnknownWidget {
                searchfield: searchfield.to_string(),
                widget: other.to_string(),
            }),
        }
    }
}

/// One validated field spec.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub searchfield: String,
    pub jekyllfields: Vec<String>,
    pub widget: Widget,
    pub boost: f64,
}

impl FieldSpec {
    /// Validate a raw descriptor. `index` is its position in the config list.
    pub fn from_config(index: usize, raw: &FieldSpecConfig) -> Result<Self, ConfigError> {
        let searchfield = raw
            .searchfield
            .clone()
            .ok_or(ConfigError::MissingKey { index, key: "searchfield" })?;
        let jekyllfields = raw
            .jekyllfields
            .clone()
            .ok_or(ConfigError::MissingKey { index, key: "jekyllfields" })?;
        if jekyllfields.is_empty() {
            return Err(ConfigError::EmptyJekyllFields { searchfield });
        }

        let boost = match &raw.boost {
            None => DEFAULT_BOOST,
            Some(n) => n.as_f64().unwrap_or(f64::NAN),
        };
        if !(boost.is_finite() && boost > 0.0) {
            return Err(ConfigError::InvalidBoost { searchfield, boost });
        }

        let widget = Widget::parse(index, &searchfield, raw)?;
        Ok(FieldSpec {
            searchfield,
            jekyllfields,
            widget,
            boost,
        })
    }
}

/// All field specs, plus the index fields they register.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRegistry {
    specs: Vec<FieldSpec>,
    boosts: IndexMap<String, f64>,
}

impl FieldRegistry {
    pub fn from_configs(configs: &[FieldSpecConfig]) -> Result<Self, ConfigError> {
        let specs = configs
            .iter()
            .enumerate()
            .map(|(index, raw)| FieldSpec::from_config(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_specs(specs))
    }

    pub fn from_specs(specs: Vec<FieldSpec>) -> Self {
        let mut boosts: IndexMap<String, f64> = IndexMap::new();
        for spec in &specs {
            if let Some(previous) = boosts.insert(spec.searchfield.clone(), spec.boost) {
                if previous != spec.boost {
                    warn!(
                        field = %spec.searchfield,
                        previous,
                        boost = spec.boost,
                        "conflicting boosts for searchfield; last one wins"
                    );
                }
            }
        }
        FieldRegistry { specs, boosts }
    }

    /// Specs in configuration order.
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Distinct searchfields in first-appearance order with effective boosts.
    pub fn index_fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.boosts.iter().map(|(name, boost)| (name.as_str(), *boost))
    }

    pub fn boost(&self, searchfield: &str) -> Option<f64> {
        self.boosts.get(searchfield).copied()
    }

    /// Collections named by relational widgets.
    pub fn related_collections(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().filter_map(|spec| match &spec.widget {
            Widget::Relational { collection, .. } => Some(collection.as_str()),
            _ => None,
        })
    }
}
