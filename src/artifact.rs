// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search artifact: stored documents, compiled index, base URL and the
//! echoed settings, written either as one JSON object or as a script that
//! declares four globals.
//!
//! ```text
//! json:  {"docs":{...},"index":{...},"baseurl":"/site","lunr_settings":{...}}
//!
//! js:    var docs = {...}
//!        var index = {...}
//!        var baseurl = "/site"
//!        var lunr_settings = {...}
//! ```
//!
//! The script form has no trailing newline. A missing base URL is `null` in
//! both forms.

use serde::{Deserialize, Serialize};

use crate::config::{Format, SearchSettings};
use crate::engine::CompiledIndex;
use crate::error::ArtifactError;
use crate::types::DocStore;

/// Everything the client-side search needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub docs: DocStore,
    pub index: CompiledIndex,
    pub baseurl: Option<String>,
    pub lunr_settings: SearchSettings,
}

const DOCS: &str = "docs";
const INDEX: &str = "index";
const BASEURL: &str = "baseurl";
const LUNR_SETTINGS: &str = "lunr_settings";

fn assignment(name: &str, json: &str) -> String {
    format!("var {} = {}", name, json)
}

/// Serialize an artifact in the given format.
pub fn encode(artifact: &Artifact, format: Format) -> Result<Vec<u8>, ArtifactError> {
    match format {
        Format::Json => Ok(serde_json::to_vec(artifact)?),
        Format::Js => {
            let lines = [
                assignment(DOCS, &serde_json::to_string(&artifact.docs)?),
                assignment(INDEX, &serde_json::to_string(&artifact.index)?),
                assignment(BASEURL, &serde_json::to_string(&artifact.baseurl)?),
                assignment(LUNR_SETTINGS, &serde_json::to_string(&artifact.lunr_settings)?),
            ];
            Ok(lines.join("\n").into_bytes())
        }
    }
}

/// Which format some artifact bytes are in.
pub fn detect_format(bytes: &[u8]) -> Format {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'{') {
        Format::Json
    } else {
        Format::Js
    }
}

/// Parse artifact bytes in either format.
pub fn decode(bytes: &[u8]) -> Result<Artifact, ArtifactError> {
    match detect_format(bytes) {
        Format::Json => Ok(serde_json::from_slice(bytes)?),
        Format::Js => decode_script(bytes),
    }
}

fn decode_script(bytes: &[u8]) -> Result<Artifact, ArtifactError> {
    let text = String::from_utf8_lossy(bytes);
    let mut docs = None;
    let mut index = None;
    let mut baseurl = None;
    let mut lunr_settings = None;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let (name, json) = line
            .strip_prefix("var ")
            .and_then(|rest| rest.split_once(" = "))
            .ok_or_else(|| ArtifactError::UnexpectedLine(preview(line)))?;
        match name {
            DOCS => docs = Some(serde_json::from_str(json)?),
            INDEX => index = Some(serde_json::from_str(json)?),
            BASEURL => baseurl = Some(serde_json::from_str(json)?),
            LUNR_SETTINGS => lunr_settings = Some(serde_json::from_str(json)?),
            _ => return Err(ArtifactError::UnexpectedLine(preview(line))),
        }
    }

    Ok(Artifact {
        docs: docs.ok_or(ArtifactError::MissingAssignment(DOCS))?,
        index: index.ok_or(ArtifactError::MissingAssignment(INDEX))?,
        baseurl: baseurl.ok_or(ArtifactError::MissingAssignment(BASEURL))?,
        lunr_settings: lunr_settings.ok_or(ArtifactError::MissingAssignment(LUNR_SETTINGS))?,
    })
}

fn preview(line: &str) -> String {
    line.chars().take(60).collect()
}
