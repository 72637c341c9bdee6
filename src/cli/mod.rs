// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lunrdex command-line interface.
//!
//! Two subcommands: `index` builds the search artifact from a site config and
//! a content directory, `inspect` decodes an existing artifact and prints what
//! is inside.

pub mod display;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lunrdex",
    about = "Build-time search index generator for lunr.js sites",
    version
)]
pub struct Cli {
    /// Log per-item detail (same as RUST_LOG=lunrdex=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search artifact
    Index {
        /// Site config file with a lunr_settings section (.yml, .yaml or .json)
        #[arg(short, long, default_value = "_config.yml")]
        config: PathBuf,

        /// Input directory containing manifest.json and item files
        #[arg(short, long)]
        input: PathBuf,

        /// Site output directory; the artifact goes under its js_dir
        #[arg(short, long)]
        output: PathBuf,

        /// Build environment (development, test, production, or any other name)
        ///
        /// Items with `recordstatus: inactive` are left out only in production.
        #[arg(long = "env", env = "JEKYLL_ENV", default_value = "development")]
        environment: String,

        /// Artifact format (json or js), overriding lunr_settings.format
        #[arg(long)]
        format: Option<String>,
    },

    /// Inspect a built artifact
    Inspect {
        /// Path to index.json or index.js
        file: PathBuf,
    },
}
