// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lunrdex::{artifact, run_build, Environment, Format};

mod cli;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "lunrdex=debug" } else { "lunrdex=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Index {
            config,
            input,
            output,
            environment,
            format,
        } => {
            let environment: Environment = environment.parse()?;
            let format = format
                .map(|name| name.parse::<Format>())
                .transpose()?;
            let report = run_build(&config, &input, &output, environment, format)
                .with_context(|| format!("building index from {}", input.display()))?;
            for path in &report.generated {
                println!("{}", output.join(path).display());
            }
        }
        Commands::Inspect { file } => {
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let format = artifact::detect_format(&bytes);
            let decoded = artifact::decode(&bytes)
                .with_context(|| format!("decoding {}", file.display()))?;
            for line in cli::inspect::summary(&decoded, format, bytes.len()) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}
