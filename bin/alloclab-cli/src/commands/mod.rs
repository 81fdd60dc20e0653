// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared setup.

pub mod allocation;
pub mod escape;
pub mod gc;
pub mod pool;
pub mod run;
pub mod status;
pub mod workload;

use anyhow::Context;
use harness::{HarnessConfig, Orchestrator};
use std::io::{Stdout, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the TOML config at `path`, or the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<HarnessConfig> {
    match path {
        Some(path) => {
            let config = HarnessConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(HarnessConfig::default()),
    }
}

/// Builds an orchestrator writing to stdout.
pub fn orchestrator(config: HarnessConfig) -> anyhow::Result<Orchestrator<Stdout>> {
    Ok(Orchestrator::new(config, std::io::stdout())?)
}

/// Prints the boxed title used by every command.
pub fn banner(title: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "╔══════════════════════════════════════════════════════╗")?;
    writeln!(out, "║ {:^52} ║", format!("alloclab · {title}"))?;
    writeln!(out, "╚══════════════════════════════════════════════════════╝")?;
    writeln!(out)?;
    Ok(())
}
