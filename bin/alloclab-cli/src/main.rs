// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # alloclab
//!
//! Command-line runner for the allocation measurement harness.
//!
//! ## Usage
//! ```bash
//! # Full demonstration sequence (the default)
//! alloclab
//! alloclab run --gc-percent 200
//!
//! # Single phases
//! alloclab allocation --iterations 1000
//! alloclab pool --tasks 5000
//! alloclab escape --probe type-erased --probe by-value
//! alloclab gc --threshold 25
//! alloclab workload leak --iterations 200
//!
//! # Counters and collector settings
//! alloclab status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use workloads::{EscapeProbe, WorkloadKind};

#[derive(Parser)]
#[command(
    name = "alloclab",
    about = "Measures allocation and collector behaviour of contrasting workloads",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every phase once (default when no command is given).
    Run {
        /// Collector threshold held for the whole run; negative disables
        /// automatic collection.
        #[arg(long, allow_negative_numbers = true)]
        gc_percent: Option<i32>,
    },

    /// Compare allocation-heavy and value-preferring workloads.
    Allocation {
        /// Iterations per workload.
        #[arg(short, long)]
        iterations: Option<usize>,
    },

    /// Compare fresh workers, pooled workers and pooled buffers.
    Pool {
        /// Tasks per workload.
        #[arg(short, long)]
        tasks: Option<usize>,
    },

    /// Run the escape-classification probes.
    Escape {
        /// Iterations per probe.
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Probe to run (repeatable); all probes when omitted.
        #[arg(short, long)]
        probe: Vec<EscapeProbe>,
    },

    /// Collector tuning experiment followed by the leak control.
    Gc {
        /// Experimental threshold; negative disables automatic collection.
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i32>,

        /// Workload measured under the experimental threshold.
        #[arg(short, long)]
        workload: Option<WorkloadKind>,

        /// Iterations for the tuning workload.
        #[arg(short, long)]
        iterations: Option<usize>,
    },

    /// Measure one workload.
    Workload {
        /// Workload name (e.g., allocation-heavy, pooled-objects, leak).
        kind: WorkloadKind,

        /// Iterations; defaults to the configured count for this workload.
        #[arg(short, long)]
        iterations: Option<usize>,
    },

    /// Display current allocator and collector state.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { gc_percent: None }) {
        Commands::Run { gc_percent } => commands::run::execute(config, gc_percent),
        Commands::Allocation { iterations } => commands::allocation::execute(config, iterations),
        Commands::Pool { tasks } => commands::pool::execute(config, tasks),
        Commands::Escape { iterations, probe } => {
            commands::escape::execute(config, iterations, probe)
        }
        Commands::Gc {
            threshold,
            workload,
            iterations,
        } => commands::gc::execute(config, threshold, workload, iterations),
        Commands::Workload { kind, iterations } => {
            commands::workload::execute(config, kind, iterations)
        }
        Commands::Status => commands::status::execute(config),
    }
}
