// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # harness
//!
//! Runs workloads inside measurement windows and reports what the
//! allocator and collector counters saw.
//!
//! The harness takes:
//! - [`Workload`](workloads::Workload)s from `workloads`.
//! - Snapshots and deltas from `heap-monitor`.
//! - Pool statistics from `reuse-pool`.
//!
//! and runs them phase by phase on a single thread, reporting each phase
//! before starting the next.
//!
//! # Example
//! ```no_run
//! use harness::{HarnessConfig, Orchestrator};
//!
//! let mut orch = Orchestrator::new(HarnessConfig::default(), std::io::stdout())?;
//! let results = orch.run_all()?;
//! println!("{} windows measured", results.len());
//! # Ok::<(), harness::HarnessError>(())
//! ```

mod config;
mod error;
mod orchestrator;
pub mod report;
mod result;
mod tuning;

pub use config::{HarnessConfig, LeakConfig, TuningConfig};
pub use error::HarnessError;
pub use orchestrator::{measure, Orchestrator};
pub use report::Reporter;
pub use result::WorkloadResult;
pub use tuning::{tuning_experiment, TuningOutcome};
