// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Measurement windows and the phase sequence.
//!
//! ```text
//! prepare(n)
//!     │
//!     ▼
//! capture()  ─► run(n) (timed) ─►  capture()
//!                                      │
//!                                      ▼
//!                                  release()
//!                                      │
//!                                      ▼
//!                                   diff() → WorkloadResult
//! ```
//!
//! Phases run strictly one after another on the calling thread, and each
//! is reported before the next one starts. Logging and reporting only
//! happen between windows.

use crate::{tuning_experiment, HarnessConfig, HarnessError, Reporter, TuningOutcome, WorkloadResult};
use heap_monitor::{collector, diff, Snapshot, ThresholdGuard};
use std::io::Write;
use std::time::Instant;
use workloads::{
    AllocationHeavy, EscapeProbe, EscapeWorkload, FreshWorkers, Leak, PooledBuffers,
    PooledObjects, ValuePreferring, Workload, WorkloadKind,
};

/// Runs `workload` for `iterations` inside one measurement window.
///
/// Fails on zero iterations, or if the window's snapshots do not diff
/// cleanly.
pub fn measure(
    workload: &mut dyn Workload,
    iterations: usize,
) -> Result<WorkloadResult, HarnessError> {
    if iterations == 0 {
        return Err(HarnessError::Config(format!(
            "workload '{}' needs at least one iteration",
            workload.name()
        )));
    }
    let label = workload.name().to_string();
    tracing::debug!("measuring '{label}' for {iterations} iterations");

    workload.prepare(iterations);
    let before = Snapshot::capture();
    let start = Instant::now();
    workload.run(iterations);
    let wall_duration = start.elapsed();
    let after = Snapshot::capture();
    workload.release();

    let delta = diff(&before, &after)?;
    tracing::debug!("'{label}': {}", delta.summary());
    Ok(WorkloadResult::new(label, iterations, wall_duration, delta))
}

/// Drives every phase and reports to `W`.
#[derive(Debug)]
pub struct Orchestrator<W: Write> {
    config: HarnessConfig,
    reporter: Reporter<W>,
}

impl<W: Write> Orchestrator<W> {
    /// Validates `config` and reports to `out`.
    pub fn new(config: HarnessConfig, out: W) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self {
            config,
            reporter: Reporter::new(out),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the report sink.
    pub fn into_inner(self) -> W {
        self.reporter.into_inner()
    }

    /// Runs the full sequence: initial state, allocation patterns, pooling,
    /// escape probes, tuning, the leak control and the final state.
    ///
    /// If `gc_percent` is configured it is held for the whole sequence and
    /// restored afterwards.
    pub fn run_all(&mut self) -> Result<Vec<WorkloadResult>, HarnessError> {
        let _override = self.config.gc_percent.map(|percent| {
            tracing::info!("applying collector threshold {percent} for this run");
            ThresholdGuard::apply(percent)
        });

        self.reporter.snapshot("Initial State", &Snapshot::read())?;
        self.reporter.snapshot("After Manual Collection", &Snapshot::capture())?;

        let mut results = Vec::new();
        results.extend(self.allocation_phase()?);
        results.extend(self.pool_phase()?);
        results.extend(self.escape_phase()?);
        let outcome = self.tuning_phase()?;
        results.extend(outcome.baseline);
        results.push(outcome.result);
        results.push(self.leak_phase()?);

        self.reporter.snapshot("Final State", &Snapshot::read())?;
        tracing::info!("{} measurement windows complete", results.len());
        Ok(results)
    }

    /// Allocation-heavy versus value-preferring.
    pub fn allocation_phase(&mut self) -> Result<Vec<WorkloadResult>, HarnessError> {
        tracing::info!("phase: allocation patterns");
        let n = self.config.allocation_iterations;

        let heavy = measure(&mut AllocationHeavy::new(), n)?;
        self.reporter.result(&heavy)?;
        let value = measure(&mut ValuePreferring::new(), n)?;
        self.reporter.result(&value)?;

        let results = vec![heavy, value];
        self.reporter.comparison("Allocation Patterns", &results)?;
        Ok(results)
    }

    /// Fresh workers versus pooled workers, then pooled buffers.
    pub fn pool_phase(&mut self) -> Result<Vec<WorkloadResult>, HarnessError> {
        tracing::info!("phase: object pooling");
        let n = self.config.pool_tasks;

        let fresh = measure(&mut FreshWorkers::new(), n)?;
        self.reporter.result(&fresh)?;

        let mut pooled = PooledObjects::new();
        let pooled_result = measure(&mut pooled, n)?;
        self.reporter.result(&pooled_result)?;
        self.reporter.pool_stats("Worker pool", &pooled.stats())?;

        let mut buffers = PooledBuffers::new();
        let buffer_result = measure(&mut buffers, n)?;
        self.reporter.result(&buffer_result)?;
        self.reporter.pool_stats("Buffer pool", &buffers.stats())?;
        self.reporter.line("")?;

        let results = vec![fresh, pooled_result, buffer_result];
        self.reporter.comparison("Object Pooling", &results)?;
        Ok(results)
    }

    /// Each escape probe in its own window.
    pub fn escape_phase(&mut self) -> Result<Vec<WorkloadResult>, HarnessError> {
        self.escape_probes(&EscapeProbe::ALL)
    }

    /// The given escape probes, each in its own window.
    pub fn escape_probes(
        &mut self,
        probes: &[EscapeProbe],
    ) -> Result<Vec<WorkloadResult>, HarnessError> {
        tracing::info!("phase: escape probes");
        let n = self.config.escape_iterations;

        let mut results = Vec::with_capacity(probes.len());
        for &probe in probes {
            let result = measure(&mut EscapeWorkload::new(probe), n)?;
            self.reporter.line(&format!(
                "{:<20} {:>8} allocs  ({})",
                probe.name(),
                result.allocation_delta().allocation_count,
                probe.description()
            ))?;
            results.push(result);
        }
        self.reporter.line("")?;
        self.reporter.comparison("Escape Probes", &results)?;
        Ok(results)
    }

    /// The collector-threshold experiment.
    pub fn tuning_phase(&mut self) -> Result<TuningOutcome, HarnessError> {
        tracing::info!("phase: collector tuning");
        let outcome = tuning_experiment(&self.config)?;
        if !outcome.is_restored() {
            tracing::warn!(
                "threshold changed during the experiment: {} -> {}",
                outcome.previous,
                outcome.restored
            );
        }
        self.reporter.tuning(&outcome)?;
        Ok(outcome)
    }

    /// The unbounded-growth control, with its checkpoints.
    pub fn leak_phase(&mut self) -> Result<WorkloadResult, HarnessError> {
        tracing::info!("phase: leak simulation");
        let leak_config = &self.config.leak;
        let mut leak = Leak::new(leak_config.chunk_bytes, leak_config.checkpoint_every);

        let result = measure(&mut leak, leak_config.iterations)?;
        self.reporter.leak_checkpoints(leak.checkpoints())?;
        self.reporter.result(&result)?;
        Ok(result)
    }

    /// A single workload by kind, at its configured iteration count.
    pub fn single(&mut self, kind: WorkloadKind) -> Result<WorkloadResult, HarnessError> {
        let mut workload = self.config.create_workload(kind);
        let result = measure(workload.as_mut(), self.config.iterations_for(kind))?;
        self.reporter.result(&result)?;
        Ok(result)
    }

    /// Current counters and collector settings, without forcing a cycle.
    pub fn status(&mut self) -> Result<Snapshot, HarnessError> {
        let snap = Snapshot::read();
        self.reporter.snapshot("Current State", &snap)?;
        self.reporter.line(&format!(
            "Collector threshold: {}",
            crate::report::fmt_threshold(collector::threshold())
        ))?;
        self.reporter
            .line(&format!("Next collection at: {} bytes live", collector::next_goal()))?;
        self.reporter.line(&format!(
            "Counting allocator installed: {}",
            heap_monitor::is_installed()
        ))?;
        Ok(snap)
    }
}
