// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Collector-threshold experiment.
//!
//! Measures the configured workload once at the threshold currently in
//! force, then again under the experimental threshold. The experimental
//! value is held by a [`ThresholdGuard`], so the previous threshold is back
//! in place before this function returns, whether the measurement
//! succeeded or not.

use crate::{measure, HarnessConfig, HarnessError, WorkloadResult};
use heap_monitor::{collector, ThresholdGuard};

/// What a tuning experiment observed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TuningOutcome {
    /// Threshold in force before the experiment.
    pub previous: i32,
    /// Experimental threshold.
    pub applied: i32,
    /// Threshold read back after the guard was dropped.
    pub restored: i32,
    /// The workload measured at the previous threshold.
    pub baseline: Option<WorkloadResult>,
    /// The workload measured at the experimental threshold.
    pub result: WorkloadResult,
}

impl TuningOutcome {
    /// Returns `true` if the threshold ended where it started.
    pub fn is_restored(&self) -> bool {
        self.previous == self.restored
    }
}

/// Runs the tuning experiment described by `config.tuning`.
pub fn tuning_experiment(config: &HarnessConfig) -> Result<TuningOutcome, HarnessError> {
    let tuning = &config.tuning;
    let iterations = tuning.iterations;

    let mut workload = config.create_workload(tuning.workload);
    let baseline = measure(workload.as_mut(), iterations)?;

    let mut workload = config.create_workload(tuning.workload);
    let (previous, applied, measured) = {
        let guard = ThresholdGuard::apply(tuning.threshold);
        tracing::info!(
            "threshold {} -> {} for '{}'",
            guard.previous(),
            guard.applied(),
            tuning.workload
        );
        let measured = measure(workload.as_mut(), iterations);
        (guard.previous(), guard.applied(), measured)
    };
    let restored = collector::threshold();
    tracing::info!("threshold restored to {restored}");

    Ok(TuningOutcome {
        previous,
        applied,
        restored,
        baseline: Some(baseline),
        result: measured?,
    })
}
