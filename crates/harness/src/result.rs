// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-workload measurement results.
//!
//! A [`WorkloadResult`] is produced once by [`measure`](crate::measure) and
//! read-only afterwards. Results are the unit the reporter compares.

use heap_monitor::Delta;
use std::time::Duration;

/// The outcome of one measurement window.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkloadResult {
    label: String,
    iterations: usize,
    wall_duration: Duration,
    allocation_delta: Delta,
}

impl WorkloadResult {
    pub(crate) fn new(
        label: String,
        iterations: usize,
        wall_duration: Duration,
        allocation_delta: Delta,
    ) -> Self {
        Self {
            label,
            iterations,
            wall_duration,
            allocation_delta,
        }
    }

    /// Name of the measured workload.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Wall-clock time spent in `run`, excluding the captures.
    pub fn wall_duration(&self) -> Duration {
        self.wall_duration
    }

    /// Counter differences across the window.
    pub fn allocation_delta(&self) -> &Delta {
        &self.allocation_delta
    }

    /// Heap allocations per iteration.
    pub fn allocations_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.allocation_delta.allocation_count as f64 / self.iterations as f64
    }

    /// Allocation count of `self` divided by that of `baseline`.
    ///
    /// Returns `None` when the baseline did not allocate.
    pub fn allocation_ratio(&self, baseline: &WorkloadResult) -> Option<f64> {
        let base = baseline.allocation_delta.allocation_count;
        (base > 0).then(|| self.allocation_delta.allocation_count as f64 / base as f64)
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} iterations in {:.2}ms, {} allocs ({:.2}/iter), {:.2} MB allocated, {} cycles",
            self.label,
            self.iterations,
            self.wall_duration.as_secs_f64() * 1000.0,
            self.allocation_delta.allocation_count,
            self.allocations_per_iteration(),
            self.allocation_delta.cumulative_allocated_mb(),
            self.allocation_delta.collection_count,
        )
    }
}
