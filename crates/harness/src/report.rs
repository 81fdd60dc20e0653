// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Line-oriented text reports.
//!
//! [`Reporter`] only formats what it is given. It allocates while
//! formatting, so callers invoke it between measurement windows, never
//! inside one.

use crate::{TuningOutcome, WorkloadResult};
use heap_monitor::{Delta, Snapshot};
use reuse_pool::PoolStats;
use std::io::{self, Write};
use workloads::LeakCheckpoint;

const MB: f64 = 1024.0 * 1024.0;

/// Writes human-readable reports to any [`Write`] sink.
///
/// # Example
/// ```
/// use harness::Reporter;
///
/// let mut reporter = Reporter::new(Vec::new());
/// reporter.header("Demo").unwrap();
/// let out = String::from_utf8(reporter.into_inner()).unwrap();
/// assert_eq!(out, "=== Demo ===\n");
/// ```
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Section heading.
    pub fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "=== {title} ===")
    }

    /// Free-form line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Every counter of one snapshot.
    pub fn snapshot(&mut self, label: &str, snap: &Snapshot) -> io::Result<()> {
        self.header(label)?;
        writeln!(self.out, "Collection cycles: {}", snap.collection_count)?;
        writeln!(self.out, "Total pause time: {:?}", snap.cumulative_pause)?;
        writeln!(self.out, "Last pause: {:?}", snap.last_pause)?;
        writeln!(
            self.out,
            "Heap size: {} bytes ({:.2} MB)",
            snap.heap_size_bytes,
            snap.heap_size_mb()
        )?;
        writeln!(self.out, "Heap objects: {}", snap.heap_object_count)?;
        writeln!(
            self.out,
            "Heap allocated: {} bytes ({:.2} MB)",
            snap.heap_allocated_bytes,
            snap.heap_allocated_mb()
        )?;
        writeln!(
            self.out,
            "Total allocated: {} bytes ({:.2} MB)",
            snap.cumulative_allocated_bytes,
            snap.cumulative_allocated_mb()
        )?;
        writeln!(
            self.out,
            "Allocations: {} ({} frees)",
            snap.allocation_count, snap.free_count
        )?;
        writeln!(self.out)
    }

    /// Every field of one delta.
    pub fn delta(&mut self, label: &str, delta: &Delta) -> io::Result<()> {
        self.header(label)?;
        self.delta_fields(delta)?;
        writeln!(self.out)
    }

    /// One workload result.
    pub fn result(&mut self, result: &WorkloadResult) -> io::Result<()> {
        self.header(result.label())?;
        writeln!(self.out, "Iterations: {}", result.iterations())?;
        writeln!(self.out, "Duration: {:?}", result.wall_duration())?;
        self.delta_fields(result.allocation_delta())?;
        writeln!(
            self.out,
            "Allocations per iteration: {:.2}",
            result.allocations_per_iteration()
        )?;
        writeln!(self.out)
    }

    /// Side-by-side table; ratios are relative to the first row.
    pub fn comparison(&mut self, title: &str, results: &[WorkloadResult]) -> io::Result<()> {
        self.header(title)?;
        writeln!(
            self.out,
            "{:<22} {:>10} {:>10} {:>11} {:>10} {:>8} {:>10}",
            "workload", "iterations", "allocs", "allocs/iter", "MB", "cycles", "vs first"
        )?;

        let baseline = results.first();
        for r in results {
            let delta = r.allocation_delta();
            let ratio = match baseline.and_then(|b| r.allocation_ratio(b)) {
                Some(ratio) => format!("{ratio:.4}x"),
                None => "n/a".to_string(),
            };
            writeln!(
                self.out,
                "{:<22} {:>10} {:>10} {:>11.2} {:>10.2} {:>8} {:>10}",
                r.label(),
                r.iterations(),
                delta.allocation_count,
                r.allocations_per_iteration(),
                delta.cumulative_allocated_mb(),
                delta.collection_count,
                ratio,
            )?;
        }
        writeln!(self.out)
    }

    /// Heap samples from a leak run, plus overall growth.
    pub fn leak_checkpoints(&mut self, checkpoints: &[LeakCheckpoint]) -> io::Result<()> {
        self.header("Leak Checkpoints")?;
        for c in checkpoints {
            writeln!(
                self.out,
                "Iteration {} - Heap: {:.2} MB, Footprint: {:.2} MB, Objects: {}",
                c.iteration,
                c.heap_allocated_mb(),
                c.heap_size_bytes as f64 / MB,
                c.heap_object_count,
            )?;
        }
        if let (Some(first), Some(last)) = (checkpoints.first(), checkpoints.last()) {
            let growth = last.heap_allocated_bytes as f64 - first.heap_allocated_bytes as f64;
            let objects = last.heap_object_count as i128 - first.heap_object_count as i128;
            writeln!(
                self.out,
                "Growth across checkpoints: {:+.2} MB, {objects:+} objects",
                growth / MB
            )?;
        }
        writeln!(self.out)
    }

    /// Threshold save/apply/restore and the cycle counts it produced.
    pub fn tuning(&mut self, outcome: &TuningOutcome) -> io::Result<()> {
        self.header("Collector Tuning")?;
        writeln!(self.out, "Threshold before: {}", fmt_threshold(outcome.previous))?;
        if let Some(baseline) = &outcome.baseline {
            let d = baseline.allocation_delta();
            writeln!(
                self.out,
                "At {}: {} cycles, {:?} paused ({})",
                fmt_threshold(outcome.previous),
                d.collection_count,
                d.cumulative_pause,
                baseline.label(),
            )?;
        }
        let d = outcome.result.allocation_delta();
        writeln!(
            self.out,
            "At {}: {} cycles, {:?} paused ({})",
            fmt_threshold(outcome.applied),
            d.collection_count,
            d.cumulative_pause,
            outcome.result.label(),
        )?;
        writeln!(self.out, "Threshold restored: {}", fmt_threshold(outcome.restored))?;
        writeln!(self.out)
    }

    /// One pool's statistics.
    pub fn pool_stats(&mut self, label: &str, stats: &PoolStats) -> io::Result<()> {
        writeln!(self.out, "{label}: {}", stats.summary())
    }

    fn delta_fields(&mut self, delta: &Delta) -> io::Result<()> {
        writeln!(
            self.out,
            "Heap allocations: {} ({} frees)",
            delta.allocation_count, delta.free_count
        )?;
        writeln!(
            self.out,
            "Heap memory allocated: {} bytes",
            delta.cumulative_allocated_bytes
        )?;
        writeln!(
            self.out,
            "Live heap change: {:+} bytes ({:+} objects)",
            delta.heap_allocated_bytes, delta.heap_object_count
        )?;
        writeln!(self.out, "Heap size change: {:+} bytes", delta.heap_size_bytes)?;
        writeln!(self.out, "Collection cycles: {}", delta.collection_count)?;
        writeln!(
            self.out,
            "Pause time: {:?} (last {:?})",
            delta.cumulative_pause, delta.last_pause
        )
    }
}

/// `"50%"`, or `"off"` for a negative threshold.
pub fn fmt_threshold(percent: i32) -> String {
    if percent < 0 {
        "off".to_string()
    } else {
        format!("{percent}%")
    }
}
