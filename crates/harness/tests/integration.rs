// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full phase sequence end to end.
//!
//! These run the orchestrator with small iteration counts and check the
//! report it writes, proving the four crates compose.

use harness::{HarnessConfig, LeakConfig, Orchestrator, TuningConfig};
use heap_monitor::collector;
use serial_test::serial;
use workloads::WorkloadKind;

// ── Helpers ────────────────────────────────────────────────────

fn small_config() -> HarnessConfig {
    HarnessConfig {
        allocation_iterations: 200,
        pool_tasks: 100,
        escape_iterations: 50,
        gc_percent: None,
        leak: LeakConfig {
            iterations: 50,
            chunk_bytes: 1024,
            checkpoint_every: 10,
        },
        tuning: TuningConfig {
            threshold: 50,
            workload: WorkloadKind::Pressure,
            iterations: 20,
            chunk_bytes: 4096,
            collect_every: 5,
        },
    }
}

fn run_all(config: HarnessConfig) -> (usize, String) {
    let mut orch = Orchestrator::new(config, Vec::new()).unwrap();
    let results = orch.run_all().unwrap();
    let out = String::from_utf8(orch.into_inner()).unwrap();
    (results.len(), out)
}

// ── Full sequence ──────────────────────────────────────────────

#[test]
#[serial]
fn test_run_all_reports_every_phase() {
    let (windows, out) = run_all(small_config());

    // 2 allocation + 3 pooling + 5 escape + 2 tuning + 1 leak.
    assert_eq!(windows, 13);

    let sections = [
        "=== Initial State ===",
        "=== After Manual Collection ===",
        "=== Allocation Patterns ===",
        "=== Object Pooling ===",
        "=== Escape Probes ===",
        "=== Collector Tuning ===",
        "=== Leak Checkpoints ===",
        "=== Final State ===",
    ];
    let mut last = 0;
    for section in sections {
        let at = out[last..]
            .find(section)
            .unwrap_or_else(|| panic!("missing or out of order: {section}"));
        last += at + section.len();
    }

    assert!(out.contains("Worker pool: Pool:"));
    assert!(out.contains("Buffer pool: Pool:"));
    assert!(out.contains("Iteration 40 - Heap:"));
}

#[test]
#[serial]
fn test_run_all_restores_threshold() {
    let before = collector::threshold();
    run_all(small_config());
    assert_eq!(collector::threshold(), before);
}

#[test]
#[serial]
fn test_gc_percent_held_for_run_only() {
    let before = collector::threshold();
    let config = HarnessConfig {
        gc_percent: Some(-1),
        ..small_config()
    };
    let (_, out) = run_all(config);

    assert!(out.contains("Threshold before: off"));
    assert_eq!(collector::threshold(), before);
}

#[test]
#[serial]
fn test_manual_collection_advances_cycles() {
    let (_, out) = run_all(small_config());

    let cycles: Vec<u32> = out
        .lines()
        .filter_map(|line| line.strip_prefix("Collection cycles: "))
        .take(2)
        .map(|n| n.trim().parse().unwrap())
        .collect();
    assert_eq!(cycles.len(), 2);
    assert!(cycles[1].wrapping_sub(cycles[0]) >= 1);
}

// ── Single phases ──────────────────────────────────────────────

#[test]
#[serial]
fn test_single_workload() {
    let mut orch = Orchestrator::new(small_config(), Vec::new()).unwrap();
    let result = orch.single(WorkloadKind::PooledBuffers).unwrap();
    assert_eq!(result.label(), "pooled-buffers");
    assert_eq!(result.iterations(), 100);

    let out = String::from_utf8(orch.into_inner()).unwrap();
    assert!(out.contains("=== pooled-buffers ==="));
}

#[test]
#[serial]
fn test_escape_subset() {
    let mut orch = Orchestrator::new(small_config(), Vec::new()).unwrap();
    let results = orch
        .escape_probes(&[workloads::EscapeProbe::TypeErased])
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label(), "type-erased");
}
