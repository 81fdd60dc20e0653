// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Measurement properties, checked against the real counting allocator.
//!
//! Every test here reads process-wide counters, so all of them run under
//! `#[serial]`. Bounds carry a small tolerance for allocations made by the
//! test runner's own threads.

use harness::{measure, tuning_experiment, HarnessConfig, TuningConfig};
use heap_monitor::{collector, diff, MonitorError, Snapshot, ThresholdGuard};
use serial_test::serial;
use workloads::{
    AllocationHeavy, EscapeProbe, EscapeWorkload, FreshWorkers, Leak, PooledObjects, Pressure,
    ValuePreferring, Workload, WorkloadKind,
};

const NOISE: u64 = 8;

fn allocs(workload: &mut dyn Workload, iterations: usize) -> u64 {
    measure(workload, iterations)
        .unwrap()
        .allocation_delta()
        .allocation_count
}

#[test]
fn allocator_is_installed() {
    assert!(heap_monitor::is_installed());
}

// ── Capture ────────────────────────────────────────────────────

#[test]
#[serial]
fn consecutive_captures_differ_by_one_cycle() {
    let before = Snapshot::capture();
    let after = Snapshot::capture();
    let delta = diff(&before, &after).unwrap();

    assert_eq!(delta.collection_count, 1);
    assert!(delta.allocation_count <= NOISE, "{}", delta.summary());
    assert!(after.cumulative_pause >= before.cumulative_pause);
}

#[test]
#[serial]
fn misordered_snapshots_are_rejected() {
    let first = Snapshot::capture();
    let second = Snapshot::capture();
    let err = diff(&second, &first).unwrap_err();
    assert!(matches!(err, MonitorError::MisorderedSnapshots { .. }));
}

// ── Allocation patterns ────────────────────────────────────────

#[test]
#[serial]
fn heavy_allocates_more_than_value_for_every_n() {
    for n in [1, 10, 100, 1000] {
        let heavy = allocs(&mut AllocationHeavy::new(), n);
        let value = allocs(&mut ValuePreferring::new(), n);
        assert!(heavy > value, "n={n}: heavy={heavy} value={value}");
    }
}

#[test]
#[serial]
fn thousand_iterations_order_of_magnitude() {
    let heavy = allocs(&mut AllocationHeavy::new(), 1000);
    let value = allocs(&mut ValuePreferring::new(), 1000);

    assert!(heavy >= 4000, "heavy={heavy}");
    assert!(value < 10, "value={value}");
}

// ── Pooling ────────────────────────────────────────────────────

#[test]
#[serial]
fn warm_pool_allocates_no_more_than_heavy() {
    let mut pooled = PooledObjects::new();
    pooled.run(10);

    let n = 1000;
    let pooled_allocs = allocs(&mut pooled, n);
    let heavy = allocs(&mut AllocationHeavy::new(), n);
    assert!(pooled_allocs <= heavy);
    assert!(pooled_allocs <= NOISE, "pooled={pooled_allocs}");
    assert_eq!(pooled.stats().creations, 1);
}

#[test]
#[serial]
fn fresh_workers_allocate_per_task() {
    let n = 500;
    let fresh = allocs(&mut FreshWorkers::new(), n);
    let pooled = allocs(&mut PooledObjects::new(), n);

    assert!(fresh >= 3 * n as u64, "fresh={fresh}");
    assert!(pooled < fresh / 10, "pooled={pooled} fresh={fresh}");
}

// ── Escape probes ──────────────────────────────────────────────

#[test]
#[serial]
fn escape_probe_relative_counts() {
    let n = 1000;
    let count = |probe| allocs(&mut EscapeWorkload::new(probe), n);

    let by_value = count(EscapeProbe::ByValue);
    let returned = count(EscapeProbe::ReturnedReference);
    let stored = count(EscapeProbe::StoredInContainer);
    let erased = count(EscapeProbe::TypeErased);
    let oversized = count(EscapeProbe::OversizedAggregate);

    assert!(by_value <= NOISE);
    assert!(oversized <= NOISE);
    assert!(returned >= n as u64);
    assert!(erased >= n as u64);
    assert!(stored >= returned);
}

// ── Leak control ───────────────────────────────────────────────

#[test]
#[serial]
fn leak_checkpoints_never_shrink() {
    let mut leak = Leak::new(10 * 1024, 50);
    let result = measure(&mut leak, 500).unwrap();

    let checkpoints = leak.checkpoints();
    assert_eq!(checkpoints.len(), 10);
    for pair in checkpoints.windows(2) {
        assert!(pair[1].heap_size_bytes >= pair[0].heap_size_bytes);
        assert!(pair[1].heap_allocated_bytes >= pair[0].heap_allocated_bytes);
    }
    assert!(result.allocation_delta().cumulative_allocated_bytes >= 500 * 10 * 1024);
}

#[test]
#[serial]
fn leak_footprint_tracks_leak_after_heavy_phase() {
    measure(&mut Pressure::new(64 * 1024, 100), 300).unwrap();

    let mut leak = Leak::default();
    measure(&mut leak, 1000).unwrap();

    let checkpoints = leak.checkpoints();
    assert_eq!(checkpoints.len(), 10);
    for pair in checkpoints.windows(2) {
        assert!(
            pair[1].heap_size_bytes >= pair[0].heap_size_bytes,
            "heap size fell at iteration {}",
            pair[1].iteration
        );
    }
    let first = checkpoints[0].heap_size_bytes;
    let last = checkpoints[checkpoints.len() - 1].heap_size_bytes;
    assert!(last - first >= 800 * 10 * 1024);
}

#[test]
#[serial]
fn leak_grows_live_heap_inside_window() {
    let mut leak = Leak::new(4096, 0);
    leak.prepare(100);
    let before = Snapshot::capture();
    leak.run(100);
    let after = Snapshot::capture();
    let delta = diff(&before, &after).unwrap();
    leak.release();

    assert!(delta.heap_allocated_bytes >= 100 * 4096);
    assert!(delta.heap_object_count >= 100);
}

// ── Tuning ─────────────────────────────────────────────────────

fn small_tuning(workload: WorkloadKind) -> HarnessConfig {
    HarnessConfig {
        tuning: TuningConfig {
            threshold: 25,
            workload,
            iterations: 50,
            chunk_bytes: 4096,
            collect_every: 10,
        },
        ..Default::default()
    }
}

#[test]
#[serial]
fn tuning_restores_threshold() {
    let before = collector::threshold();
    let outcome = tuning_experiment(&small_tuning(WorkloadKind::Pressure)).unwrap();

    assert_eq!(collector::threshold(), before);
    assert_eq!(outcome.previous, before);
    assert_eq!(outcome.applied, 25);
    assert!(outcome.is_restored());
    assert!(outcome.result.allocation_delta().collection_count >= 5);
}

#[test]
#[serial]
fn tuning_restores_nested_override() {
    let _outer = ThresholdGuard::apply(300);
    tuning_experiment(&small_tuning(WorkloadKind::AllocationHeavy)).unwrap();
    assert_eq!(collector::threshold(), 300);
}
