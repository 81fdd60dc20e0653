// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Emulated collector: cycle accounting, pacing and the global threshold.
//!
//! Rust frees memory deterministically on drop, so this collector never
//! reclaims anything itself. What it does maintain is the bookkeeping a
//! managed runtime exposes:
//!
//! - a cycle counter (32-bit, wraps like any hardware counter),
//! - cumulative pause time plus a 256-entry ring of recent pauses,
//! - a pacing goal derived from the **threshold**: once live heap bytes
//!   exceed `live_at_last_cycle * (100 + threshold) / 100` the allocator
//!   triggers an automatic cycle,
//! - the retained heap footprint. An automatic cycle only folds the window
//!   peak into it, so it never shrinks while a workload runs; a forced
//!   [`collect`] scavenges it down to the current live size.
//!
//! The threshold is process-wide mutable state. Experiments change it
//! through a [`ThresholdGuard`], which restores the previous value when
//! dropped, on every exit path.
//!
//! # Last-pause quirk
//! The most recent pause is read from `ring[(cycles + 255) % 256]`. Before
//! the first cycle this slot has never been written and reads as zero,
//! indistinguishable from a zero-length pause.

use crate::allocator::COUNTERS;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Threshold in effect when the process starts.
pub const DEFAULT_THRESHOLD: i32 = 100;

/// Number of pause durations kept in the ring.
pub const PAUSE_RING_LEN: usize = 256;

/// Smallest pacing goal, so tiny heaps are not collected constantly.
pub const MIN_HEAP_GOAL: u64 = 4 * 1024 * 1024;

static THRESHOLD: AtomicI32 = AtomicI32::new(DEFAULT_THRESHOLD);
static NEXT_GOAL: AtomicU64 = AtomicU64::new(MIN_HEAP_GOAL);
static LIVE_AT_LAST_CYCLE: AtomicU64 = AtomicU64::new(0);
static LAST_CYCLE_PEAK: AtomicU64 = AtomicU64::new(0);
static CYCLES: AtomicU32 = AtomicU32::new(0);
static PAUSE_TOTAL_NS: AtomicU64 = AtomicU64::new(0);
static PAUSE_RING: [AtomicU64; PAUSE_RING_LEN] = [const { AtomicU64::new(0) }; PAUSE_RING_LEN];
static COLLECTING: AtomicBool = AtomicBool::new(false);

/// Returns the current collector threshold as a percentage.
///
/// A negative value means automatic collection is off; explicit
/// [`collect`] calls still run.
pub fn threshold() -> i32 {
    THRESHOLD.load(Ordering::Acquire)
}

/// Sets the collector threshold and returns the previous value.
///
/// Affects every subsequent allocation in the process, not just the
/// caller's. Prefer [`ThresholdGuard`] for experiments.
pub fn set_threshold(percent: i32) -> i32 {
    let previous = THRESHOLD.swap(percent, Ordering::AcqRel);
    let live = LIVE_AT_LAST_CYCLE.load(Ordering::Acquire);
    NEXT_GOAL.store(goal_for(live, percent), Ordering::Release);
    previous
}

/// Forces a synchronous collector cycle.
///
/// Blocks until this call's own cycle has completed; if an automatic cycle
/// is in progress on another thread, waits for it first. Never times out.
pub fn collect() {
    while !try_cycle(Cycle::Forced) {
        std::hint::spin_loop();
        std::thread::yield_now();
    }
}

/// Number of completed cycles (wraps at `u32::MAX`).
pub fn cycles() -> u32 {
    CYCLES.load(Ordering::Acquire)
}

/// Sum of all pause durations.
pub fn pause_total() -> Duration {
    Duration::from_nanos(PAUSE_TOTAL_NS.load(Ordering::Acquire))
}

/// Most recent pause, read from the ring. Zero before the first cycle.
pub fn last_pause() -> Duration {
    last_pause_for(cycles())
}

/// Live heap size that will trigger the next automatic cycle.
/// `u64::MAX` while automatic collection is off.
pub fn next_goal() -> u64 {
    NEXT_GOAL.load(Ordering::Acquire)
}

/// Footprint retained by the heap: the high-water mark since the last
/// forced cycle, or the current window's peak if it is already larger.
pub(crate) fn heap_footprint() -> u64 {
    LAST_CYCLE_PEAK
        .load(Ordering::Acquire)
        .max(COUNTERS.peak_live_bytes.load(Ordering::Acquire))
}

pub(crate) fn last_pause_for(cycles: u32) -> Duration {
    let slot = ring_slot(cycles);
    Duration::from_nanos(PAUSE_RING[slot].load(Ordering::Acquire))
}

/// Ring index holding the pause of the most recent cycle.
fn ring_slot(cycles: u32) -> usize {
    (cycles as usize + PAUSE_RING_LEN - 1) % PAUSE_RING_LEN
}

/// Called by the allocator after every allocation. Runs an automatic cycle
/// if the pacing goal has been crossed and no other cycle is running.
pub(crate) fn pace(live_bytes: u64) {
    if live_bytes > NEXT_GOAL.load(Ordering::Relaxed) && threshold() >= 0 {
        try_cycle(Cycle::Automatic);
    }
}

fn goal_for(live_bytes: u64, percent: i32) -> u64 {
    if percent < 0 {
        return u64::MAX;
    }
    let growth = live_bytes.saturating_mul(percent as u64) / 100;
    live_bytes.saturating_add(growth).max(MIN_HEAP_GOAL)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cycle {
    /// Triggered by the pacer; keeps the footprint high-water mark.
    Automatic,
    /// Requested through [`collect`]; scavenges the footprint.
    Forced,
}

/// Runs one cycle unless another is already in progress.
fn try_cycle(kind: Cycle) -> bool {
    if COLLECTING
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return false;
    }

    let start = Instant::now();

    let live = COUNTERS.live_bytes.load(Ordering::Acquire);
    let window_peak = COUNTERS.peak_live_bytes.swap(live, Ordering::AcqRel);
    match kind {
        Cycle::Forced => LAST_CYCLE_PEAK.store(live, Ordering::Release),
        Cycle::Automatic => {
            LAST_CYCLE_PEAK.fetch_max(window_peak.max(live), Ordering::AcqRel);
        }
    }
    LIVE_AT_LAST_CYCLE.store(live, Ordering::Release);
    NEXT_GOAL.store(goal_for(live, threshold()), Ordering::Release);

    let pause_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    let n = CYCLES.load(Ordering::Acquire);
    PAUSE_RING[n as usize % PAUSE_RING_LEN].store(pause_ns, Ordering::Release);
    PAUSE_TOTAL_NS.fetch_add(pause_ns, Ordering::AcqRel);
    CYCLES.store(n.wrapping_add(1), Ordering::Release);

    COLLECTING.store(false, Ordering::Release);
    true
}

/// Scoped override of the collector threshold.
///
/// Captures the current threshold, applies a new one, and restores the
/// captured value when dropped, including during unwinding.
///
/// # Example
/// ```
/// use heap_monitor::{collector, ThresholdGuard};
///
/// let before = collector::threshold();
/// {
///     let guard = ThresholdGuard::apply(50);
///     assert_eq!(collector::threshold(), 50);
///     assert_eq!(guard.previous(), before);
/// }
/// assert_eq!(collector::threshold(), before);
/// ```
#[derive(Debug)]
#[must_use = "the previous threshold is restored as soon as the guard is dropped"]
pub struct ThresholdGuard {
    previous: i32,
    applied: i32,
}

impl ThresholdGuard {
    /// Applies `percent` until the guard is dropped.
    pub fn apply(percent: i32) -> Self {
        let previous = set_threshold(percent);
        Self {
            previous,
            applied: percent,
        }
    }

    /// Threshold that will be restored on drop.
    pub fn previous(&self) -> i32 {
        self.previous
    }

    /// Threshold applied by this guard.
    pub fn applied(&self) -> i32 {
        self.applied
    }
}

impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        set_threshold(self.previous);
    }
}
