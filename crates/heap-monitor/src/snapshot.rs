// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time heap snapshot.
//!
//! A [`Snapshot`] combines the allocator counters and the collector's
//! bookkeeping into a single `Copy` struct. Reading one never allocates,
//! so snapshots can bracket a measurement window without disturbing it.

use crate::allocator::COUNTERS;
use crate::collector;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static CAPTURE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A complete point-in-time reading of allocator and collector counters.
///
/// All counters grow monotonically over the life of the process except the
/// heap-size-class ones (`heap_size_bytes`, `heap_object_count`,
/// `heap_allocated_bytes`), which fall when memory is freed or a forced
/// cycle scavenges the footprint. `collection_count` is 32 bits wide and wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Snapshot {
    /// Process-wide capture order; strictly increasing.
    pub sequence: u64,
    /// Completed collector cycles.
    pub collection_count: u32,
    /// Sum of all collector pauses.
    pub cumulative_pause: Duration,
    /// Most recent pause (zero before the first cycle).
    pub last_pause: Duration,
    /// Heap footprint retained over the last cycle window, in bytes.
    pub heap_size_bytes: u64,
    /// Live heap objects.
    pub heap_object_count: u64,
    /// Live heap bytes.
    pub heap_allocated_bytes: u64,
    /// Bytes ever allocated.
    pub cumulative_allocated_bytes: u64,
    /// Allocations ever performed.
    pub allocation_count: u64,
    /// Frees ever performed.
    pub free_count: u64,
}

impl Snapshot {
    /// Forces a synchronous collector cycle, then reads the counters.
    ///
    /// Blocks for the duration of the cycle. Because the cycle itself is
    /// counted, two back-to-back captures differ by exactly one collection
    /// and a small pause even when nothing was allocated in between.
    pub fn capture() -> Self {
        collector::collect();
        Self::read()
    }

    /// Reads the counters without forcing a cycle.
    pub fn read() -> Self {
        let sequence = CAPTURE_SEQUENCE.fetch_add(1, Ordering::AcqRel) + 1;
        let collection_count = collector::cycles();

        Self {
            sequence,
            collection_count,
            cumulative_pause: collector::pause_total(),
            last_pause: collector::last_pause_for(collection_count),
            heap_size_bytes: collector::heap_footprint(),
            heap_object_count: COUNTERS.live_objects.load(Ordering::Acquire),
            heap_allocated_bytes: COUNTERS.live_bytes.load(Ordering::Acquire),
            cumulative_allocated_bytes: COUNTERS.cumulative_bytes.load(Ordering::Acquire),
            allocation_count: COUNTERS.allocations.load(Ordering::Acquire),
            free_count: COUNTERS.frees.load(Ordering::Acquire),
        }
    }

    /// Heap footprint in megabytes.
    pub fn heap_size_mb(&self) -> f64 {
        bytes_to_mb(self.heap_size_bytes)
    }

    /// Live heap bytes in megabytes.
    pub fn heap_allocated_mb(&self) -> f64 {
        bytes_to_mb(self.heap_allocated_bytes)
    }

    /// Cumulative allocated bytes in megabytes.
    pub fn cumulative_allocated_mb(&self) -> f64 {
        bytes_to_mb(self.cumulative_allocated_bytes)
    }

    /// Returns a one-line summary suitable for logging.
    ///
    /// # Example output
    /// ```text
    /// Heap: 1.25 MB live (312 objects), 2.00 MB footprint, 48.10 MB total, 7 cycles
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "Heap: {:.2} MB live ({} objects), {:.2} MB footprint, {:.2} MB total, {} cycles",
            self.heap_allocated_mb(),
            self.heap_object_count,
            self.heap_size_mb(),
            self.cumulative_allocated_mb(),
            self.collection_count,
        )
    }
}

pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
