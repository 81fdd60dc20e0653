// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Field-wise difference between two ordered snapshots.
//!
//! [`diff`] attributes allocation cost to the window between two
//! [`Snapshot`]s. A misordered pair is a broken measurement window and is
//! reported as [`MonitorError`], never clamped to zero.

use crate::snapshot::bytes_to_mb;
use crate::{MonitorError, Snapshot};
use std::time::Duration;

/// Allocation and collector activity between two snapshots.
///
/// Monotonic counters are unsigned. Heap-size-class fields are signed
/// because they legitimately fall when the window frees more than it
/// allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Delta {
    /// Collector cycles in the window (wrapping difference).
    pub collection_count: u32,
    /// Pause time accumulated in the window.
    pub cumulative_pause: Duration,
    /// The later snapshot's most recent pause.
    pub last_pause: Duration,
    /// Change in heap footprint.
    pub heap_size_bytes: i64,
    /// Change in live objects.
    pub heap_object_count: i64,
    /// Change in live bytes.
    pub heap_allocated_bytes: i64,
    /// Bytes allocated in the window.
    pub cumulative_allocated_bytes: u64,
    /// Allocations performed in the window.
    pub allocation_count: u64,
    /// Frees performed in the window.
    pub free_count: u64,
}

/// Subtracts `before` from `after`.
///
/// Fails if `after` was not captured strictly later than `before`, or if a
/// monotonic counter reads lower in `after`. The collection count is a
/// 32-bit counter, so its difference wraps instead of failing.
pub fn diff(before: &Snapshot, after: &Snapshot) -> Result<Delta, MonitorError> {
    if after.sequence <= before.sequence {
        return Err(MonitorError::MisorderedSnapshots {
            before: before.sequence,
            after: after.sequence,
        });
    }

    let cumulative_pause = after
        .cumulative_pause
        .checked_sub(before.cumulative_pause)
        .ok_or(MonitorError::CounterRegression {
            field: "cumulative_pause",
            before: duration_nanos(before.cumulative_pause),
            after: duration_nanos(after.cumulative_pause),
        })?;

    Ok(Delta {
        collection_count: after.collection_count.wrapping_sub(before.collection_count),
        cumulative_pause,
        last_pause: after.last_pause,
        heap_size_bytes: signed_diff(before.heap_size_bytes, after.heap_size_bytes),
        heap_object_count: signed_diff(before.heap_object_count, after.heap_object_count),
        heap_allocated_bytes: signed_diff(before.heap_allocated_bytes, after.heap_allocated_bytes),
        cumulative_allocated_bytes: monotonic_diff(
            "cumulative_allocated_bytes",
            before.cumulative_allocated_bytes,
            after.cumulative_allocated_bytes,
        )?,
        allocation_count: monotonic_diff(
            "allocation_count",
            before.allocation_count,
            after.allocation_count,
        )?,
        free_count: monotonic_diff("free_count", before.free_count, after.free_count)?,
    })
}

fn monotonic_diff(field: &'static str, before: u64, after: u64) -> Result<u64, MonitorError> {
    after
        .checked_sub(before)
        .ok_or(MonitorError::CounterRegression {
            field,
            before,
            after,
        })
}

fn signed_diff(before: u64, after: u64) -> i64 {
    (after as i128 - before as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

fn duration_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

impl Delta {
    /// Bytes allocated in the window, in megabytes.
    pub fn cumulative_allocated_mb(&self) -> f64 {
        bytes_to_mb(self.cumulative_allocated_bytes)
    }

    /// Live heap change in megabytes (may be negative).
    pub fn heap_allocated_mb(&self) -> f64 {
        self.heap_allocated_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Returns `true` if no allocation happened in the window.
    ///
    /// Collector bookkeeping (cycles, pause time) is ignored: every forced
    /// capture adds one cycle of its own.
    pub fn is_allocation_free(&self) -> bool {
        self.allocation_count == 0 && self.cumulative_allocated_bytes == 0
    }

    /// Returns a one-line summary suitable for logging.
    pub fn summary(&self) -> String {
        format!(
            "{} allocs ({} frees), {:.2} MB allocated, live {:+.2} MB ({:+} objects), {} cycles, {:?} paused",
            self.allocation_count,
            self.free_count,
            self.cumulative_allocated_mb(),
            self.heap_allocated_mb(),
            self.heap_object_count,
            self.collection_count,
            self.cumulative_pause,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(sequence: u64) -> Snapshot {
        Snapshot {
            sequence,
            collection_count: 10,
            cumulative_pause: Duration::from_micros(100),
            last_pause: Duration::from_micros(5),
            heap_size_bytes: 8192,
            heap_object_count: 20,
            heap_allocated_bytes: 4096,
            cumulative_allocated_bytes: 1_000_000,
            allocation_count: 500,
            free_count: 480,
        }
    }

    #[test]
    fn test_identical_counters_give_zero_delta() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 2,
            ..before
        };
        let d = diff(&before, &after).unwrap();
        assert_eq!(
            d,
            Delta {
                last_pause: Duration::from_micros(5),
                ..Delta::default()
            }
        );
        assert!(d.is_allocation_free());
    }

    #[test]
    fn test_fieldwise_subtraction() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 9,
            collection_count: 13,
            cumulative_pause: Duration::from_micros(160),
            last_pause: Duration::from_micros(30),
            heap_size_bytes: 16384,
            heap_object_count: 25,
            heap_allocated_bytes: 10_000,
            cumulative_allocated_bytes: 1_050_000,
            allocation_count: 540,
            free_count: 515,
        };
        let d = diff(&before, &after).unwrap();
        assert_eq!(d.collection_count, 3);
        assert_eq!(d.cumulative_pause, Duration::from_micros(60));
        assert_eq!(d.last_pause, Duration::from_micros(30));
        assert_eq!(d.heap_size_bytes, 8192);
        assert_eq!(d.heap_object_count, 5);
        assert_eq!(d.heap_allocated_bytes, 10_000 - 4096);
        assert_eq!(d.cumulative_allocated_bytes, 50_000);
        assert_eq!(d.allocation_count, 40);
        assert_eq!(d.free_count, 35);
    }

    #[test]
    fn test_heap_gauges_may_fall() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 2,
            heap_size_bytes: 0,
            heap_object_count: 0,
            heap_allocated_bytes: 0,
            free_count: 500,
            ..before
        };
        let d = diff(&before, &after).unwrap();
        assert_eq!(d.heap_size_bytes, -8192);
        assert_eq!(d.heap_object_count, -20);
        assert_eq!(d.heap_allocated_bytes, -4096);
    }

    #[test]
    fn test_misordered_is_error() {
        let earlier = snap(5);
        let later = snap(6);
        let err = diff(&later, &earlier).unwrap_err();
        assert_eq!(
            err,
            MonitorError::MisorderedSnapshots {
                before: 6,
                after: 5
            }
        );
    }

    #[test]
    fn test_same_snapshot_is_error() {
        let s = snap(4);
        assert!(matches!(
            diff(&s, &s),
            Err(MonitorError::MisorderedSnapshots { .. })
        ));
    }

    #[test]
    fn test_counter_regression_is_error() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 2,
            allocation_count: 499,
            ..before
        };
        let err = diff(&before, &after).unwrap_err();
        assert_eq!(
            err,
            MonitorError::CounterRegression {
                field: "allocation_count",
                before: 500,
                after: 499
            }
        );
    }

    #[test]
    fn test_pause_regression_is_error() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 2,
            cumulative_pause: Duration::from_micros(1),
            ..before
        };
        assert!(matches!(
            diff(&before, &after),
            Err(MonitorError::CounterRegression {
                field: "cumulative_pause",
                ..
            })
        ));
    }

    #[test]
    fn test_collection_count_wraps() {
        let before = Snapshot {
            collection_count: u32::MAX - 1,
            ..snap(1)
        };
        let after = Snapshot {
            sequence: 2,
            collection_count: 2,
            ..before
        };
        let d = diff(&before, &after).unwrap();
        assert_eq!(d.collection_count, 4);
    }

    #[test]
    fn test_summary_format() {
        let before = snap(1);
        let after = Snapshot {
            sequence: 2,
            allocation_count: 510,
            heap_object_count: 22,
            ..before
        };
        let s = diff(&before, &after).unwrap().summary();
        assert!(s.contains("10 allocs"));
        assert!(s.contains("+2 objects"));
    }

    #[test]
    fn test_live_captures_are_ordered() {
        let a = Snapshot::capture();
        let b = Snapshot::capture();
        let d = diff(&a, &b).unwrap();
        assert!(d.collection_count >= 1);
    }
}
