// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # heap-monitor
//!
//! Allocator and collector counters for a process whose memory is managed
//! by Rust's ownership rules, exposed the way a managed runtime would
//! expose them.
//!
//! # Components
//!
//! - [`CountingAllocator`] — a `GlobalAlloc` wrapper counting allocations,
//!   frees, live bytes and live objects. Installed process-wide by the
//!   `global` feature.
//! - [`collector`] — an emulated collector: cycle count, pause ring, pacing
//!   goal and the process-wide threshold, plus [`ThresholdGuard`] for
//!   scoped overrides.
//! - [`Snapshot`] — a point-in-time reading of every counter.
//! - [`Delta`] / [`diff`] — the cost attributed to the window between two
//!   ordered snapshots.
//!
//! # Measurement Window
//! ```text
//! capture()  ──►  workload  ──►  capture()
//!    │                               │
//!    └──────────── diff() ◄──────────┘
//! ```
//! Each capture forces a synchronous cycle first, so both ends of the window
//! see the collector in the same state.
//!
//! # Example
//! ```
//! use heap_monitor::{capture, diff};
//!
//! let before = capture();
//! let v: Vec<u64> = (0..1024).collect();
//! let after = capture();
//!
//! let delta = diff(&before, &after).unwrap();
//! println!("{}", delta.summary());
//! drop(v);
//! ```

mod allocator;
pub mod collector;
mod delta;
mod error;
mod snapshot;

pub use allocator::{is_installed, CountingAllocator};
pub use collector::ThresholdGuard;
pub use delta::{diff, Delta};
pub use error::MonitorError;
pub use snapshot::Snapshot;

#[cfg(feature = "global")]
#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::system();

/// Forces a collector cycle and captures a snapshot.
///
/// This is a convenience wrapper around [`Snapshot::capture()`].
pub fn capture() -> Snapshot {
    Snapshot::capture()
}
