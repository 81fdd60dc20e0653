// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # workloads
//!
//! Allocation workloads measured by the harness, each behind the
//! [`Workload`] trait.
//!
//! # Strategies
//!
//! | Workload | Pattern | Allocations for N iterations |
//! |---|---|---|
//! | [`AllocationHeavy`] | boxed record of heap parts, unsized output | ~5N + log N |
//! | [`ValuePreferring`] | `Copy` records into a reserved output | 1 |
//! | [`FreshWorkers`] | new worker per task | 3N |
//! | [`PooledObjects`] | worker recycled through a pool | constant |
//! | [`PooledBuffers`] | byte buffer recycled through a pool | constant + growth |
//! | [`Leak`] | chunk per iteration, never freed | N + log N |
//! | [`Pressure`] | chunk per iteration, forced cycles | N + log N |
//!
//! [`EscapeWorkload`] runs one [`EscapeProbe`] repeatedly.
//!
//! # Trait-Based Extensibility
//!
//! New workloads only need to implement [`Workload`]:
//!
//! ```
//! use workloads::Workload;
//!
//! struct Strings(Vec<String>);
//!
//! impl Workload for Strings {
//!     fn name(&self) -> &str { "strings" }
//!     fn run(&mut self, iterations: usize) {
//!         for i in 0..iterations {
//!             self.0.push(i.to_string());
//!         }
//!     }
//!     fn release(&mut self) { self.0.clear(); }
//! }
//!
//! let mut w = Strings(Vec::new());
//! w.run(3);
//! assert_eq!(w.0, ["0", "1", "2"]);
//! ```

mod error;
pub mod strategy;
mod worker;

pub use error::WorkloadError;
pub use strategy::allocation_heavy::{AllocationHeavy, HeavyRecord, MetaValue};
pub use strategy::escape::{EscapeProbe, EscapeWorkload, LargeAggregate, Point};
pub use strategy::fresh_workers::FreshWorkers;
pub use strategy::leak::{Leak, LeakCheckpoint};
pub use strategy::pooled_buffer::PooledBuffers;
pub use strategy::pooled_object::PooledObjects;
pub use strategy::pressure::Pressure;
pub use strategy::value_preferring::{ValuePreferring, ValueRecord};
pub use strategy::{Workload, WorkloadKind};
pub use worker::{Worker, WORKER_BUFFER_LEN};
