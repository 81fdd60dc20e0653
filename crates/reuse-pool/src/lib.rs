// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # reuse-pool
//!
//! Thread-safe pools that recycle entries instead of allocating new ones.
//!
//! # Key Components
//!
//! - [`Reusable`] — the reset contract: clear content, keep capacity.
//! - [`Pool`] — a lazily-filled store of reusable entries, safe to share
//!   across threads.
//! - [`Pooled`] — an RAII guard giving exclusive ownership of one entry.
//!   Dropping it resets the entry and returns it to the pool.
//! - [`BufferPool`] — a pool of `Vec<u8>` scratch buffers.
//! - [`PoolStats`] — reuse statistics.
//!
//! # Ownership Model
//!
//! ```text
//! Pool::acquire()
//!       │
//!       ▼
//!   Pooled<T>  ◄─── owns T, holds Arc<PoolInner<T>>
//!       │
//!       │  drop()
//!       ▼
//!   T::reset()  ──►  idle list
//! ```
//!
//! An entry is owned by at most one caller at a time: either a guard holds
//! it, or it sits reset on the idle list.

mod buffer;
mod guard;
pub mod pool;
mod stats;

pub use buffer::{BufferPool, DEFAULT_BUFFER_CAPACITY};
pub use guard::Pooled;
pub use pool::Pool;
pub use stats::PoolStats;

/// An entry that can be recycled by a [`Pool`].
///
/// `reset` must clear all mutable content while keeping any allocated
/// capacity, and must be idempotent.
pub trait Reusable {
    /// Clears content, keeps capacity.
    fn reset(&mut self);
}
