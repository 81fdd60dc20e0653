// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Byte-buffer pool.
//!
//! A [`BufferPool`] hands out `Vec<u8>` scratch buffers. A returned buffer
//! has its length reset to zero while its capacity is kept, so growth paid
//! once is amortised over every later use. Capacity never shrinks.

use crate::{Pool, PoolStats, Pooled, Reusable};

/// Default capacity of a freshly built buffer: 1 KB.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

impl Reusable for Vec<u8> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// A pool of byte buffers with a fixed starting capacity.
///
/// # Example
/// ```
/// use reuse_pool::BufferPool;
///
/// let pool = BufferPool::new(64);
/// let mut buf = pool.acquire();
/// buf.extend_from_slice(&[0xAB; 200]); // grows past the starting capacity
/// let grown = buf.capacity();
/// drop(buf);
///
/// let buf = pool.acquire();
/// assert!(buf.is_empty());
/// assert_eq!(buf.capacity(), grown);
/// ```
#[derive(Debug, Clone)]
pub struct BufferPool {
    pool: Pool<Vec<u8>>,
    initial_capacity: usize,
}

impl BufferPool {
    /// Creates a pool whose buffers start with `initial_capacity` bytes.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            pool: Pool::new(move || Vec::with_capacity(initial_capacity)),
            initial_capacity,
        }
    }

    /// Checks out an empty buffer.
    pub fn acquire(&self) -> Pooled<Vec<u8>> {
        self.pool.acquire()
    }

    /// Capacity of freshly built buffers.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Number of buffers currently idle.
    pub fn idle(&self) -> usize {
        self.pool.idle()
    }

    /// Returns a snapshot of the pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Drops every idle buffer.
    pub fn clear(&self) {
        self.pool.clear();
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
