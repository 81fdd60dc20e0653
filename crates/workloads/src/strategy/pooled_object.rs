// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pooled-object workload.
//!
//! Each iteration checks a [`Worker`] out of a pool, resets it, runs one
//! task on it and hands it back. Once the pool is warm no iteration
//! allocates, so the allocation count stays at the small constant paid
//! for the first worker.

use crate::strategy::Workload;
use crate::worker::Worker;
use reuse_pool::{Pool, PoolStats, Reusable};

/// Runs every task on a recycled worker.
#[derive(Debug)]
pub struct PooledObjects {
    pool: Pool<Worker>,
    checksum: usize,
}

impl PooledObjects {
    /// Creates the workload with an empty pool.
    pub fn new() -> Self {
        Self::with_pool(Pool::new(Worker::default))
    }

    /// Uses an existing pool (e.g., one already warmed by a previous run).
    pub fn with_pool(pool: Pool<Worker>) -> Self {
        Self { pool, checksum: 0 }
    }

    /// The worker pool.
    pub fn pool(&self) -> &Pool<Worker> {
        &self.pool
    }

    /// Pool statistics so far.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Sum of bytes written by all tasks.
    pub fn checksum(&self) -> usize {
        self.checksum
    }
}

impl Default for PooledObjects {
    fn default() -> Self {
        Self::new()
    }
}

impl Workload for PooledObjects {
    fn name(&self) -> &str {
        "pooled-objects"
    }

    fn run(&mut self, iterations: usize) {
        for task in 0..iterations {
            let mut worker = self.pool.acquire();
            worker.reset();
            let written = worker.do_work(task);
            self.checksum = self.checksum.wrapping_add(written);
        }
    }
}
