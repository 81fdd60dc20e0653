// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pooled-buffer workload.
//!
//! Each iteration checks out a byte buffer (length zero, capacity kept),
//! appends a short payload and returns it. Every `grow_every`-th iteration
//! appends an oversized payload instead, which grows the buffer; the grown
//! capacity stays with the buffer from then on.

use crate::strategy::Workload;
use reuse_pool::{BufferPool, PoolStats, DEFAULT_BUFFER_CAPACITY};
use std::io::Write;

/// Size of the periodic oversized payload.
pub const LARGE_PAYLOAD: usize = 4 * DEFAULT_BUFFER_CAPACITY;

/// Default interval between oversized payloads.
pub const DEFAULT_GROW_EVERY: usize = 1000;

/// Writes payloads into recycled byte buffers.
#[derive(Debug)]
pub struct PooledBuffers {
    pool: BufferPool,
    grow_every: usize,
    bytes_written: usize,
}

impl PooledBuffers {
    /// Uses a fresh pool of 1 KB buffers.
    pub fn new() -> Self {
        Self::with_pool(BufferPool::default(), DEFAULT_GROW_EVERY)
    }

    /// Uses an existing pool; `grow_every == 0` never grows.
    pub fn with_pool(pool: BufferPool, grow_every: usize) -> Self {
        Self {
            pool,
            grow_every,
            bytes_written: 0,
        }
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Total payload bytes written.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    fn is_oversized(&self, iteration: usize) -> bool {
        self.grow_every != 0 && iteration % self.grow_every == self.grow_every - 1
    }
}

impl Default for PooledBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl Workload for PooledBuffers {
    fn name(&self) -> &str {
        "pooled-buffers"
    }

    fn run(&mut self, iterations: usize) {
        for i in 0..iterations {
            let mut buf = self.pool.acquire();
            let written = write!(&mut *buf, "payload-{i}").is_ok();
            debug_assert!(written, "writing into a Vec cannot fail");
            if self.is_oversized(i) {
                let len = buf.len();
                buf.resize(len + LARGE_PAYLOAD, 0);
            }
            self.bytes_written += buf.len();
        }
    }
}
