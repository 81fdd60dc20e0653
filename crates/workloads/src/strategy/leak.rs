// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Unbounded-growth control.
//!
//! Every iteration allocates a fixed-size chunk and appends it to a
//! collection that is never cleared. It is the negative control: if the
//! harness cannot see the heap grow here, the measurement is broken.
//!
//! The workload samples a [`LeakCheckpoint`] every `checkpoint_every`
//! iterations by reading the counters in place (no forced cycle). The
//! checkpoint list is reserved in [`Workload::prepare`] so sampling does
//! not add allocations of its own.

use crate::strategy::Workload;
use heap_monitor::Snapshot;
use serde::Serialize;

/// Default chunk size: 10 KB.
pub const DEFAULT_CHUNK_BYTES: usize = 10 * 1024;

/// Default sampling interval.
pub const DEFAULT_CHECKPOINT_EVERY: usize = 100;

/// Heap state sampled partway through a leak run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeakCheckpoint {
    pub iteration: usize,
    pub heap_size_bytes: u64,
    pub heap_allocated_bytes: u64,
    pub heap_object_count: u64,
}

impl LeakCheckpoint {
    fn sample(iteration: usize) -> Self {
        let snap = Snapshot::read();
        Self {
            iteration,
            heap_size_bytes: snap.heap_size_bytes,
            heap_allocated_bytes: snap.heap_allocated_bytes,
            heap_object_count: snap.heap_object_count,
        }
    }

    /// Live heap in MB.
    pub fn heap_allocated_mb(&self) -> f64 {
        self.heap_allocated_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Allocates and keeps a chunk per iteration.
#[derive(Debug)]
pub struct Leak {
    chunk_bytes: usize,
    checkpoint_every: usize,
    chunks: Vec<Vec<u8>>,
    checkpoints: Vec<LeakCheckpoint>,
}

impl Leak {
    /// `checkpoint_every == 0` disables sampling.
    pub fn new(chunk_bytes: usize, checkpoint_every: usize) -> Self {
        Self {
            chunk_bytes,
            checkpoint_every,
            chunks: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Checkpoints sampled by the last run.
    pub fn checkpoints(&self) -> &[LeakCheckpoint] {
        &self.checkpoints
    }

    /// Chunks currently held.
    pub fn retained_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_bytes(&self) -> usize {
        self.chunk_bytes
    }
}

impl Default for Leak {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_BYTES, DEFAULT_CHECKPOINT_EVERY)
    }
}

impl Workload for Leak {
    fn name(&self) -> &str {
        "leak"
    }

    fn prepare(&mut self, iterations: usize) {
        self.checkpoints.clear();
        if self.checkpoint_every > 0 {
            self.checkpoints
                .reserve_exact(iterations.div_ceil(self.checkpoint_every));
        }
    }

    fn run(&mut self, iterations: usize) {
        for i in 0..iterations {
            self.chunks.push(vec![0u8; self.chunk_bytes]);
            if self.checkpoint_every > 0 && i % self.checkpoint_every == 0 {
                self.checkpoints.push(LeakCheckpoint::sample(i));
            }
        }
    }

    fn release(&mut self) {
        self.chunks = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_schedule() {
        let mut w = Leak::new(16, 100);
        w.prepare(500);
        w.run(500);

        let iterations: Vec<usize> = w.checkpoints().iter().map(|c| c.iteration).collect();
        assert_eq!(iterations, vec![0, 100, 200, 300, 400]);
        assert_eq!(w.retained_chunks(), 500);
    }

    #[test]
    fn test_prepare_reserves_exactly() {
        let mut w = Leak::new(16, 100);
        w.prepare(250);
        let reserved = w.checkpoints.capacity();
        assert!(reserved >= 3);

        w.run(250);
        assert_eq!(w.checkpoints().len(), 3);
        assert_eq!(w.checkpoints.capacity(), reserved);
    }

    #[test]
    fn test_sampling_disabled() {
        let mut w = Leak::new(16, 0);
        w.prepare(50);
        w.run(50);
        assert!(w.checkpoints().is_empty());
    }

    #[test]
    fn test_release_keeps_checkpoints() {
        let mut w = Leak::default();
        w.prepare(10);
        w.run(10);
        w.release();
        assert_eq!(w.retained_chunks(), 0);
        assert_eq!(w.checkpoints().len(), 1);
    }
}
