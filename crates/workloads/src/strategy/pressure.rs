// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Memory-pressure workload, the default subject of the tuning experiment.
//!
//! Allocates and keeps a chunk per iteration, forcing a collector cycle
//! every `collect_every` iterations. Retained bytes push the heap past its
//! pacing goal, so the number of automatic cycles in between depends on
//! the collector threshold in force.

use crate::strategy::Workload;
use heap_monitor::collector;
use std::hint::black_box;

/// Default chunk size: 64 KB.
pub const DEFAULT_CHUNK_BYTES: usize = 64 * 1024;

/// Default forced-cycle interval.
pub const DEFAULT_COLLECT_EVERY: usize = 100;

#[derive(Debug)]
pub struct Pressure {
    chunk_bytes: usize,
    collect_every: usize,
    retained: Vec<Vec<u8>>,
}

impl Pressure {
    /// `collect_every == 0` never forces a cycle.
    pub fn new(chunk_bytes: usize, collect_every: usize) -> Self {
        Self {
            chunk_bytes,
            collect_every,
            retained: Vec::new(),
        }
    }

    /// Chunks currently held.
    pub fn retained_chunks(&self) -> usize {
        self.retained.len()
    }
}

impl Default for Pressure {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_BYTES, DEFAULT_COLLECT_EVERY)
    }
}

impl Workload for Pressure {
    fn name(&self) -> &str {
        "pressure"
    }

    fn run(&mut self, iterations: usize) {
        for i in 0..iterations {
            self.retained.push(black_box(vec![0u8; self.chunk_bytes]));
            if self.collect_every > 0 && i % self.collect_every == 0 {
                collector::collect();
            }
        }
    }

    fn release(&mut self) {
        self.retained = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retains_until_release() {
        let mut w = Pressure::new(128, 0);
        w.run(20);
        assert_eq!(w.retained_chunks(), 20);
        w.release();
        assert_eq!(w.retained_chunks(), 0);
    }

    #[test]
    fn test_forces_cycles() {
        let mut w = Pressure::new(128, 10);
        let before = collector::cycles();
        w.run(30);
        // Forced at 0, 10 and 20; automatic cycles or other tests may add more.
        assert!(collector::cycles().wrapping_sub(before) >= 3);
    }
}
