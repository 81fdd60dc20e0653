// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Unpooled worker workload: the baseline for [`PooledObjects`].
//!
//! Builds a brand-new boxed [`Worker`] for every task and drops it straight
//! after. Three allocations per task (box, buffer, map buckets).
//!
//! [`PooledObjects`]: crate::PooledObjects

use crate::strategy::Workload;
use crate::worker::Worker;
use std::hint::black_box;

/// Runs every task on a freshly built worker.
#[derive(Debug, Default)]
pub struct FreshWorkers {
    checksum: usize,
}

impl FreshWorkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of bytes written by all tasks.
    pub fn checksum(&self) -> usize {
        self.checksum
    }
}

impl Workload for FreshWorkers {
    fn name(&self) -> &str {
        "fresh-workers"
    }

    fn run(&mut self, iterations: usize) {
        for task in 0..iterations {
            let mut worker = black_box(Box::new(Worker::new(task)));
            let written = worker.do_work(task);
            self.checksum = self.checksum.wrapping_add(written);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_matches_pooled() {
        let mut fresh = FreshWorkers::new();
        fresh.run(25);

        let mut pooled = crate::PooledObjects::new();
        pooled.run(25);

        assert_eq!(fresh.checksum(), pooled.checksum());
    }
}
