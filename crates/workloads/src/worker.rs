// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The worker object shared by the pooled and unpooled worker workloads.

use reuse_pool::Reusable;
use std::collections::HashMap;
use std::io::Write;

/// Size of a worker's scratch buffer.
pub const WORKER_BUFFER_LEN: usize = 1024;

/// A worker that is comparatively expensive to build: a 1 KB scratch
/// buffer and an associative container.
#[derive(Debug, Clone)]
pub struct Worker {
    /// Task currently assigned, `0` when idle.
    pub id: usize,
    buffer: Vec<u8>,
    data: HashMap<&'static str, usize>,
}

impl Worker {
    /// Builds a worker with a zeroed buffer and an empty map.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            buffer: vec![0; WORKER_BUFFER_LEN],
            data: HashMap::new(),
        }
    }

    /// Processes one task, mutating every field. Returns the number of
    /// bytes written into the scratch buffer.
    ///
    /// Writes in place; does not allocate once the map has its first
    /// bucket array.
    pub fn do_work(&mut self, task_id: usize) -> usize {
        self.id = task_id;
        self.data.insert("processed", task_id);

        let capacity = self.buffer.len();
        let mut cursor: &mut [u8] = &mut self.buffer;
        // The buffer is far larger than the tag, so the write cannot fall short.
        let fits = write!(cursor, "task_{task_id}_data").is_ok();
        debug_assert!(fits, "task tag overflowed the scratch buffer");
        capacity - cursor.len()
    }

    /// The scratch buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// The associative container.
    pub fn data(&self) -> &HashMap<&'static str, usize> {
        &self.data
    }

    /// Allocated capacity of the associative container.
    pub fn data_capacity(&self) -> usize {
        self.data.capacity()
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Reusable for Worker {
    /// Zeroes the buffer and empties the map in place.
    fn reset(&mut self) {
        self.id = 0;
        self.buffer.fill(0);
        self.data.clear();
    }
}
