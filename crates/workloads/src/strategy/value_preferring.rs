// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Value-preferring workload.
//!
//! The output collection is reserved to the exact iteration count up front;
//! each iteration builds a fixed-size `Copy` record by value and pushes it
//! by value. The single reservation is the only allocation.

use crate::strategy::Workload;
use std::hint::black_box;

/// Constant label shared by every record.
pub const FIXED_NAME: &str = "fixed_name";

const FIXED_DATA: &[u8] = b"some_fixed_data";

/// A fixed-size record: no field owns heap memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRecord {
    pub id: usize,
    pub name: &'static str,
    pub data: [u8; 64],
    pub flag: bool,
}

/// Pushes records by value into a pre-reserved collection.
#[derive(Debug, Default)]
pub struct ValuePreferring {
    retained: Vec<ValueRecord>,
}

impl ValuePreferring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records kept alive by the last run.
    pub fn retained(&self) -> &[ValueRecord] {
        &self.retained
    }
}

impl Workload for ValuePreferring {
    fn name(&self) -> &str {
        "value-preferring"
    }

    fn run(&mut self, iterations: usize) {
        let mut results = Vec::with_capacity(iterations);
        for i in 0..iterations {
            let mut record = ValueRecord {
                id: i,
                name: FIXED_NAME,
                data: [0; 64],
                flag: i % 2 == 0,
            };
            record.data[..FIXED_DATA.len()].copy_from_slice(FIXED_DATA);
            results.push(record);
        }
        self.retained = black_box(results);
    }

    fn release(&mut self) {
        self.retained = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_reservation() {
        let mut w = ValuePreferring::new();
        w.run(1000);
        assert_eq!(w.retained().len(), 1000);
        assert_eq!(w.retained.capacity(), 1000);
    }

    #[test]
    fn test_record_contents() {
        let mut w = ValuePreferring::new();
        w.run(3);
        let r = w.retained()[1];
        assert_eq!(r.id, 1);
        assert_eq!(r.name, FIXED_NAME);
        assert!(!r.flag);
        assert!(w.retained()[2].flag);
        assert_eq!(&r.data[..FIXED_DATA.len()], FIXED_DATA);
        assert!(r.data[FIXED_DATA.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_record_owns_no_heap() {
        assert!(!std::mem::needs_drop::<ValueRecord>());
    }
}
