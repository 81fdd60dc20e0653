// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation-heavy workload.
//!
//! Every iteration builds a boxed record out of independently allocated
//! parts and appends it to an output collection that is never pre-sized.
//! Per iteration that is five allocations (the box, the formatted label,
//! the byte buffer, the map's bucket array, the map key) plus the
//! amortised reallocations of the growing output.
//!
//! # When to use
//! - The "before" side of every comparison.

use crate::strategy::Workload;
use std::collections::HashMap;
use std::hint::black_box;

/// Length of the per-record byte buffer.
pub const RECORD_DATA_LEN: usize = 100;

/// A loosely typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Int(i64),
    Text(String),
}

/// A record whose every part lives on the heap.
#[derive(Debug, Clone)]
pub struct HeavyRecord {
    pub id: usize,
    pub name: String,
    pub data: Vec<u8>,
    pub metadata: HashMap<String, MetaValue>,
}

/// Builds one heap record per iteration and keeps them all.
#[derive(Debug, Default)]
pub struct AllocationHeavy {
    retained: Vec<Box<HeavyRecord>>,
}

impl AllocationHeavy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records kept alive by the last run.
    pub fn retained(&self) -> &[Box<HeavyRecord>] {
        &self.retained
    }
}

impl Workload for AllocationHeavy {
    fn name(&self) -> &str {
        "allocation-heavy"
    }

    fn run(&mut self, iterations: usize) {
        let mut results = Vec::new();
        for i in 0..iterations {
            let mut record = Box::new(HeavyRecord {
                id: i,
                name: format!("item_{i}"),
                data: vec![0u8; RECORD_DATA_LEN],
                metadata: HashMap::new(),
            });
            record
                .metadata
                .insert("index".to_string(), MetaValue::Int(i as i64));
            results.push(record);
        }
        self.retained = black_box(results);
    }

    fn release(&mut self) {
        self.retained = Vec::new();
    }
}
