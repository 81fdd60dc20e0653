// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Escape-classification probes.
//!
//! Each [`EscapeProbe`] produces one value under a different exposure
//! pattern. Run in isolation, the allocation counts of the five probes show
//! which patterns move a value onto the heap:
//!
//! | Probe | Pattern | Heap allocations per call |
//! |---|---|---|
//! | `by-value` | returned by value, no outside reference | 0 |
//! | `returned-reference` | owning pointer returned, not stored elsewhere | 1 |
//! | `stored-in-container` | pointer stored in a container first | 2 |
//! | `type-erased` | boxed into a `dyn Any` holder | 1 |
//! | `oversized-aggregate` | 8 KB aggregate built and referenced | 0 |
//!
//! Only the relative ordering is meaningful.

use crate::strategy::Workload;
use crate::WorkloadError;
use std::any::Any;
use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

/// A simple 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A fixed-size aggregate large enough that managed runtimes tend to
/// promote it to the heap.
#[derive(Debug, Clone)]
pub struct LargeAggregate {
    pub data: [i64; 1024],
    pub id: i64,
}

fn by_value() -> Point {
    Point { x: 1.0, y: 2.0 }
}

fn returned_reference() -> Box<Point> {
    Box::new(Point { x: 1.0, y: 2.0 })
}

fn stored_in_container() -> Box<Point> {
    let mut points: Vec<Box<Point>> = Vec::with_capacity(1);
    points.push(Box::new(Point { x: 1.0, y: 2.0 }));
    points.swap_remove(0)
}

fn type_erased() -> Box<dyn Any + Send> {
    Box::new(Point { x: 1.0, y: 2.0 })
}

fn oversized_aggregate() -> i64 {
    let large = LargeAggregate {
        data: [0; 1024],
        id: 1,
    };
    let large = black_box(&large);
    large.id + large.data[large.data.len() - 1]
}

/// The five exposure patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeProbe {
    ByValue,
    ReturnedReference,
    StoredInContainer,
    TypeErased,
    OversizedAggregate,
}

impl EscapeProbe {
    pub const ALL: [EscapeProbe; 5] = [
        EscapeProbe::ByValue,
        EscapeProbe::ReturnedReference,
        EscapeProbe::StoredInContainer,
        EscapeProbe::TypeErased,
        EscapeProbe::OversizedAggregate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EscapeProbe::ByValue => "by-value",
            EscapeProbe::ReturnedReference => "returned-reference",
            EscapeProbe::StoredInContainer => "stored-in-container",
            EscapeProbe::TypeErased => "type-erased",
            EscapeProbe::OversizedAggregate => "oversized-aggregate",
        }
    }

    pub fn names() -> [&'static str; 5] {
        Self::ALL.map(|p| p.name())
    }

    /// One-line description of the exposure pattern.
    pub fn description(&self) -> &'static str {
        match self {
            EscapeProbe::ByValue => "value returned directly",
            EscapeProbe::ReturnedReference => "owning pointer returned, never stored",
            EscapeProbe::StoredInContainer => "pointer stored in a longer-lived container",
            EscapeProbe::TypeErased => "value boxed into a type-erased holder",
            EscapeProbe::OversizedAggregate => "large fixed-size aggregate referenced in place",
        }
    }

    /// Runs the probe once and folds its value into a number so the
    /// optimiser cannot discard it.
    pub fn run_once(&self) -> f64 {
        match self {
            EscapeProbe::ByValue => {
                let p = black_box(by_value());
                p.x + p.y
            }
            EscapeProbe::ReturnedReference => {
                let p = black_box(returned_reference());
                p.x + p.y
            }
            EscapeProbe::StoredInContainer => {
                let p = black_box(stored_in_container());
                p.x + p.y
            }
            EscapeProbe::TypeErased => {
                let held = black_box(type_erased());
                held.downcast_ref::<Point>().map_or(0.0, |p| p.x + p.y)
            }
            EscapeProbe::OversizedAggregate => oversized_aggregate() as f64,
        }
    }
}

impl fmt::Display for EscapeProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EscapeProbe {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| WorkloadError::UnknownProbe(s.to_string()))
    }
}

/// Runs one probe repeatedly.
#[derive(Debug)]
pub struct EscapeWorkload {
    probe: EscapeProbe,
    sink: f64,
}

impl EscapeWorkload {
    pub fn new(probe: EscapeProbe) -> Self {
        Self { probe, sink: 0.0 }
    }

    pub fn probe(&self) -> EscapeProbe {
        self.probe
    }

    /// Accumulated probe output.
    pub fn sink(&self) -> f64 {
        self.sink
    }
}

impl Workload for EscapeWorkload {
    fn name(&self) -> &str {
        self.probe.name()
    }

    fn run(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.sink += self.probe.run_once();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_probe_produces_its_value() {
        for probe in EscapeProbe::ALL {
            let expected = match probe {
                EscapeProbe::OversizedAggregate => 1.0,
                _ => 3.0,
            };
            assert_eq!(probe.run_once(), expected, "{probe}");
        }
    }

    #[test]
    fn test_workload_accumulates() {
        let mut w = EscapeWorkload::new(EscapeProbe::TypeErased);
        w.run(10);
        assert_eq!(w.sink(), 30.0);
        assert_eq!(w.name(), "type-erased");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Stored-In-Container".parse::<EscapeProbe>().unwrap(),
            EscapeProbe::StoredInContainer
        );
        let err = "heap".parse::<EscapeProbe>().unwrap_err();
        assert!(err.to_string().contains("by-value"));
    }

    #[test]
    fn test_aggregate_size() {
        assert!(std::mem::size_of::<LargeAggregate>() >= 8 * 1024);
    }
}
