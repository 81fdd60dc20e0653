// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Workload`] trait and workload implementations.

pub mod allocation_heavy;
pub mod escape;
pub mod fresh_workers;
pub mod leak;
pub mod pooled_buffer;
pub mod pooled_object;
pub mod pressure;
pub mod value_preferring;

use crate::WorkloadError;
use std::fmt;
use std::str::FromStr;

/// Trait for measured workloads.
///
/// A harness drives each workload through one measurement window:
///
/// ```text
/// prepare(n) → [capture] → run(n) → [capture] → release()
/// ```
///
/// `prepare` and `release` sit outside the window: `prepare` does any
/// bookkeeping allocation up front, `release` drops output that `run`
/// kept alive so retention spans the whole window.
pub trait Workload: Send {
    /// Human-readable name of this workload.
    fn name(&self) -> &str;

    /// Bookkeeping before the measurement window opens.
    fn prepare(&mut self, _iterations: usize) {}

    /// The measured work.
    fn run(&mut self, iterations: usize);

    /// Drops retained output after the window closes.
    fn release(&mut self) {}
}

/// The selectable workload variants (escape probes are chosen separately
/// through [`EscapeProbe`](crate::EscapeProbe)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkloadKind {
    AllocationHeavy,
    ValuePreferring,
    PooledObjects,
    PooledBuffers,
    FreshWorkers,
    Leak,
    Pressure,
}

impl WorkloadKind {
    /// Every variant, in reporting order.
    pub const ALL: [WorkloadKind; 7] = [
        WorkloadKind::AllocationHeavy,
        WorkloadKind::ValuePreferring,
        WorkloadKind::FreshWorkers,
        WorkloadKind::PooledObjects,
        WorkloadKind::PooledBuffers,
        WorkloadKind::Leak,
        WorkloadKind::Pressure,
    ];

    /// Canonical kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            WorkloadKind::AllocationHeavy => "allocation-heavy",
            WorkloadKind::ValuePreferring => "value-preferring",
            WorkloadKind::PooledObjects => "pooled-objects",
            WorkloadKind::PooledBuffers => "pooled-buffers",
            WorkloadKind::FreshWorkers => "fresh-workers",
            WorkloadKind::Leak => "leak",
            WorkloadKind::Pressure => "pressure",
        }
    }

    /// All canonical names.
    pub fn names() -> [&'static str; 7] {
        Self::ALL.map(|k| k.name())
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkloadKind {
    type Err = WorkloadError;

    /// Accepts the canonical name plus a few short aliases, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allocation-heavy" | "heavy" => Ok(WorkloadKind::AllocationHeavy),
            "value-preferring" | "value" => Ok(WorkloadKind::ValuePreferring),
            "pooled-objects" | "pool" => Ok(WorkloadKind::PooledObjects),
            "pooled-buffers" | "buffers" => Ok(WorkloadKind::PooledBuffers),
            "fresh-workers" | "unpooled" => Ok(WorkloadKind::FreshWorkers),
            "leak" => Ok(WorkloadKind::Leak),
            "pressure" => Ok(WorkloadKind::Pressure),
            _ => Err(WorkloadError::UnknownWorkload(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for kind in WorkloadKind::ALL {
            assert_eq!(kind.name().parse::<WorkloadKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("HEAVY".parse::<WorkloadKind>().unwrap(), WorkloadKind::AllocationHeavy);
        assert_eq!(" pool ".parse::<WorkloadKind>().unwrap(), WorkloadKind::PooledObjects);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bogus".parse::<WorkloadKind>().unwrap_err();
        assert_eq!(err, WorkloadError::UnknownWorkload("bogus".into()));
        assert!(err.to_string().contains("allocation-heavy"));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&WorkloadKind::PooledBuffers).unwrap();
        assert_eq!(json, "\"pooled-buffers\"");
        let back: WorkloadKind = serde_json::from_str("\"leak\"").unwrap();
        assert_eq!(back, WorkloadKind::Leak);
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkloadKind::FreshWorkers.to_string(), "fresh-workers");
    }
}
