// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Harness configuration loaded from TOML files or constructed programmatically.
//!
//! Every field has a default, so a file only needs the values it changes.
//!
//! # TOML Format
//! ```toml
//! allocation_iterations = 100000
//! pool_tasks = 10000
//! escape_iterations = 1000
//! gc_percent = 100
//!
//! [leak]
//! iterations = 500
//! chunk_bytes = 10240
//! checkpoint_every = 100
//!
//! [tuning]
//! threshold = 50
//! workload = "pressure"
//! iterations = 1000
//! chunk_bytes = 65536
//! collect_every = 100
//! ```

use crate::HarnessError;
use std::path::Path;
use workloads::{
    AllocationHeavy, FreshWorkers, Leak, PooledBuffers, PooledObjects, Pressure,
    ValuePreferring, Workload, WorkloadKind,
};

/// Settings for the unbounded-growth control.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LeakConfig {
    pub iterations: usize,
    /// Size of the chunk leaked per iteration.
    pub chunk_bytes: usize,
    /// Checkpoint sampling interval; `0` disables sampling.
    pub checkpoint_every: usize,
}

impl Default for LeakConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            chunk_bytes: workloads::strategy::leak::DEFAULT_CHUNK_BYTES,
            checkpoint_every: workloads::strategy::leak::DEFAULT_CHECKPOINT_EVERY,
        }
    }
}

/// Settings for the collector-threshold experiment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Threshold applied for the experiment; negative disables automatic cycles.
    pub threshold: i32,
    /// Workload run under the experimental threshold.
    pub workload: WorkloadKind,
    pub iterations: usize,
    /// Chunk size for the `pressure` workload.
    pub chunk_bytes: usize,
    /// Forced-cycle interval for the `pressure` workload.
    pub collect_every: usize,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            workload: WorkloadKind::Pressure,
            iterations: 1000,
            chunk_bytes: workloads::strategy::pressure::DEFAULT_CHUNK_BYTES,
            collect_every: workloads::strategy::pressure::DEFAULT_COLLECT_EVERY,
        }
    }
}

/// Configuration for a harness run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Iterations for the allocation-heavy / value-preferring comparison.
    pub allocation_iterations: usize,
    /// Tasks for the worker and buffer pool comparison.
    pub pool_tasks: usize,
    /// Iterations per escape probe.
    pub escape_iterations: usize,
    /// Process-wide threshold applied for the whole run, if set.
    pub gc_percent: Option<i32>,
    pub leak: LeakConfig,
    pub tuning: TuningConfig,
}

impl HarnessConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, HarnessError> {
        toml::from_str(toml_str)
            .map_err(|e| HarnessError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, HarnessError> {
        toml::to_string_pretty(self)
            .map_err(|e| HarnessError::Config(format!("TOML serialise error: {e}")))
    }

    /// Rejects zero iteration counts and zero-sized chunks.
    pub fn validate(&self) -> Result<(), HarnessError> {
        let counts = [
            ("allocation_iterations", self.allocation_iterations),
            ("pool_tasks", self.pool_tasks),
            ("escape_iterations", self.escape_iterations),
            ("leak.iterations", self.leak.iterations),
            ("leak.chunk_bytes", self.leak.chunk_bytes),
            ("tuning.iterations", self.tuning.iterations),
            ("tuning.chunk_bytes", self.tuning.chunk_bytes),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(HarnessError::Config(format!("{field} must be greater than zero")));
            }
        }
        Ok(())
    }

    /// Iteration count configured for `kind`.
    pub fn iterations_for(&self, kind: WorkloadKind) -> usize {
        match kind {
            WorkloadKind::AllocationHeavy | WorkloadKind::ValuePreferring => {
                self.allocation_iterations
            }
            WorkloadKind::PooledObjects
            | WorkloadKind::PooledBuffers
            | WorkloadKind::FreshWorkers => self.pool_tasks,
            WorkloadKind::Leak => self.leak.iterations,
            WorkloadKind::Pressure => self.tuning.iterations,
        }
    }

    /// Creates the workload `kind`, parameterised by this config.
    pub fn create_workload(&self, kind: WorkloadKind) -> Box<dyn Workload> {
        match kind {
            WorkloadKind::AllocationHeavy => Box::new(AllocationHeavy::new()),
            WorkloadKind::ValuePreferring => Box::new(ValuePreferring::new()),
            WorkloadKind::PooledObjects => Box::new(PooledObjects::new()),
            WorkloadKind::PooledBuffers => Box::new(PooledBuffers::new()),
            WorkloadKind::FreshWorkers => Box::new(FreshWorkers::new()),
            WorkloadKind::Leak => {
                Box::new(Leak::new(self.leak.chunk_bytes, self.leak.checkpoint_every))
            }
            WorkloadKind::Pressure => Box::new(Pressure::new(
                self.tuning.chunk_bytes,
                self.tuning.collect_every,
            )),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            allocation_iterations: 100_000,
            pool_tasks: 10_000,
            escape_iterations: 1000,
            gc_percent: None,
            leak: LeakConfig::default(),
            tuning: TuningConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = HarnessConfig::default();
        assert_eq!(c.allocation_iterations, 100_000);
        assert_eq!(c.pool_tasks, 10_000);
        assert_eq!(c.tuning.threshold, 50);
        assert_eq!(c.tuning.workload, WorkloadKind::Pressure);
        assert_eq!(c.leak.chunk_bytes, 10 * 1024);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
allocation_iterations = 1000
gc_percent = -1

[tuning]
threshold = 25
workload = "leak"
"#;
        let c = HarnessConfig::from_toml(toml).unwrap();
        assert_eq!(c.allocation_iterations, 1000);
        assert_eq!(c.gc_percent, Some(-1));
        assert_eq!(c.tuning.threshold, 25);
        assert_eq!(c.tuning.workload, WorkloadKind::Leak);
        // Untouched fields keep their defaults.
        assert_eq!(c.pool_tasks, 10_000);
        assert_eq!(c.tuning.iterations, 1000);
        assert_eq!(c.leak, LeakConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_workload() {
        let err = HarnessConfig::from_toml("[tuning]\nworkload = \"bogus\"\n").unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = HarnessConfig {
            gc_percent: Some(200),
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        let back = HarnessConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_validate_zero_iterations() {
        let mut c = HarnessConfig::default();
        c.leak.iterations = 0;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("leak.iterations"));
    }

    #[test]
    fn test_create_workload_names() {
        let c = HarnessConfig::default();
        for kind in WorkloadKind::ALL {
            assert_eq!(c.create_workload(kind).name(), kind.name());
        }
    }

    #[test]
    fn test_iterations_for() {
        let c = HarnessConfig::default();
        assert_eq!(c.iterations_for(WorkloadKind::ValuePreferring), 100_000);
        assert_eq!(c.iterations_for(WorkloadKind::FreshWorkers), 10_000);
        assert_eq!(c.iterations_for(WorkloadKind::Leak), 500);
        assert_eq!(c.iterations_for(WorkloadKind::Pressure), 1000);
    }

    #[test]
    fn test_from_missing_file() {
        let err = HarnessConfig::from_file(Path::new("/nonexistent/alloclab.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
