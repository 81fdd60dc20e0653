// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the measurement harness.

/// Errors that can occur while configuring or running experiments.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A measurement window produced misordered or regressing snapshots.
    #[error("measurement error: {0}")]
    Monitor(#[from] heap_monitor::MonitorError),

    /// A workload or escape probe name did not resolve.
    #[error("workload error: {0}")]
    Workload(#[from] workloads::WorkloadError),

    /// Writing a report failed.
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
