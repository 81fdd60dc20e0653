// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for workload selection.

/// Errors that can occur when selecting a workload by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkloadError {
    /// No workload is registered under this name.
    #[error("unknown workload '{0}'; expected one of: {expected}", expected = crate::WorkloadKind::names().join(", "))]
    UnknownWorkload(String),

    /// No escape probe is registered under this name.
    #[error("unknown escape probe '{0}'; expected one of: {expected}", expected = crate::EscapeProbe::names().join(", "))]
    UnknownProbe(String),
}
