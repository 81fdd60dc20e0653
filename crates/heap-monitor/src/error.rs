// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for heap monitoring.

/// Errors that can occur when comparing heap snapshots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    /// The "after" snapshot was not captured later than the "before" one.
    #[error("snapshots out of order: 'after' (#{after}) was not captured later than 'before' (#{before})")]
    MisorderedSnapshots { before: u64, after: u64 },

    /// A counter that only ever grows reads lower in the later snapshot.
    #[error("counter '{field}' went backwards between snapshots: {before} -> {after}")]
    CounterRegression {
        field: &'static str,
        before: u64,
        after: u64,
    },
}
