// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool usage statistics.
//!
//! [`PoolStats`] tracks how often a pool handed out a recycled entry versus
//! constructing a fresh one. A warm pool should converge on a reuse ratio
//! close to 1.0.

/// Cumulative statistics about pool usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolStats {
    /// Total number of acquire calls.
    pub acquisitions: u64,
    /// Acquisitions served from the idle list.
    pub reuses: u64,
    /// Acquisitions that had to construct a new entry.
    pub creations: u64,
    /// Entries returned to the idle list.
    pub releases: u64,
}

impl PoolStats {
    /// Returns the reuse ratio as a fraction in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` if nothing has been acquired yet.
    pub fn reuse_ratio(&self) -> f64 {
        if self.acquisitions == 0 {
            return 0.0;
        }
        self.reuses as f64 / self.acquisitions as f64
    }

    /// Number of entries currently checked out.
    pub fn outstanding(&self) -> u64 {
        self.acquisitions.saturating_sub(self.releases)
    }

    pub(crate) fn record_reuse(&mut self) {
        self.acquisitions += 1;
        self.reuses += 1;
    }

    pub(crate) fn record_creation(&mut self) {
        self.acquisitions += 1;
        self.creations += 1;
    }

    pub(crate) fn record_release(&mut self) {
        self.releases += 1;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Pool: {} acquisitions ({} reused, {} created, {:.0}% reuse), {} released",
            self.acquisitions,
            self.reuses,
            self.creations,
            self.reuse_ratio() * 100.0,
            self.releases,
        )
    }
}
