// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab escape`: escape-classification probes.
//!
//! Only the relative counts matter; absolute numbers depend on the
//! platform and optimisation level.

use harness::HarnessConfig;
use workloads::EscapeProbe;

pub fn execute(
    mut config: HarnessConfig,
    iterations: Option<usize>,
    probes: Vec<EscapeProbe>,
) -> anyhow::Result<()> {
    if let Some(n) = iterations {
        config.escape_iterations = n;
    }
    let probes = if probes.is_empty() {
        EscapeProbe::ALL.to_vec()
    } else {
        probes
    };

    super::banner("Escape Probes")?;
    let mut orch = super::orchestrator(config)?;
    orch.escape_probes(&probes)?;
    Ok(())
}
