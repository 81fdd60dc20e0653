// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab allocation`: heap-heavy records versus value records.

use harness::HarnessConfig;

pub fn execute(mut config: HarnessConfig, iterations: Option<usize>) -> anyhow::Result<()> {
    if let Some(n) = iterations {
        config.allocation_iterations = n;
    }

    super::banner("Allocation Patterns")?;
    let mut orch = super::orchestrator(config)?;
    let results = orch.allocation_phase()?;

    if let [heavy, value] = results.as_slice() {
        if let Some(ratio) = value.allocation_ratio(heavy) {
            println!(
                "Value records needed {:.4}% of the heap-heavy allocations.",
                ratio * 100.0
            );
        }
    }
    Ok(())
}
