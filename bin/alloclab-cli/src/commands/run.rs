// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab run`: the full phase sequence.
//!
//! ```text
//! initial state → allocation patterns → pooling → escape probes
//!     → collector tuning → leak control → final state
//! ```

use harness::HarnessConfig;

pub fn execute(mut config: HarnessConfig, gc_percent: Option<i32>) -> anyhow::Result<()> {
    if gc_percent.is_some() {
        config.gc_percent = gc_percent;
    }

    super::banner("Allocation Lab")?;
    let mut orch = super::orchestrator(config)?;
    let results = orch.run_all()?;

    println!("{} measurement windows:", results.len());
    for result in &results {
        println!("  {}", result.summary());
    }
    Ok(())
}
