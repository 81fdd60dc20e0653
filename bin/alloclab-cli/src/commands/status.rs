// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab status`: counters and collector settings, read in place.
//!
//! Nothing is measured and no cycle is forced, so the numbers reflect
//! only what the process did to start up.

use harness::HarnessConfig;

pub fn execute(config: HarnessConfig) -> anyhow::Result<()> {
    super::banner("Status")?;
    let mut orch = super::orchestrator(config)?;
    let snap = orch.status()?;
    println!();
    println!("{}", snap.summary());
    Ok(())
}
