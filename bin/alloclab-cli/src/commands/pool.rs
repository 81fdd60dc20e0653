// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab pool`: fresh workers versus pooled workers and buffers.

use harness::HarnessConfig;

pub fn execute(mut config: HarnessConfig, tasks: Option<usize>) -> anyhow::Result<()> {
    if let Some(n) = tasks {
        config.pool_tasks = n;
    }

    super::banner("Object Pooling")?;
    let mut orch = super::orchestrator(config)?;
    orch.pool_phase()?;
    Ok(())
}
