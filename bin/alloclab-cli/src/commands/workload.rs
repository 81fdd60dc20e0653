// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab workload <KIND>`: one measurement window.

use harness::HarnessConfig;
use workloads::WorkloadKind;

pub fn execute(
    mut config: HarnessConfig,
    kind: WorkloadKind,
    iterations: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(n) = iterations {
        match kind {
            WorkloadKind::AllocationHeavy | WorkloadKind::ValuePreferring => {
                config.allocation_iterations = n
            }
            WorkloadKind::PooledObjects
            | WorkloadKind::PooledBuffers
            | WorkloadKind::FreshWorkers => config.pool_tasks = n,
            WorkloadKind::Leak => config.leak.iterations = n,
            WorkloadKind::Pressure => config.tuning.iterations = n,
        }
    }

    let mut orch = super::orchestrator(config)?;
    let result = orch.single(kind)?;
    tracing::info!("{}", result.summary());
    Ok(())
}
