// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `alloclab gc`: collector tuning experiment, then the leak control.

use harness::HarnessConfig;
use heap_monitor::collector;
use workloads::WorkloadKind;

pub fn execute(
    mut config: HarnessConfig,
    threshold: Option<i32>,
    workload: Option<WorkloadKind>,
    iterations: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(t) = threshold {
        config.tuning.threshold = t;
    }
    if let Some(w) = workload {
        config.tuning.workload = w;
    }
    if let Some(n) = iterations {
        config.tuning.iterations = n;
    }

    super::banner("Collector Tuning")?;
    let before = collector::threshold();
    let mut orch = super::orchestrator(config)?;
    let outcome = orch.tuning_phase()?;
    orch.leak_phase()?;

    anyhow::ensure!(
        collector::threshold() == before,
        "collector threshold not restored: {} -> {}",
        before,
        collector::threshold()
    );
    println!("Threshold back at {}.", harness::report::fmt_threshold(outcome.restored));
    Ok(())
}
