// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: compare every workload at several iteration counts.
//!
//! Shows how the allocation count of each workload scales with N: the
//! heap-heavy patterns grow linearly, the reuse-oriented ones stay flat.
//!
//! ```bash
//! cargo run -p harness --example workload_comparison
//! ```

use harness::{measure, HarnessConfig};
use workloads::WorkloadKind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = HarnessConfig::default();
    let sizes = [10usize, 100, 1000];

    print!("{:<20}", "Workload");
    for n in sizes {
        print!(" {:>12}", format!("N={n}"));
    }
    println!();
    println!("{}", "-".repeat(20 + 13 * sizes.len()));

    for kind in WorkloadKind::ALL {
        print!("{:<20}", kind.name());
        for n in sizes {
            let mut workload = config.create_workload(kind);
            let result = measure(workload.as_mut(), n)?;
            print!(" {:>12}", result.allocation_delta().allocation_count);
        }
        println!();
    }

    Ok(())
}
