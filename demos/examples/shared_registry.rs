// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing one registry between threads.
//!
//! The registry is single-threaded; a host that serves several players at
//! once wraps it in one `RwLock`. Readers (score boards, map renderers) take
//! the shared lock, and every mutation takes the exclusive lock, so a link and
//! the fields it forms are seen together or not at all.
//!
//! Run:
//! - `cargo run -p territory_demos --example shared_registry`

use std::sync::{Arc, RwLock};
use std::thread;

use territory_demos::{init_logging, report_scores};
use territory_engine::{Position, Registry};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut reg = Registry::new();
    let red = reg.team("red")?;
    let blue = reg.team("blue")?;

    // Each team gets a fan of beacons around its own base.
    let mut bases = Vec::new();
    for (team, origin) in [(red, Position::new(0, 0)), (blue, Position::new(200, 0))] {
        let mut ids = Vec::new();
        for i in 0..6 {
            let pos = origin.offset(i * 12, (i % 3) * 15 - 15);
            ids.push(reg.create_beacon(pos, 64, Some(team))?);
        }
        bases.push(ids);
    }
    let shared = Arc::new(RwLock::new(reg));

    let workers: Vec<_> = bases
        .into_iter()
        .enumerate()
        .map(|(n, ids)| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut formed = 0;
                for (i, &a) in ids.iter().enumerate() {
                    for &b in &ids[i + 1..] {
                        let Ok(mut reg) = shared.write() else {
                            return formed;
                        };
                        if let Ok(result) = reg.add_beacon_link(a, b) {
                            formed += result.fields_created();
                        }
                    }
                }
                info!(worker = n, formed, "worker done");
                formed
            })
        })
        .collect();

    // A reader polls the total while the workers build.
    for _ in 0..3 {
        if let Ok(reg) = shared.read() {
            info!(total = reg.total_area(), fields = reg.triangles().len(), "poll");
        }
        thread::yield_now();
    }

    let formed: usize = workers
        .into_iter()
        .map(|w| w.join().unwrap_or_default())
        .sum();
    let reg = shared.read().map_err(|_| "registry lock poisoned")?;
    info!(formed, live = reg.triangles().len(), "all workers joined");
    reg.check_integrity()?;
    report_scores(&reg);
    Ok(())
}
