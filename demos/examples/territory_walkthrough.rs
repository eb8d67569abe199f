// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A short game: two teams link beacons, fields form and overlap, a beacon is
//! captured, and the world is saved and restored.
//!
//! Run:
//! - `cargo run -p territory_demos --example territory_walkthrough`
//! - `RUST_LOG=trace cargo run -p territory_demos --example territory_walkthrough`
//!
//! An optional `territory.json` in the working directory overrides the
//! registry config, e.g. `{ "max_links": 4 }`.

use std::path::Path;

use territory_demos::{init_logging, json_round_trip, load_config, report_scores};
use territory_engine::{LinkResult, Position, Registry};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let config = load_config(Path::new("territory.json"))?;
    let mut reg = Registry::with_config(config);
    let red = reg.team("red")?;
    let blue = reg.team("blue")?;
    let p = Position::new;

    // Red's two overlapping right triangles share a quarter of a square.
    let r1 = reg.create_beacon(p(50, 50), 64, Some(red))?;
    let r2 = reg.create_beacon(p(60, 50), 64, Some(red))?;
    let r3 = reg.create_beacon(p(60, 60), 64, Some(red))?;
    let r4 = reg.create_beacon(p(50, 60), 64, Some(red))?;
    for (a, b) in [(r1, r2), (r2, r3), (r3, r1), (r1, r4), (r4, r2)] {
        match reg.add_beacon_link(a, b)? {
            LinkResult::Linked { fields } => {
                info!(fields = fields.len(), "red linked");
            }
            LinkResult::Rejected(reason) => info!(?reason, "red link refused"),
        }
    }
    info!(
        red = reg.score_for_team(red),
        total = reg.total_area(),
        "after red's build"
    );

    // Blue claims a triangle elsewhere.
    let b1 = reg.create_beacon(p(-40, 0), 70, Some(blue))?;
    let b2 = reg.create_beacon(p(-20, 0), 70, Some(blue))?;
    let b3 = reg.create_beacon(p(-30, 20), 70, Some(blue))?;
    reg.add_beacon_link(b1, b2)?;
    reg.add_beacon_link(b2, b3)?;
    reg.add_beacon_link(b3, b1)?;

    // A blue link straight through red's square would cut red's links.
    let crossing = reg.crossing_links(p(-20, 0), p(70, 70));
    info!(crossing = crossing.len(), "links in the way of a long blue link");

    report_scores(&reg);

    // Blue captures one of red's corners; every field on it dissolves.
    let dropped = reg.change_owner(r3, Some(blue))?;
    info!(dropped = dropped.len(), "red corner captured");
    reg.clear_recent_capture(r3)?;
    report_scores(&reg);

    // Near (55, 52) only red's square is in reach.
    for beacon in reg.nearby_beacons(p(55, 52), 15) {
        info!(position = %beacon.position(), owner = ?beacon.owner(), "nearby");
    }

    reg.audit()?;
    let (json, restored) = json_round_trip(&reg, config)?;
    info!(bytes = json.len(), beacons = restored.len(), "saved and restored");
    report_scores(&restored);
    Ok(())
}
