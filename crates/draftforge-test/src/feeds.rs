//! Raw feed fixtures.
//!
//! # Example
//!
//! ```
//! use draftforge_core::DraftablesFeed;
//! use draftforge_test::feeds::sample_feed_json;
//!
//! let feed = DraftablesFeed::from_json_str(&sample_feed_json()).unwrap();
//! assert_eq!(feed.draftables.len(), 5);
//! assert_eq!(feed.skipped, 1);
//! ```

use draftforge_core::{DraftableRecord, StatsRow};

use crate::pools::REFERENCE_SLATE;

/// Column of [`reference_stats_rows`] holding actual points.
pub const STATS_POINTS_COLUMN: usize = 17;

/// Draftable records for the reference slate, one per player-game, all available.
pub fn reference_records() -> Vec<DraftableRecord> {
    REFERENCE_SLATE
        .iter()
        .enumerate()
        .map(|(i, &(name, code, salary, projection))| {
            DraftableRecord::new(name, format!("game-{i}"), salary, code, projection)
        })
        .collect()
}

/// Realized-stats rows for the reference slate.
///
/// Actual points are the projection minus 2.0, except for "Jets", whose
/// points cell is blank.
pub fn reference_stats_rows() -> Vec<StatsRow> {
    REFERENCE_SLATE
        .iter()
        .map(|&(name, code, _, projection)| {
            let mut columns = vec![String::from("0"); STATS_POINTS_COLUMN + 1];
            columns[STATS_POINTS_COLUMN] = if name == "Jets" {
                String::new()
            } else {
                format!("{:.1}", projection - 2.0)
            };
            StatsRow::new(format!("{name}   FA {code}"), columns)
        })
        .collect()
}

/// A provider feed with a game duplicate, an unavailable player, a record
/// with unparsable numerics and one non-object entry.
pub fn sample_feed_json() -> String {
    r#"{
        "draftables": [
            {
                "displayName": "Josh Allen",
                "playerGameHash": "buf-1",
                "salary": 8200,
                "position": "QB",
                "status": "None",
                "draftStatAttributes": [
                    { "id": 90, "value": "-" },
                    { "id": 219, "value": "24.1" }
                ]
            },
            {
                "displayName": "Josh Allen",
                "playerGameHash": "buf-1",
                "salary": 8200,
                "position": "QB",
                "status": "None",
                "draftStatAttributes": [{ "id": 219, "value": "24.1" }]
            },
            {
                "displayName": "Tyreek Hill",
                "playerGameHash": "mia-1",
                "salary": 8600,
                "position": "WR",
                "status": "O",
                "draftStatAttributes": [{ "id": 219, "value": 20.9 }]
            },
            {
                "displayName": "Bills",
                "playerGameHash": "buf-2",
                "salary": "lots",
                "position": "DST",
                "status": "None",
                "draftStatAttributes": "none"
            },
            42,
            {
                "displayName": "Travis Kelce",
                "playerGameHash": "kc-1",
                "salary": 7700,
                "position": "TE",
                "status": "None",
                "draftStatAttributes": [{ "id": 219, "value": 17.5 }]
            }
        ]
    }"#
    .to_string()
}
