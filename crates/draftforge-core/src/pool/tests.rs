//! Tests for the player pool and its builder.

use super::*;
use crate::error::DraftForgeError;
use crate::player::Availability;

fn record(name: &str, hash: &str, salary: u32, position: &str, projection: f64) -> DraftableRecord {
    DraftableRecord::new(name, hash, salary, position, projection)
}

fn sample_records() -> Vec<DraftableRecord> {
    vec![
        record("Patrick Mahomes", "kc-1", 7800, "QB", 23.4),
        record("Patrick Mahomes", "kc-1", 7800, "QB", 23.4),
        record("Derrick Henry", "ten-1", 8200, "RB", 19.1),
        record("Tyreek Hill", "kc-2", 7300, "WR", 17.8).with_status("Q"),
        record("49ers ", "sf-1", 3400, "DST", 8.0),
    ]
}

#[test]
fn test_build_drops_game_duplicates_and_unavailable() {
    let build = PoolBuilder::new().build(&[], &sample_records()).unwrap();

    assert_eq!(build.pool.len(), 3);
    assert_eq!(build.report.records_seen, 5);
    assert_eq!(build.report.game_duplicates_dropped, 1);
    assert_eq!(build.report.unavailable_dropped, 1);
    assert!(!build.pool.contains("Tyreek Hill"));
    assert!(build.pool.contains("49ers"));
}

#[test]
fn test_build_keeps_insertion_order() {
    let build = PoolBuilder::new().build(&[], &sample_records()).unwrap();
    let ids: Vec<&str> = build.pool.ids().collect();
    assert_eq!(ids, vec!["Patrick Mahomes", "Derrick Henry", "49ers"]);
}

#[test]
fn test_build_parallel_maps_share_keys() {
    let build = PoolBuilder::new().build(&[], &sample_records()).unwrap();
    let pool = &build.pool;

    let salaries = pool.salaries();
    let positions = pool.positions();
    let scores = pool.scores();
    for id in pool.ids() {
        assert!(salaries.contains_key(id));
        assert!(positions.contains_key(id));
        assert!(scores.contains_key(id));
    }
    assert_eq!(salaries["Derrick Henry"], 8200);
    assert_eq!(positions["Derrick Henry"], &Position::Rb);
    assert_eq!(scores["Patrick Mahomes"], 23.4);
}

#[test]
fn test_build_is_stable_on_clean_input() {
    let records = vec![
        record("A", "g1", 5000, "RB", 10.0),
        record("B", "g2", 6000, "WR", 12.0),
        record("C", "g3", 4000, "TE", 8.0),
    ];
    let builder = PoolBuilder::new();
    let first = builder.build(&[], &records).unwrap();
    let second = builder.build(&[], &records).unwrap();

    assert_eq!(first.pool, second.pool);
    assert_eq!(first.report, second.report);
    assert_eq!(first.pool.len(), records.len());
}

#[test]
fn test_identity_collision_keeps_first() {
    let records = vec![
        record("Mike Williams", "lac-1", 5000, "WR", 11.0),
        record("Mike Williams", "tb-1", 3000, "WR", 4.0),
    ];
    let build = PoolBuilder::new().build(&[], &records).unwrap();

    assert_eq!(build.pool.len(), 1);
    assert_eq!(build.report.identity_duplicates, 1);
    let kept = build.pool.get("Mike Williams").unwrap();
    assert_eq!(kept.salary(), 5000);
    assert_eq!(kept.projected_score(), 11.0);
}

#[test]
fn test_identity_collision_rejected_when_configured() {
    let records = vec![
        record("Mike Williams", "lac-1", 5000, "WR", 11.0),
        record("Mike Williams", "tb-1", 3000, "WR", 4.0),
    ];
    let result = PoolBuilder::new()
        .with_duplicate_policy(DuplicatePolicy::Reject)
        .build(&[], &records);

    match result {
        Err(DraftForgeError::DuplicateIdentity(id)) => assert_eq!(id, "Mike Williams"),
        other => panic!("expected duplicate identity error, got {other:?}"),
    }
}

#[test]
fn test_records_without_hash_are_not_collapsed() {
    let mut a = record("A", "x", 5000, "RB", 10.0);
    let mut b = record("B", "x", 5000, "RB", 9.0);
    a.player_game_hash = None;
    b.player_game_hash = None;

    let build = PoolBuilder::new().build(&[], &[a, b]).unwrap();
    assert_eq!(build.pool.len(), 2);
    assert_eq!(build.report.game_duplicates_dropped, 0);
}

#[test]
fn test_malformed_record_does_not_abort_build() {
    let feed = DraftablesFeed::from_json_str(
        r#"{"draftables": [
            {"displayName": "Good Player", "playerGameHash": "g1", "salary": 5000,
             "position": "RB", "status": "None",
             "draftStatAttributes": [{"id": 219, "value": "12.5"}]},
            {"displayName": "Bad Salary", "playerGameHash": "g2", "salary": "lots",
             "position": "WR", "status": "None",
             "draftStatAttributes": [{"id": 90, "value": "-"}]},
            {"playerGameHash": "g3", "salary": 3000, "position": "TE", "status": "None"},
            42
        ]}"#,
    )
    .unwrap();
    assert_eq!(feed.draftables.len(), 3);
    assert_eq!(feed.skipped, 1);

    let build = PoolBuilder::new().build(&[], &feed.draftables).unwrap();
    assert_eq!(build.pool.len(), 2);
    assert_eq!(build.report.malformed_records, 1);

    let bad = build.pool.get("Bad Salary").unwrap();
    assert_eq!(bad.salary(), 0);
    assert_eq!(bad.projected_score(), 0.0);
    assert_eq!(bad.availability(), &Availability::Available);
    assert_eq!(build.pool.get("Good Player").unwrap().projected_score(), 12.5);
}

#[test]
fn test_feed_accepts_numeric_fields_as_strings() {
    let feed = DraftablesFeed::from_json_str(
        r#"[{"displayName": "A", "playerGameHash": 123, "salary": "4500",
             "position": "WR", "status": "None",
             "draftStatAttributes": [{"id": "219", "value": 9.5}]}]"#,
    )
    .unwrap();
    let record = &feed.draftables[0];
    assert_eq!(record.player_game_hash.as_deref(), Some("123"));
    assert_eq!(record.salary, 4500);
    assert_eq!(record.draft_stat_attributes[0].id, Some(219));
    assert_eq!(record.projection(), 9.5);
}

#[test]
fn test_feed_without_draftables_is_empty() {
    let feed = DraftablesFeed::from_json_str(r#"{"players": []}"#).unwrap();
    assert!(feed.draftables.is_empty());
}

#[test]
fn test_feed_invalid_json_is_error() {
    assert!(matches!(
        DraftablesFeed::from_json_str("{not json"),
        Err(DraftForgeError::Json(_))
    ));
}

#[test]
fn test_projection_first_parsable_wins() {
    let attributes = vec![
        StatAttribute::new(1, serde_json::Value::Null),
        StatAttribute::new(2, "n/a"),
        StatAttribute::new(3, "NaN"),
        StatAttribute::new(4, "7.25"),
        StatAttribute::new(5, 99.0),
    ];
    assert_eq!(projection_from_attributes(&attributes), 7.25);
}

#[test]
fn test_projection_defaults_to_zero() {
    let attributes = vec![StatAttribute::new(1, "-"), StatAttribute::new(2, true)];
    assert_eq!(projection_from_attributes(&attributes), 0.0);
}

#[test]
fn test_realized_stats_lookup() {
    let rows = vec![
        StatsRow::new("Derrick Henry   TEN RB", ["1", "2", "31.4"]),
        StatsRow::new("Patrick Mahomes  KC QB", ["1", "2", "28.0"]),
        StatsRow::new("Travis Kelce  KC TE", ["1", "2", "-"]),
    ];
    let build = PoolBuilder::new()
        .with_stats_points_column(2)
        .build(&rows, &[])
        .unwrap();
    let realized = build.realized.unwrap();

    assert_eq!(realized.len(), 3);
    assert_eq!(realized.actual_points("Derrick Henry"), Some(31.4));
    assert_eq!(realized.actual_points(" Patrick Mahomes "), Some(28.0));
    assert_eq!(realized.actual_points("Travis Kelce"), None);
    assert_eq!(realized.actual_points("Nobody"), None);
    assert_eq!(realized.actual_points(""), None);
}

#[test]
fn test_realized_stats_prefers_exact_match() {
    let rows = vec![
        StatsRow::new("Mike Williams Jr.  X WR", ["10.0"]),
        StatsRow::new("Mike Williams  LAC WR", ["20.0"]),
    ];
    let realized = RealizedStats::from_rows(&rows, 0);

    assert_eq!(realized.actual_points("Mike Williams"), Some(20.0));
    assert_eq!(realized.actual_points("Williams Jr."), Some(10.0));
}

#[test]
fn test_count_by_position() {
    let pool: PlayerPool = vec![
        Player::available("A", 1, Position::Rb, 1.0),
        Player::available("B", 1, Position::Rb, 1.0),
        Player::available("C", 1, Position::Wr, 1.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(pool.count_by_position(&Position::Rb), 2);
    assert_eq!(pool.count_by_position(&Position::Qb), 0);
}
