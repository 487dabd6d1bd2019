//! End-to-end properties of the lineup optimizer.

use draftforge::prelude::*;
use draftforge::{ContestConfig, StopReason};
use draftforge_test::pools::{
    interchangeable_pair_pool, minimal_pool, player, reference_pool, seeded_slate_pool,
    thin_running_back_pool,
};
use std::time::Duration;
use proptest::prelude::*;

const CAP: u32 = 50_000;

fn run(pool: &PlayerPool, lineups: usize) -> OptimizationRun {
    LineupOptimizer::new(pool, ContestConfig::new().with_lineup_count(lineups))
        .optimize()
        .unwrap()
}

fn assert_legal(pool: &PlayerPool, results: &[LineupResult]) {
    let rules = RosterRules::reference();
    for result in results {
        let violations = rules.check(&result.lineup, pool, CAP);
        assert!(
            violations.is_empty(),
            "lineup {} violates {:?}",
            result.iteration,
            violations
        );
        assert_eq!(result.lineup.len(), 9);
        assert!(result.total_salary <= u64::from(CAP));
        assert_eq!(result.count_at(&Position::Qb), 1);
        assert_eq!(result.count_at(&Position::Dst), 1);
        let rb = result.count_at(&Position::Rb);
        let wr = result.count_at(&Position::Wr);
        let te = result.count_at(&Position::Te);
        assert!((2..=3).contains(&rb));
        assert!((3..=4).contains(&wr));
        assert!((1..=2).contains(&te));
        assert_eq!(rb + wr + te, 7);
    }
}

fn assert_distinct(results: &[LineupResult]) {
    for (i, earlier) in results.iter().enumerate() {
        for later in &results[i + 1..] {
            assert!(earlier.lineup.overlap(&later.lineup) <= 8);
            assert!(earlier.lineup.symmetric_difference(&later.lineup) >= 2);
        }
    }
}

fn assert_first_is_best(results: &[LineupResult]) {
    if let Some(first) = results.first() {
        for later in &results[1..] {
            assert!(first.projected_score + 1e-9 >= later.projected_score);
        }
    }
}

#[test]
fn test_reference_pool_lineups_are_legal_and_distinct() {
    let pool = reference_pool();
    let run = run(&pool, 10);

    assert_eq!(run.len(), 10);
    assert!(run.is_complete());
    for (i, result) in run.iter().enumerate() {
        assert_eq!(result.iteration, i + 1);
        assert!(result.proven_optimal);
    }
    assert_legal(&pool, &run.results);
    assert_distinct(&run.results);
    assert_first_is_best(&run.results);
}

#[test]
fn test_full_size_slate_within_time_budget() {
    let budget = Duration::from_millis(5_000);
    for seed in [11, 29] {
        let pool = seeded_slate_pool(seed, 300);
        assert_eq!(pool.len(), 300);
        let config = ContestConfig::new()
            .with_lineup_count(10)
            .with_time_limit_millis(budget.as_millis() as u64);
        let run = LineupOptimizer::new(&pool, config).optimize().unwrap();

        assert_legal(&pool, &run.results);
        assert_distinct(&run.results);
        for (i, result) in run.iter().enumerate() {
            assert_eq!(result.iteration, i + 1);
            assert!(result.projected_score > 0.0);
            if !result.proven_optimal {
                assert!(result.stats.time_total >= budget);
            }
        }
        match run.stop_reason {
            StopReason::Completed => assert_eq!(run.len(), 10),
            StopReason::SolverInterrupted { iteration } => assert_eq!(iteration, run.len() + 1),
            other => panic!("seed {seed} stopped with {other}"),
        }
        if run.results.iter().all(|r| r.proven_optimal) {
            assert_first_is_best(&run.results);
        }
    }
}

#[test]
fn test_first_lineup_matches_exhaustive_enumeration() {
    let pool = reference_pool();
    let players: Vec<&Player> = pool.iter().collect();
    let rules = RosterRules::reference();

    let mut best = f64::NEG_INFINITY;
    for mask in 0u32..(1 << players.len()) {
        if mask.count_ones() != 9 {
            continue;
        }
        let lineup = Lineup::new(
            players
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, p)| p.id()),
        );
        if rules.check(&lineup, &pool, CAP).is_empty() {
            let score: f64 = lineup
                .iter()
                .filter_map(|id| pool.get(id))
                .map(Player::projected_score)
                .sum();
            best = best.max(score);
        }
    }

    let first = run(&pool, 1).results.remove(0);
    assert!((first.projected_score - best).abs() < 1e-6);
}

#[test]
fn test_exactly_nine_players_give_one_lineup() {
    let pool = minimal_pool();
    let run = run(&pool, 5);

    assert_eq!(run.len(), 1);
    assert_eq!(run.stop_reason, StopReason::Infeasible { iteration: 2 });
    let ids: Vec<&str> = pool.ids().collect();
    assert!(ids.iter().all(|id| run.results[0].lineup.contains(id)));
    assert_legal(&pool, &run.results);
}

#[test]
fn test_single_running_back_gives_no_lineups() {
    let pool = thin_running_back_pool();
    let run = run(&pool, 10);

    assert!(run.is_empty());
    assert_eq!(run.stop_reason, StopReason::Infeasible { iteration: 1 });
}

#[test]
fn test_higher_projection_wins_between_interchangeable_players() {
    let pool = interchangeable_pair_pool();
    let first = run(&pool, 1).results.remove(0);

    assert!(first.lineup.contains("High Back"));
    assert!(!first.lineup.contains("Low Back"));
}

#[test]
fn test_binding_salary_is_reported() {
    let pool = reference_pool();
    let first = run(&pool, 1).results.remove(0);

    let salary = first
        .constraints
        .iter()
        .find(|c| c.name == "salary")
        .unwrap();
    assert_eq!(salary.lhs, first.total_salary as f64);
    assert_eq!(salary.rhs, f64::from(CAP));
    let flex = first
        .constraints
        .iter()
        .find(|c| c.name == "flex_count")
        .unwrap();
    assert!(flex.binding);
    assert!(first.binding_constraints().any(|c| c.name == "qb_count"));
}

#[test]
fn test_ungoverned_players_never_selected() {
    let mut pool = reference_pool();
    pool.insert(player("Justin Tucker", Position::K, 1000, 50.0));

    let run = run(&pool, 3);
    assert_eq!(run.len(), 3);
    assert!(run.iter().all(|r| !r.lineup.contains("Justin Tucker")));
}

fn arb_pool() -> impl Strategy<Value = PlayerPool> {
    let positions = prop::collection::vec(
        (
            prop::sample::select(vec!["QB", "DST", "RB", "WR", "TE"]),
            3000u32..9000,
            0.0f64..30.0,
        ),
        9..16,
    );
    positions.prop_map(|players| {
        players
            .into_iter()
            .enumerate()
            .map(|(i, (code, salary, projection))| {
                player(&format!("P{i}"), Position::parse(code), salary, projection)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_every_lineup_respects_the_roster(pool in arb_pool()) {
        let run = run(&pool, 4);
        assert_legal(&pool, &run.results);
        assert_distinct(&run.results);
        assert_first_is_best(&run.results);
        prop_assert!(run.len() <= 4);
        if run.len() < 4 {
            let stopped_early = matches!(run.stop_reason, StopReason::Infeasible { .. });
            prop_assert!(stopped_early);
        }
    }
}
