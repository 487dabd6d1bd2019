//! Lineup optimizer: repeated integer-program solves with cumulative exclusion.
//!
//! Iteration `k` maximizes projected score subject to the base roster
//! constraints plus one overlap bound per lineup found in iterations
//! `1..k`. The loop stops early at the first solve with no lineup.

use std::time::Instant;

use draftforge_config::ContestConfig;
use draftforge_core::{DraftForgeError, PlayerPool, RealizedStats, Result, RosterRules};
use draftforge_solver::{
    BinarySolution, BranchAndBound, NodeCountTermination, OrTermination, SolveOutcome,
    SolveStatus, TimeTermination,
};
use tracing::{info, warn};

use crate::model::LineupModel;
use crate::result::{LineupResult, LineupSlot, OptimizationRun, StopReason};

type SolveTermination = OrTermination<(Option<TimeTermination>, Option<NodeCountTermination>)>;

/// Produces up to `config.lineup_count` distinct lineups from a pool.
///
/// # Example
///
/// ```
/// use draftforge::{ContestConfig, LineupOptimizer, Player, PlayerPool, Position};
///
/// let pool: PlayerPool = [
///     ("QB1", Position::Qb, 6000, 20.0),
///     ("DST1", Position::Dst, 3000, 8.0),
///     ("RB1", Position::Rb, 5000, 15.0),
///     ("RB2", Position::Rb, 5000, 14.0),
///     ("WR1", Position::Wr, 5000, 16.0),
///     ("WR2", Position::Wr, 5000, 15.0),
///     ("WR3", Position::Wr, 5000, 14.0),
///     ("TE1", Position::Te, 4000, 10.0),
///     ("TE2", Position::Te, 3500, 9.0),
/// ]
/// .into_iter()
/// .map(|(id, position, salary, score)| Player::available(id, salary, position, score))
/// .collect();
///
/// let run = LineupOptimizer::new(&pool, ContestConfig::new().with_lineup_count(3))
///     .optimize()
///     .unwrap();
///
/// // Nine players admit exactly one legal lineup.
/// assert_eq!(run.len(), 1);
/// assert_eq!(run.results[0].lineup.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct LineupOptimizer<'a> {
    pool: &'a PlayerPool,
    config: ContestConfig,
    realized: Option<&'a RealizedStats>,
}

impl<'a> LineupOptimizer<'a> {
    pub fn new(pool: &'a PlayerPool, config: ContestConfig) -> Self {
        Self {
            pool,
            config,
            realized: None,
        }
    }

    /// Joins every lineup against realized stats for actual points.
    pub fn with_realized(mut self, realized: &'a RealizedStats) -> Self {
        self.realized = Some(realized);
        self
    }

    pub fn config(&self) -> &ContestConfig {
        &self.config
    }

    /// Runs the solve loop.
    ///
    /// # Errors
    ///
    /// Returns error only for an invalid configuration. Infeasibility and
    /// solver limits end the run early and are reported in
    /// [`OptimizationRun::stop_reason`].
    pub fn optimize(&self) -> Result<OptimizationRun> {
        self.config
            .validate()
            .map_err(|e| DraftForgeError::Config(e.to_string()))?;

        let started = Instant::now();
        let requested = self.config.lineup_count;

        if self.pool.is_empty() {
            warn!(event = "optimize_skipped", reason = "empty_pool");
            return Ok(OptimizationRun {
                results: Vec::new(),
                stop_reason: StopReason::EmptyPool,
            });
        }

        let mut model = LineupModel::build(
            self.pool,
            &self.config.roster,
            self.config.salary_cap,
            self.config.max_overlap(),
        )?;
        let solver = BranchAndBound::with_termination(self.termination());

        info!(
            event = "optimize_start",
            players = model.variable_count(),
            lineups = requested,
            salary_cap = self.config.salary_cap,
            max_overlap = model.max_overlap()
        );

        let mut results = Vec::with_capacity(requested);
        let mut stop_reason = StopReason::Completed;

        for iteration in 1..=requested {
            let outcome = solver.solve(model.program());
            let Some(solution) = outcome.solution().cloned() else {
                stop_reason = match outcome.status() {
                    SolveStatus::Interrupted => {
                        warn!(event = "solver_interrupted", iteration);
                        StopReason::SolverInterrupted { iteration }
                    }
                    _ => {
                        info!(event = "no_more_lineups", iteration);
                        StopReason::Infeasible { iteration }
                    }
                };
                break;
            };

            if outcome.status() == SolveStatus::Feasible {
                warn!(event = "lineup_not_proven_optimal", iteration);
            }

            let result = self.materialize(iteration, &model, &solution, &outcome);
            info!(
                event = "lineup_found",
                iteration,
                projected = result.projected_score,
                salary = result.total_salary,
                actual = result.actual_points,
                nodes = outcome.stats().nodes_explored
            );
            model.exclude(&result.lineup)?;
            results.push(result);
        }

        info!(
            event = "optimize_end",
            lineups = results.len(),
            requested,
            stop_reason = %stop_reason,
            duration_ms = started.elapsed().as_millis() as u64
        );

        Ok(OptimizationRun {
            results,
            stop_reason,
        })
    }

    fn termination(&self) -> SolveTermination {
        OrTermination((
            Some(TimeTermination::new(self.config.time_limit())),
            self.config.node_count_limit().map(NodeCountTermination::new),
        ))
    }

    fn materialize(
        &self,
        iteration: usize,
        model: &LineupModel,
        solution: &BinarySolution,
        outcome: &SolveOutcome,
    ) -> LineupResult {
        let lineup = model.lineup(solution);
        let slots: Vec<LineupSlot> = lineup
            .iter()
            .filter_map(|id| self.pool.get(id))
            .map(|player| LineupSlot {
                id: player.id().to_string(),
                position: player.position().clone(),
                salary: player.salary(),
                projected: player.projected_score(),
                actual: self
                    .realized
                    .and_then(|realized| realized.actual_points(player.id())),
            })
            .collect();

        let total_salary = slots.iter().map(|s| u64::from(s.salary)).sum();
        let projected_score = solution.objective();
        let actual_points = if slots.iter().any(|s| s.actual.is_some()) {
            Some(slots.iter().filter_map(|s| s.actual).sum::<f64>())
        } else {
            None
        };

        LineupResult {
            iteration,
            constraints: model.evaluate(solution),
            lineup,
            slots,
            total_salary,
            projected_score,
            actual_points,
            point_difference: actual_points.map(|actual| projected_score - actual),
            proven_optimal: outcome.status() == SolveStatus::Optimal,
            stats: *outcome.stats(),
        }
    }
}

/// Produces up to `num_lineups` lineups under `salary_cap` and `roster_rules`.
///
/// Uses the default overlap bound (lineup size minus one) and no solver limits.
///
/// # Errors
///
/// Returns error if the roster rules are inconsistent.
pub fn optimize(
    pool: &PlayerPool,
    num_lineups: usize,
    salary_cap: u32,
    roster_rules: &RosterRules,
) -> Result<Vec<LineupResult>> {
    let config = ContestConfig::new()
        .with_lineup_count(num_lineups)
        .with_salary_cap(salary_cap)
        .with_roster(roster_rules.clone());
    Ok(LineupOptimizer::new(pool, config).optimize()?.results)
}
