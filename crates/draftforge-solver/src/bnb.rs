//! Depth-first branch-and-bound over LP relaxations.
//!
//! Each node fixes one more variable than its parent. Its relaxation gives an
//! upper bound; nodes whose bound cannot beat the incumbent are pruned.
//! Otherwise the search branches on the most fractional variable, diving into
//! the 1-branch first. Children re-solve from their parent's optimal basis.
//!
//! A relaxation that hits its pivot cap leaves a subtree unexplored, so the
//! solve then reports an aborted outcome instead of a proven optimum.

use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::lp::{LpOutcome, Relaxation, DEFAULT_PIVOT_LIMIT};
use crate::model::BinaryProgram;
use crate::result::{BinarySolution, SolveOutcome};
use crate::scope::SearchScope;
use crate::termination::{NoTermination, Termination};

/// Values closer than this to 0 or 1 count as integral.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// A node must beat the incumbent by more than this to be explored.
const BOUND_TOLERANCE: f64 = 1e-6;

#[derive(Debug)]
struct SearchNode {
    /// Solved relaxation of the parent, shared by both children.
    parent: Rc<Relaxation>,
    branch: Option<(usize, bool)>,
    /// Parent's relaxation objective.
    bound: f64,
    depth: u64,
}

impl SearchNode {
    fn root(relaxation: Relaxation) -> Self {
        Self {
            parent: Rc::new(relaxation),
            branch: None,
            bound: f64::INFINITY,
            depth: 0,
        }
    }

    fn child(parent: &Rc<Relaxation>, bound: f64, depth: u64, var: usize, value: bool) -> Self {
        Self {
            parent: Rc::clone(parent),
            branch: Some((var, value)),
            bound,
            depth: depth + 1,
        }
    }
}

/// Exact solver for [`BinaryProgram`]s.
///
/// # Example
///
/// ```
/// use draftforge_solver::{BinaryProgram, BranchAndBound, ConstraintSense, LinearExpr, SolveStatus};
///
/// let mut program = BinaryProgram::new("pick-two");
/// let vars: Vec<_> = (0..4).map(|i| program.add_variable(format!("x{i}"))).collect();
/// for (var, value) in vars.iter().zip([4.0, 1.0, 3.0, 2.0]) {
///     program.set_objective(*var, value).unwrap();
/// }
/// program
///     .add_constraint("two", LinearExpr::sum(vars.iter().copied()), ConstraintSense::Equal, 2.0)
///     .unwrap();
///
/// let outcome = BranchAndBound::new().solve(&program);
/// assert_eq!(outcome.status(), SolveStatus::Optimal);
/// let solution = outcome.solution().unwrap();
/// assert_eq!(solution.selected().collect::<Vec<_>>(), vec![0, 2]);
/// assert_eq!(solution.objective(), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound<T = NoTermination> {
    termination: T,
    pivot_limit: u64,
}

impl BranchAndBound<NoTermination> {
    /// Creates a solver that always runs to completion.
    pub fn new() -> Self {
        Self::with_termination(NoTermination)
    }
}

impl Default for BranchAndBound<NoTermination> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Termination> BranchAndBound<T> {
    /// Creates a solver stopped by `termination`.
    pub fn with_termination(termination: T) -> Self {
        Self {
            termination,
            pivot_limit: DEFAULT_PIVOT_LIMIT,
        }
    }

    /// Caps the simplex pivots spent on any single node.
    pub fn with_pivot_limit(mut self, limit: u64) -> Self {
        self.pivot_limit = limit;
        self
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }

    /// Maximizes `program` over 0/1 assignments.
    pub fn solve(&self, program: &BinaryProgram) -> SolveOutcome {
        let mut scope = SearchScope::new();
        let mut incumbent: Option<BinarySolution> = None;
        let root = Relaxation::new(program).with_pivot_limit(self.pivot_limit);
        let mut stack = vec![SearchNode::root(root)];
        let mut terminated = false;
        let mut incomplete = false;

        while let Some(node) = stack.pop() {
            if self.termination.is_terminated(&scope) {
                terminated = true;
                break;
            }
            if let Some(best) = &incumbent {
                if node.bound <= best.objective() + BOUND_TOLERANCE {
                    scope.stats_mut().on_pruning_bound();
                    trace!(
                        event = "node_pruned",
                        reason = "parent_bound",
                        depth = node.depth
                    );
                    continue;
                }
            }
            scope.stats_mut().on_node(node.depth);

            let mut relaxation =
                Rc::try_unwrap(node.parent).unwrap_or_else(|shared| (*shared).clone());
            if let Some((var, value)) = node.branch {
                relaxation.fix(var, value);
            }
            let result = relaxation.solve();
            scope.stats_mut().on_lp_solve(result.pivots);

            let lp = match result.outcome {
                LpOutcome::Optimal(lp) => lp,
                LpOutcome::Infeasible => {
                    scope.stats_mut().on_pruning_infeasible();
                    trace!(
                        event = "node_pruned",
                        reason = "infeasible",
                        depth = node.depth
                    );
                    continue;
                }
                LpOutcome::IterationLimit => {
                    incomplete = true;
                    warn!(
                        event = "relaxation_failed",
                        program = program.name(),
                        depth = node.depth,
                        pivots = result.pivots
                    );
                    continue;
                }
            };

            if let Some(best) = &incumbent {
                if lp.objective <= best.objective() + BOUND_TOLERANCE {
                    scope.stats_mut().on_pruning_bound();
                    trace!(
                        event = "node_pruned",
                        reason = "bound",
                        depth = node.depth,
                        bound = lp.objective,
                        incumbent = best.objective()
                    );
                    continue;
                }
            }

            match most_fractional(&lp.values, &relaxation) {
                Some(var) => {
                    let parent = Rc::new(relaxation);
                    stack.push(SearchNode::child(&parent, lp.objective, node.depth, var, false));
                    stack.push(SearchNode::child(&parent, lp.objective, node.depth, var, true));
                }
                None => {
                    let values: Vec<bool> = lp.values.iter().map(|&v| v > 0.5).collect();
                    if !program.is_feasible(&values) {
                        scope.stats_mut().on_pruning_infeasible();
                        trace!(
                            event = "node_pruned",
                            reason = "rounding",
                            depth = node.depth
                        );
                        continue;
                    }
                    let objective = program.objective_value(&values);
                    if incumbent
                        .as_ref()
                        .map_or(true, |best| objective > best.objective() + BOUND_TOLERANCE)
                    {
                        scope.stats_mut().on_solution_found();
                        scope.mark_incumbent();
                        trace!(
                            event = "incumbent_improved",
                            objective,
                            depth = node.depth,
                            nodes = scope.stats().nodes_explored
                        );
                        incumbent = Some(BinarySolution::new(values, objective));
                    }
                }
            }
        }

        let stats = scope.finish();
        let outcome = if terminated || incomplete {
            SolveOutcome::aborted(incumbent, stats)
        } else {
            match incumbent {
                Some(solution) => SolveOutcome::optimal(solution, stats),
                None => SolveOutcome::infeasible(stats),
            }
        };

        debug!(
            event = "solve_end",
            program = program.name(),
            status = %outcome.status(),
            objective = outcome.solution().map(BinarySolution::objective),
            incomplete,
            nodes = stats.nodes_explored,
            prunings = stats.prunings(),
            pivots = stats.simplex_pivots,
            duration_ms = stats.time_total.as_millis() as u64
        );
        outcome
    }
}

/// Free variable whose relaxed value is furthest from integral.
fn most_fractional(values: &[f64], relaxation: &Relaxation) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        if relaxation.fixing(i).is_some() {
            continue;
        }
        let distance = value.min(1.0 - value);
        if distance <= INTEGRALITY_TOLERANCE {
            continue;
        }
        if best.map_or(true, |(_, d)| distance > d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstraintSense, LinearExpr, VarId};
    use crate::result::SolveStatus;
    use crate::termination::{NodeCountTermination, TimeTermination};

    fn knapsack(values: &[f64], weights: &[f64], capacity: f64) -> (BinaryProgram, Vec<VarId>) {
        let mut program = BinaryProgram::new("knapsack");
        let vars: Vec<VarId> = (0..values.len())
            .map(|i| program.add_variable(format!("x{i}")))
            .collect();
        for (var, &value) in vars.iter().zip(values) {
            program.set_objective(*var, value).unwrap();
        }
        let weight = vars.iter().copied().zip(weights.iter().copied()).collect();
        program
            .add_constraint("capacity", weight, ConstraintSense::LessOrEqual, capacity)
            .unwrap();
        (program, vars)
    }

    fn brute_force(program: &BinaryProgram) -> Option<f64> {
        let n = program.variable_count();
        let mut best: Option<f64> = None;
        for mask in 0u32..(1 << n) {
            let assignment: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
            if program.is_feasible(&assignment) {
                let value = program.objective_value(&assignment);
                if best.map_or(true, |b| value > b) {
                    best = Some(value);
                }
            }
        }
        best
    }

    #[test]
    fn test_knapsack_matches_brute_force() {
        let (program, _) = knapsack(
            &[10.0, 13.0, 7.0, 8.0, 9.0, 4.0, 11.0],
            &[5.0, 7.0, 3.0, 4.0, 5.0, 2.0, 6.0],
            15.0
        );

        let outcome = BranchAndBound::new().solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        let solution = outcome.solution().unwrap();
        assert!(program.is_feasible(solution.values()));
        let expected = brute_force(&program).unwrap();
        assert!((solution.objective() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cardinality_with_exclusion() {
        let (mut program, vars) = knapsack(&[5.0, 4.0, 3.0, 2.0], &[1.0; 4], 2.0);
        program
            .add_constraint("exactly_two", LinearExpr::sum(vars.clone()), ConstraintSense::Equal, 2.0)
            .unwrap();
        program
            .add_constraint(
                "exclude_best",
                LinearExpr::sum([vars[0], vars[1]]),
                ConstraintSense::LessOrEqual,
                1.0,
            )
            .unwrap();

        let outcome = BranchAndBound::new().solve(&program);
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.selected().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(solution.objective(), 8.0);
    }

    #[test]
    fn test_infeasible_program() {
        let (mut program, vars) = knapsack(&[1.0, 1.0], &[1.0, 1.0], 2.0);
        program
            .add_constraint("three", LinearExpr::sum(vars), ConstraintSense::GreaterOrEqual, 3.0)
            .unwrap();

        let outcome = BranchAndBound::new().solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Infeasible);
        assert!(outcome.solution().is_none());
        assert!(outcome.stats().prunings_infeasible >= 1);
    }

    #[test]
    fn test_integral_only_when_parity_forces_branching() {
        // 2a + 2b + 2c = 3 has no integral solution but a feasible relaxation.
        let mut program = BinaryProgram::new("parity");
        let vars: Vec<VarId> = (0..3).map(|i| program.add_variable(format!("x{i}"))).collect();
        let expr = vars.iter().map(|&v| (v, 2.0)).collect();
        program
            .add_constraint("odd", expr, ConstraintSense::Equal, 3.0)
            .unwrap();

        let outcome = BranchAndBound::new().solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Infeasible);
        assert!(outcome.stats().nodes_explored > 1);
    }

    #[test]
    fn test_empty_program_is_trivially_optimal() {
        let program = BinaryProgram::new("empty");
        let outcome = BranchAndBound::new().solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        assert_eq!(outcome.solution().unwrap().objective(), 0.0);
    }

    #[test]
    fn test_zero_time_limit_interrupts_without_incumbent() {
        let (program, _) = knapsack(&[3.0, 2.0], &[1.0, 1.0], 1.0);
        let outcome = BranchAndBound::with_termination(TimeTermination::millis(0)).solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Interrupted);
        assert!(outcome.solution().is_none());
        assert_eq!(outcome.stats().nodes_explored, 0);
    }

    #[test]
    fn test_node_limit_keeps_incumbent() {
        let (program, _) = knapsack(
            &[10.0, 13.0, 7.0, 8.0, 9.0, 4.0, 11.0],
            &[5.0, 7.0, 3.0, 4.0, 5.0, 2.0, 6.0],
            15.0
        );
        let full = BranchAndBound::new().solve(&program);
        let explored = full.stats().nodes_explored;
        assert!(explored > 2);

        // Stop one node short of completion.
        let limited = BranchAndBound::with_termination(NodeCountTermination::new(explored - 1))
            .solve(&program);
        if limited.solution().is_some() {
            assert_eq!(limited.status(), SolveStatus::Feasible);
            assert!(program.is_feasible(limited.solution().unwrap().values()));
        } else {
            assert_eq!(limited.status(), SolveStatus::Interrupted);
        }
    }

    #[test]
    fn test_pivot_cap_never_claims_optimality() {
        let (program, _) = knapsack(
            &[10.0, 13.0, 7.0, 8.0, 9.0, 4.0, 11.0],
            &[5.0, 7.0, 3.0, 4.0, 5.0, 2.0, 6.0],
            15.0
        );
        for limit in [0, 1] {
            let outcome = BranchAndBound::new().with_pivot_limit(limit).solve(&program);
            assert_ne!(outcome.status(), SolveStatus::Optimal);
            assert!(!outcome.status().is_proven());
            assert_eq!(outcome.status(), SolveStatus::Interrupted);
        }

        let full = BranchAndBound::new().with_pivot_limit(1_000).solve(&program);
        assert_eq!(full.status(), SolveStatus::Optimal);
    }

    #[test]
    fn test_larger_program_matches_brute_force() {
        // Two capacity rows and a cardinality window over 16 items.
        let values: Vec<f64> = (0..16).map(|i| 3.0 + ((i * 7) % 11) as f64).collect();
        let weights: Vec<f64> = (0..16).map(|i| 2.0 + ((i * 5) % 9) as f64).collect();
        let (mut program, vars) = knapsack(&values, &weights, 40.0);
        let volume = vars
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, 1.0 + ((i * 3) % 4) as f64))
            .collect();
        program
            .add_constraint("volume", volume, ConstraintSense::LessOrEqual, 17.0)
            .unwrap();
        program
            .add_constraint("at_least", LinearExpr::sum(vars.clone()), ConstraintSense::GreaterOrEqual, 5.0)
            .unwrap();
        program
            .add_constraint("at_most", LinearExpr::sum(vars), ConstraintSense::LessOrEqual, 8.0)
            .unwrap();

        let outcome = BranchAndBound::new().solve(&program);
        assert_eq!(outcome.status(), SolveStatus::Optimal);
        let solution = outcome.solution().unwrap();
        assert!(program.is_feasible(solution.values()));
        let expected = brute_force(&program).unwrap();
        assert!((solution.objective() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stats_are_consistent() {
        let (program, _) = knapsack(&[6.0, 5.0, 4.0], &[3.0, 2.0, 2.0], 4.0);
        let outcome = BranchAndBound::new().solve(&program);
        let stats = outcome.stats();
        assert_eq!(stats.lp_solves, stats.nodes_explored);
        assert!(stats.solutions_found >= 1);
        assert!(stats.max_depth <= 3);
    }
}
