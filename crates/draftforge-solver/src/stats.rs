//! Branch-and-bound statistics.
//!
//! Stack-allocated counters for one solve.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters collected while solving one program.
///
/// # Example
///
/// ```
/// use draftforge_solver::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.on_node(3);
/// stats.on_node(1);
/// stats.on_lp_solve(12);
/// stats.on_pruning_bound();
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.max_depth, 3);
/// assert_eq!(stats.simplex_pivots, 12);
/// assert_eq!(stats.prunings_bound, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Search nodes popped from the stack.
    pub nodes_explored: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes discarded because their relaxation was infeasible.
    pub prunings_infeasible: u64,
    /// Improving integral solutions found.
    pub solutions_found: u64,
    /// LP relaxations solved.
    pub lp_solves: u64,
    /// Simplex pivots across all relaxations.
    pub simplex_pivots: u64,
    /// Deepest node visited.
    pub max_depth: u64,
    /// Wall time of the solve.
    pub time_total: Duration,
}

impl SolveStats {
    pub fn on_node(&mut self, depth: u64) {
        self.nodes_explored += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound += 1;
    }

    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible += 1;
    }

    pub fn on_solution_found(&mut self) {
        self.solutions_found += 1;
    }

    pub fn on_lp_solve(&mut self, pivots: u64) {
        self.lp_solves += 1;
        self.simplex_pivots += pivots;
    }

    pub fn set_total_time(&mut self, time: Duration) {
        self.time_total = time;
    }

    /// Total prunings of either kind.
    pub fn prunings(&self) -> u64 {
        self.prunings_bound + self.prunings_infeasible
    }
}

impl fmt::Display for SolveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} prunings ({} bound, {} infeasible), {} solutions, {} LPs, {} pivots, depth {}, {:?}",
            self.nodes_explored,
            self.prunings(),
            self.prunings_bound,
            self.prunings_infeasible,
            self.solutions_found,
            self.lp_solves,
            self.simplex_pivots,
            self.max_depth,
            self.time_total
        )
    }
}
