//! Solve outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::SolveStats;

/// Termination status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The search completed and the solution is proven optimal.
    Optimal,
    /// The search was stopped early but holds an incumbent.
    Feasible,
    /// The search completed without any feasible assignment.
    Infeasible,
    /// The search was stopped early before any incumbent was found.
    Interrupted,
}

impl SolveStatus {
    /// Returns true if the status carries a solution.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    /// Returns true if the search ran to completion.
    pub fn is_proven(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Infeasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Feasible => write!(f, "Feasible"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Interrupted => write!(f, "Interrupted"),
        }
    }
}

/// A 0/1 assignment with its objective value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarySolution {
    values: Vec<bool>,
    objective: f64,
}

impl BinarySolution {
    pub fn new(values: Vec<bool>, objective: f64) -> Self {
        Self { values, objective }
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Returns true if variable `index` is set to 1.
    pub fn is_selected(&self, index: usize) -> bool {
        self.values.get(index).copied().unwrap_or(false)
    }

    /// Indices of the variables set to 1.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(|(i, _)| i)
    }
}

/// Result of one branch-and-bound solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    status: SolveStatus,
    solution: Option<BinarySolution>,
    stats: SolveStats,
}

impl SolveOutcome {
    pub fn optimal(solution: BinarySolution, stats: SolveStats) -> Self {
        Self {
            status: SolveStatus::Optimal,
            solution: Some(solution),
            stats,
        }
    }

    pub fn infeasible(stats: SolveStats) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            solution: None,
            stats,
        }
    }

    /// The search was stopped by a termination condition.
    pub fn aborted(incumbent: Option<BinarySolution>, stats: SolveStats) -> Self {
        let status = if incumbent.is_some() {
            SolveStatus::Feasible
        } else {
            SolveStatus::Interrupted
        };
        Self {
            status,
            solution: incumbent,
            stats,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn solution(&self) -> Option<&BinarySolution> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<BinarySolution> {
        self.solution
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}
