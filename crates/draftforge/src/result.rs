//! Lineup results and diagnostics.

use std::fmt;

use draftforge_core::{Lineup, PlayerId, Position};
use draftforge_solver::{ConstraintSense, SolveStats};
use serde::Serialize;

/// One model constraint evaluated at a chosen lineup.
///
/// `binding` is true when the left-hand side sits exactly on the bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintEvaluation {
    pub name: String,
    pub lhs: f64,
    pub sense: ConstraintSense,
    pub rhs: f64,
    pub binding: bool,
}

impl fmt::Display for ConstraintEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {} {}", self.name, self.lhs, self.sense, self.rhs)?;
        if self.binding {
            write!(f, " (binding)")?;
        }
        Ok(())
    }
}

/// A selected player with the values the lineup was scored on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupSlot {
    pub id: PlayerId,
    pub position: Position,
    pub salary: u32,
    pub projected: f64,
    /// Points actually scored, when realized stats were supplied and matched.
    pub actual: Option<f64>,
}

/// One lineup found by the optimizer.
#[derive(Debug, Clone, Serialize)]
pub struct LineupResult {
    /// 1-based discovery order.
    pub iteration: usize,
    pub lineup: Lineup,
    pub slots: Vec<LineupSlot>,
    pub total_salary: u64,
    /// Objective value of the solve.
    pub projected_score: f64,
    /// Sum of matched actual points; `None` without realized stats or matches.
    pub actual_points: Option<f64>,
    /// `projected_score - actual_points`.
    pub point_difference: Option<f64>,
    /// Every constraint of the model as it stood for this solve.
    pub constraints: Vec<ConstraintEvaluation>,
    /// False when the solve was stopped early and the lineup is the best found.
    pub proven_optimal: bool,
    pub stats: SolveStats,
}

impl LineupResult {
    /// Constraints whose bound is met with equality.
    pub fn binding_constraints(&self) -> impl Iterator<Item = &ConstraintEvaluation> {
        self.constraints.iter().filter(|c| c.binding)
    }

    /// Number of selected players at `position`.
    pub fn count_at(&self, position: &Position) -> usize {
        self.slots.iter().filter(|s| &s.position == position).count()
    }
}

/// Why the optimizer stopped producing lineups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum StopReason {
    /// All requested lineups were produced.
    Completed,
    /// The solve for `iteration` had no feasible lineup.
    Infeasible { iteration: usize },
    /// The solve for `iteration` hit its limit before finding any lineup.
    SolverInterrupted { iteration: usize },
    /// The pool held no players.
    EmptyPool,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Completed => write!(f, "completed"),
            StopReason::Infeasible { iteration } => {
                write!(f, "no feasible lineup at iteration {iteration}")
            }
            StopReason::SolverInterrupted { iteration } => {
                write!(f, "solver interrupted at iteration {iteration}")
            }
            StopReason::EmptyPool => write!(f, "empty player pool"),
        }
    }
}

/// Lineups of one optimizer run, in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationRun {
    pub results: Vec<LineupResult>,
    pub stop_reason: StopReason,
}

impl OptimizationRun {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineupResult> {
        self.results.iter()
    }

    /// The first lineup, which no exclusion constrained.
    pub fn best(&self) -> Option<&LineupResult> {
        self.results.first()
    }

    /// Returns true if every requested lineup was produced.
    pub fn is_complete(&self) -> bool {
        self.stop_reason == StopReason::Completed
    }
}

impl IntoIterator for OptimizationRun {
    type Item = LineupResult;
    type IntoIter = std::vec::IntoIter<LineupResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
