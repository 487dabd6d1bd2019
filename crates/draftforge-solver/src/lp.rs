//! LP relaxation of a binary program.
//!
//! Solves `max c·x` subject to the program's constraints and `0 <= x <= 1`
//! with a bounded-variable dual simplex on a dense tableau. Every row gets a
//! logical column whose bounds encode the row's sense, so the all-logical
//! basis with each structural column at its better bound is dual feasible
//! from the start and no phase one is needed.
//!
//! A solved [`Relaxation`] can be cloned, have a variable fixed and be
//! re-solved; fixing a bound keeps the basis dual feasible, so a child node
//! typically needs only a handful of pivots from its parent's optimum.

use crate::model::{BinaryProgram, ConstraintSense};

/// Pivot element magnitude below which a column is treated as zero.
const PIVOT_EPSILON: f64 = 1e-9;

/// Ratio below which a dual pivot counts as degenerate.
const COST_EPSILON: f64 = 1e-9;

/// Bound violation above which a basic variable is primal infeasible.
const PRIMAL_TOLERANCE: f64 = 1e-7;

/// Consecutive degenerate pivots before switching to Bland's rule.
const DEGENERATE_STREAK: usize = 50;

/// Default cap on pivots per relaxation solve.
pub const DEFAULT_PIVOT_LIMIT: u64 = 100_000;

/// Fractional optimum of a relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// One value per program variable, fixed variables included.
    pub values: Vec<f64>,
    /// Objective value, fixed variables included.
    pub objective: f64,
}

/// Outcome of one relaxation.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    Optimal(LpSolution),
    Infeasible,
    /// The pivot cap was reached before optimality was proven.
    IterationLimit,
}

/// Relaxation outcome with the simplex work it took.
#[derive(Debug, Clone, PartialEq)]
pub struct LpResult {
    pub outcome: LpOutcome,
    pub pivots: u64,
}

impl LpResult {
    fn new(outcome: LpOutcome, pivots: u64) -> Self {
        Self { outcome, pivots }
    }
}

/// Solves the LP relaxation of `program` under `fixings` from scratch.
///
/// `fixings[i]` pins variable `i` to 0 or 1 when set; a shorter slice leaves
/// the remaining variables free.
pub fn solve_relaxation(program: &BinaryProgram, fixings: &[Option<bool>]) -> LpResult {
    let mut relaxation = Relaxation::new(program);
    for (var, fixing) in fixings.iter().enumerate() {
        if let Some(value) = fixing {
            relaxation.fix(var, *value);
        }
    }
    relaxation.solve()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnState {
    Basic,
    AtLower,
    AtUpper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Lower,
    Upper,
}

/// Warm-startable LP relaxation of a [`BinaryProgram`].
///
/// Columns `0..structural` are the program's variables; column
/// `structural + i` is the logical variable of row `i`, with
/// `a_i·x + s_i = b_i`. A `<=` row bounds its logical to `[0, inf)`, a `>=`
/// row to `(-inf, 0]` and an equality to `[0, 0]`.
///
/// # Example
///
/// ```
/// use draftforge_solver::{BinaryProgram, ConstraintSense, LinearExpr, LpOutcome, Relaxation};
///
/// let mut program = BinaryProgram::new("one-of-two");
/// let a = program.add_variable("a");
/// let b = program.add_variable("b");
/// program.set_objective(a, 3.0).unwrap();
/// program.set_objective(b, 2.0).unwrap();
/// program
///     .add_constraint("one", LinearExpr::sum([a, b]), ConstraintSense::LessOrEqual, 1.0)
///     .unwrap();
///
/// let mut root = Relaxation::new(&program);
/// assert!(matches!(root.solve().outcome, LpOutcome::Optimal(ref lp) if lp.objective == 3.0));
///
/// let mut child = root.clone();
/// child.fix(a.index(), false);
/// match child.solve().outcome {
///     LpOutcome::Optimal(lp) => assert_eq!(lp.values, vec![0.0, 1.0]),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Relaxation {
    rows: usize,
    cols: usize,
    structural: usize,
    /// `rows x cols` tableau `B^-1 [A I]`.
    cells: Vec<f64>,
    /// Reduced costs `c_j - c_B B^-1 a_j`.
    reduced: Vec<f64>,
    cost: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    state: Vec<ColumnState>,
    basis: Vec<usize>,
    /// Value of the basic variable of each row.
    basic_values: Vec<f64>,
    pivot_limit: u64,
}

impl Relaxation {
    /// Builds the relaxation with every variable free in `[0, 1]`.
    pub fn new(program: &BinaryProgram) -> Self {
        let structural = program.variable_count();
        let rows = program.constraint_count();
        let cols = structural + rows;

        let mut cost = vec![0.0; cols];
        cost[..structural].copy_from_slice(program.objective_coefficients());

        let mut lower = vec![0.0; cols];
        let mut upper = vec![1.0; cols];
        let mut cells = vec![0.0; rows * cols];
        let mut rhs = Vec::with_capacity(rows);
        for (i, constraint) in program.constraints().iter().enumerate() {
            let start = i * cols;
            for &(var, c) in constraint.expr().terms() {
                cells[start + var.index()] += c;
            }
            cells[start + structural + i] = 1.0;
            let logical = structural + i;
            (lower[logical], upper[logical]) = match constraint.sense() {
                ConstraintSense::LessOrEqual => (0.0, f64::INFINITY),
                ConstraintSense::GreaterOrEqual => (f64::NEG_INFINITY, 0.0),
                ConstraintSense::Equal => (0.0, 0.0),
            };
            rhs.push(constraint.rhs());
        }

        let mut state = vec![ColumnState::Basic; cols];
        for (state, &c) in state.iter_mut().zip(&cost[..structural]) {
            *state = if c > 0.0 {
                ColumnState::AtUpper
            } else {
                ColumnState::AtLower
            };
        }

        let mut relaxation = Self {
            rows,
            cols,
            structural,
            cells,
            reduced: cost.clone(),
            cost,
            lower,
            upper,
            state,
            basis: (structural..cols).collect(),
            basic_values: rhs,
            pivot_limit: DEFAULT_PIVOT_LIMIT,
        };
        for i in 0..rows {
            let activity: f64 = (0..structural)
                .map(|j| relaxation.at(i, j) * relaxation.nonbasic_value(j))
                .sum();
            relaxation.basic_values[i] -= activity;
        }
        relaxation
    }

    /// Caps the pivots of each [`solve`](Self::solve) call.
    pub fn with_pivot_limit(mut self, limit: u64) -> Self {
        self.pivot_limit = limit;
        self
    }

    pub fn variable_count(&self) -> usize {
        self.structural
    }

    /// Pins variable `var` to 0 or 1.
    pub fn fix(&mut self, var: usize, value: bool) {
        let target = if value { 1.0 } else { 0.0 };
        if self.state[var] != ColumnState::Basic {
            let delta = target - self.nonbasic_value(var);
            if delta != 0.0 {
                for i in 0..self.rows {
                    let a = self.at(i, var);
                    if a != 0.0 {
                        self.basic_values[i] -= a * delta;
                    }
                }
            }
            self.state[var] = ColumnState::AtLower;
        }
        self.lower[var] = target;
        self.upper[var] = target;
    }

    /// Value variable `var` is pinned to, if any.
    pub fn fixing(&self, var: usize) -> Option<bool> {
        (self.lower[var] == self.upper[var]).then(|| self.lower[var] > 0.5)
    }

    /// Re-optimizes from the current basis.
    pub fn solve(&mut self) -> LpResult {
        let mut pivots = 0;
        let mut degenerate = 0;
        loop {
            let bland = degenerate >= DEGENERATE_STREAK;
            let Some((row, bound)) = self.leaving(bland) else {
                return LpResult::new(LpOutcome::Optimal(self.solution()), pivots);
            };
            if pivots >= self.pivot_limit {
                return LpResult::new(LpOutcome::IterationLimit, pivots);
            }
            let Some((col, ratio)) = self.entering(row, bound, bland) else {
                return LpResult::new(LpOutcome::Infeasible, pivots);
            };
            if ratio <= COST_EPSILON {
                degenerate += 1;
            } else {
                degenerate = 0;
            }
            self.pivot(row, col, bound);
            pivots += 1;
        }
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    fn nonbasic_value(&self, col: usize) -> f64 {
        match self.state[col] {
            ColumnState::AtUpper => self.upper[col],
            _ => self.lower[col],
        }
    }

    /// Row whose basic variable violates a bound, with the bound it leaves at.
    fn leaving(&self, bland: bool) -> Option<(usize, Bound)> {
        let mut best: Option<(usize, Bound, f64)> = None;
        for (i, &col) in self.basis.iter().enumerate() {
            let value = self.basic_values[i];
            let (bound, violation) = if value < self.lower[col] - PRIMAL_TOLERANCE {
                (Bound::Lower, self.lower[col] - value)
            } else if value > self.upper[col] + PRIMAL_TOLERANCE {
                (Bound::Upper, value - self.upper[col])
            } else {
                continue;
            };
            let better = match best {
                None => true,
                Some((r, _, v)) => {
                    if bland {
                        col < self.basis[r]
                    } else {
                        violation > v
                    }
                }
            };
            if better {
                best = Some((i, bound, violation));
            }
        }
        best.map(|(i, bound, _)| (i, bound))
    }

    /// Dual ratio test on `row`: the nonbasic column that moves the leaving
    /// variable towards `bound` while keeping every reduced cost's sign.
    fn entering(&self, row: usize, bound: Bound, bland: bool) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;
        for j in 0..self.cols {
            let state = self.state[j];
            if state == ColumnState::Basic || self.lower[j] == self.upper[j] {
                continue;
            }
            let alpha = self.at(row, j);
            if alpha.abs() <= PIVOT_EPSILON {
                continue;
            }
            let eligible = match (bound, state) {
                (Bound::Lower, ColumnState::AtLower) | (Bound::Upper, ColumnState::AtUpper) => {
                    alpha < 0.0
                }
                _ => alpha > 0.0,
            };
            if !eligible {
                continue;
            }
            let ratio = self.reduced[j].abs() / alpha.abs();
            let better = match best {
                None => true,
                Some((_, r, a)) => {
                    ratio < r - COST_EPSILON
                        || (!bland && ratio <= r + COST_EPSILON && alpha.abs() > a)
                }
            };
            if better {
                best = Some((j, ratio, alpha.abs()));
            }
        }
        best.map(|(j, ratio, _)| (j, ratio))
    }

    fn pivot(&mut self, row: usize, col: usize, bound: Bound) {
        let cols = self.cols;
        let leaving = self.basis[row];
        let alpha = self.at(row, col);
        let target = match bound {
            Bound::Lower => self.lower[leaving],
            Bound::Upper => self.upper[leaving],
        };

        let step = (self.basic_values[row] - target) / alpha;
        let entering_value = self.nonbasic_value(col) + step;
        for i in 0..self.rows {
            if i != row {
                let a = self.at(i, col);
                if a != 0.0 {
                    self.basic_values[i] -= a * step;
                }
            }
        }
        self.basic_values[row] = entering_value;

        self.state[leaving] = match bound {
            Bound::Lower => ColumnState::AtLower,
            Bound::Upper => ColumnState::AtUpper,
        };
        self.state[col] = ColumnState::Basic;
        self.basis[row] = col;

        let start = row * cols;
        for j in 0..cols {
            self.cells[start + j] /= alpha;
        }
        for i in 0..self.rows {
            if i == row {
                continue;
            }
            let factor = self.cells[i * cols + col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..cols {
                let delta = factor * self.cells[start + j];
                self.cells[i * cols + j] -= delta;
            }
            self.cells[i * cols + col] = 0.0;
        }

        let d = self.reduced[col];
        if d != 0.0 {
            for j in 0..cols {
                self.reduced[j] -= d * self.cells[start + j];
            }
        }
        self.reduced[col] = 0.0;
    }

    fn solution(&self) -> LpSolution {
        let mut values: Vec<f64> = (0..self.structural)
            .map(|j| self.nonbasic_value(j))
            .collect();
        for (i, &col) in self.basis.iter().enumerate() {
            if col < self.structural {
                values[col] = self.basic_values[i].clamp(self.lower[col], self.upper[col]);
            }
        }
        let objective = values
            .iter()
            .zip(&self.cost)
            .map(|(value, cost)| value * cost)
            .sum();
        LpSolution { values, objective }
    }
}
