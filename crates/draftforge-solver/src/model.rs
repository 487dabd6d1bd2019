//! Binary integer program model.
//!
//! A program has 0/1 decision variables, a linear objective that is
//! maximized, and named linear constraints. Constraints can be appended
//! between solves, which is how lineup exclusions accumulate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Absolute tolerance used when checking a constraint at an assignment.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Index of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl ConstraintId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintSense {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl ConstraintSense {
    /// Returns true if `lhs (sense) rhs` holds within [`FEASIBILITY_TOLERANCE`].
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ConstraintSense::LessOrEqual => lhs <= rhs + FEASIBILITY_TOLERANCE,
            ConstraintSense::GreaterOrEqual => lhs >= rhs - FEASIBILITY_TOLERANCE,
            ConstraintSense::Equal => (lhs - rhs).abs() <= FEASIBILITY_TOLERANCE,
        }
    }
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSense::LessOrEqual => write!(f, "<="),
            ConstraintSense::GreaterOrEqual => write!(f, ">="),
            ConstraintSense::Equal => write!(f, "="),
        }
    }
}

/// Sparse linear expression `sum(coefficient * variable)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the given variables, each with coefficient 1.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    /// Appends a term.
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Appends a term, builder style.
    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression at a 0/1 assignment.
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment[v.index()])
            .map(|(_, c)| c)
            .sum()
    }

    /// Evaluates the expression at fractional values.
    pub fn evaluate_relaxed(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|(v, c)| c * values[v.index()]).sum()
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// A named linear constraint `expr (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: String,
    expr: LinearExpr,
    sense: ConstraintSense,
    rhs: f64,
}

impl Constraint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Returns true if the constraint holds at `assignment`.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.sense.holds(self.expr.evaluate(assignment), self.rhs)
    }

    /// Returns true if the left-hand side sits on the bound at `assignment`.
    pub fn is_binding(&self, assignment: &[bool]) -> bool {
        (self.expr.evaluate(assignment) - self.rhs).abs() <= FEASIBILITY_TOLERANCE
    }
}

/// A binary integer program to maximize.
///
/// # Examples
///
/// ```
/// use draftforge_solver::{BinaryProgram, ConstraintSense, LinearExpr};
///
/// let mut program = BinaryProgram::new("knapsack");
/// let a = program.add_variable("a");
/// let b = program.add_variable("b");
/// program.set_objective(a, 3.0).unwrap();
/// program.set_objective(b, 2.0).unwrap();
/// program
///     .add_constraint("one", LinearExpr::sum([a, b]), ConstraintSense::LessOrEqual, 1.0)
///     .unwrap();
///
/// assert_eq!(program.variable_count(), 2);
/// assert!(program.is_feasible(&[true, false]));
/// assert!(!program.is_feasible(&[true, true]));
/// assert_eq!(program.objective_value(&[true, false]), 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryProgram {
    name: String,
    variables: Vec<String>,
    objective: Vec<f64>,
    constraints: Vec<Constraint>,
}

impl BinaryProgram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a 0/1 variable with objective coefficient 0.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(name.into());
        self.objective.push(0.0);
        VarId(self.variables.len() - 1)
    }

    /// Sets the objective coefficient of `var`.
    pub fn set_objective(&mut self, var: VarId, coefficient: f64) -> Result<(), ModelError> {
        self.check_var(var)?;
        if !coefficient.is_finite() {
            return Err(ModelError::NonFinite(format!(
                "objective coefficient of {}",
                self.variables[var.index()]
            )));
        }
        self.objective[var.index()] = coefficient;
        Ok(())
    }

    /// Appends a constraint.
    ///
    /// # Errors
    ///
    /// Returns error if the expression references a foreign variable or any
    /// value is not finite.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Result<ConstraintId, ModelError> {
        let name = name.into();
        for &(var, coefficient) in expr.terms() {
            self.check_var(var)?;
            if !coefficient.is_finite() {
                return Err(ModelError::NonFinite(format!("constraint {name}")));
            }
        }
        if !rhs.is_finite() {
            return Err(ModelError::NonFinite(format!("right-hand side of {name}")));
        }
        self.constraints.push(Constraint {
            name,
            expr,
            sense,
            rhs,
        });
        Ok(ConstraintId(self.constraints.len() - 1))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variables.get(var.index()).map(String::as_str)
    }

    pub fn objective_coefficient(&self, var: VarId) -> f64 {
        self.objective[var.index()]
    }

    pub fn objective_coefficients(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.index()]
    }

    /// Iterates variable ids in creation order.
    pub fn variables(&self) -> impl Iterator<Item = VarId> {
        (0..self.variables.len()).map(VarId)
    }

    /// Objective value of a 0/1 assignment.
    pub fn objective_value(&self, assignment: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(assignment)
            .filter(|(_, &selected)| selected)
            .map(|(c, _)| c)
            .sum()
    }

    /// Returns true if every constraint holds at `assignment`.
    pub fn is_feasible(&self, assignment: &[bool]) -> bool {
        assignment.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    fn check_var(&self, var: VarId) -> Result<(), ModelError> {
        if var.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownVariable(var.index()))
        }
    }
}
