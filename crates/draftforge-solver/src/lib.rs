//! DraftForge Solver Engine
//!
//! This crate provides an exact solver for small binary integer programs:
//! - `BinaryProgram`: 0/1 variables, a linear objective to maximize and
//!   named linear constraints
//! - LP relaxation via a bounded-variable dual simplex that warm-starts
//!   from the parent node's basis
//! - Depth-first branch-and-bound over the relaxation
//! - Termination conditions acting as a per-solve safety valve
//! - Statistics and outcomes carrying the termination status
//!
//! Logging levels:
//! - **DEBUG**: one summary per solve
//! - **TRACE**: incumbent improvements and prunings

pub mod bnb;
pub mod error;
pub mod lp;
pub mod model;
pub mod result;
pub mod scope;
pub mod stats;
pub mod termination;

pub use bnb::BranchAndBound;
pub use error::ModelError;
pub use lp::{solve_relaxation, LpOutcome, LpResult, LpSolution, Relaxation, DEFAULT_PIVOT_LIMIT};
pub use model::{BinaryProgram, Constraint, ConstraintId, ConstraintSense, LinearExpr, VarId};
pub use result::{BinarySolution, SolveOutcome, SolveStatus};
pub use scope::SearchScope;
pub use stats::SolveStats;
pub use termination::{
    NoTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};
