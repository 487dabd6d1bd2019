//! DraftForge - salary-capped fantasy lineup optimizer
//!
//! Builds a player pool from raw feed records and produces a ranked series
//! of distinct lineups by solving a binary integer program repeatedly, each
//! solve excluding near-copies of every lineup found before it.
//!
//! # Example
//!
//! ```rust
//! use draftforge::prelude::*;
//!
//! let rules = RosterRules::reference();
//! assert_eq!(rules.lineup_size(), 9);
//!
//! let config = ContestConfig::default();
//! assert_eq!(config.salary_cap, 50_000);
//! assert_eq!(config.max_overlap(), 8);
//! ```

pub mod model;
pub mod optimizer;
pub mod pipeline;
pub mod provider;
pub mod result;

#[cfg(feature = "console")]
pub mod console;

pub use model::LineupModel;
pub use optimizer::{optimize, LineupOptimizer};
pub use pipeline::{DraftPipeline, PipelineOutput};
pub use provider::{DataProvider, InMemoryProvider};
pub use result::{ConstraintEvaluation, LineupResult, LineupSlot, OptimizationRun, StopReason};

// Domain types
pub use draftforge_core::{
    Availability, DraftForgeError, DraftableRecord, DraftablesFeed, DuplicatePolicy, Lineup,
    Player, PlayerId, PlayerPool, PoolBuild, PoolBuildReport, PoolBuilder, Position,
    RealizedStats, Result, RosterRules, RosterViolation, StatsRow,
};

// Configuration
pub use draftforge_config::{ConfigError, ContestConfig};

// Solver statistics and status
pub use draftforge_solver::{SolveStats, SolveStatus};

pub mod prelude {
    pub use super::{
        optimize, ContestConfig, DataProvider, DraftPipeline, InMemoryProvider, Lineup,
        LineupOptimizer, LineupResult, OptimizationRun, Player, PlayerPool, PoolBuilder, Position,
        RosterRules, StopReason,
    };
}
