//! DraftForge Core - Domain types for salary-capped lineup building
//!
//! This crate provides the fundamental abstractions for DraftForge:
//! - Player, position and availability types
//! - Roster rules describing a legal lineup
//! - The player pool and the builder that normalizes raw feed records into it
//! - The realized-stats table used for post-hoc lineup diagnostics

pub mod error;
pub mod lineup;
pub mod player;
pub mod pool;
pub mod roster;

pub use error::{DraftForgeError, Result};
pub use lineup::Lineup;
pub use player::{Availability, Player, PlayerId, Position};
pub use pool::{
    projection_from_attributes, DraftableRecord, DraftablesFeed, DuplicatePolicy, PlayerPool,
    PoolBuild, PoolBuildReport, PoolBuilder, RealizedStats, StatAttribute, StatsRow,
};
pub use roster::{FlexLimit, PositionLimit, RosterRules, RosterViolation};
