//! Player pool builder.
//!
//! Normalizes draftable records into a [`PlayerPool`]:
//! 1. drop repeated records of the same player-game pairing (first one wins),
//! 2. drop players whose status is not the available sentinel,
//! 3. derive salary, position and projection for each survivor,
//! 4. resolve identity collisions according to the [`DuplicatePolicy`].
//!
//! Bad records degrade to defaulted fields instead of aborting the build.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::draftable::DraftableRecord;
use super::realized::{RealizedStats, StatsRow};
use super::PlayerPool;
use crate::error::{DraftForgeError, Result};
use crate::player::{Availability, Player, Position};

/// Column of the realized-stats table holding actual fantasy points.
pub const DEFAULT_STATS_POINTS_COLUMN: usize = 17;

/// How to resolve two available records that share a display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first record encountered and log the rest.
    #[default]
    KeepFirst,

    /// Fail the build.
    Reject,
}

/// Counters describing what the builder dropped or defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolBuildReport {
    pub records_seen: usize,
    pub game_duplicates_dropped: usize,
    pub unavailable_dropped: usize,
    pub identity_duplicates: usize,
    pub malformed_records: usize,
}

/// Output of [`PoolBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct PoolBuild {
    pub pool: PlayerPool,
    /// Present when realized-stats rows were supplied.
    pub realized: Option<RealizedStats>,
    pub report: PoolBuildReport,
}

/// Builds a [`PlayerPool`] from raw feed records.
///
/// # Examples
///
/// ```
/// use draftforge_core::{DraftableRecord, PoolBuilder};
///
/// let records = vec![
///     DraftableRecord::new("Josh Allen", "g1", 8000, "QB", 24.5),
///     DraftableRecord::new("Josh Allen", "g1", 8000, "QB", 24.5),
///     DraftableRecord::new("Travis Kelce", "g2", 7000, "TE", 16.0).with_status("O"),
/// ];
///
/// let build = PoolBuilder::new().build(&[], &records).unwrap();
/// assert_eq!(build.pool.len(), 1);
/// assert_eq!(build.report.game_duplicates_dropped, 1);
/// assert_eq!(build.report.unavailable_dropped, 1);
/// assert!(build.realized.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PoolBuilder {
    duplicate_policy: DuplicatePolicy,
    stats_points_column: usize,
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::KeepFirst,
            stats_points_column: DEFAULT_STATS_POINTS_COLUMN,
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_stats_points_column(mut self, column: usize) -> Self {
        self.stats_points_column = column;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Builds the pool and, if rows were supplied, the realized-stats table.
    ///
    /// # Errors
    ///
    /// Returns [`DraftForgeError::DuplicateIdentity`] only under
    /// [`DuplicatePolicy::Reject`]. Malformed records never fail the build.
    pub fn build(&self, stats_rows: &[StatsRow], draftables: &[DraftableRecord]) -> Result<PoolBuild> {
        let mut report = PoolBuildReport {
            records_seen: draftables.len(),
            ..PoolBuildReport::default()
        };
        let mut pool = PlayerPool::new();
        let mut seen_games: HashSet<&str> = HashSet::new();

        for (index, record) in draftables.iter().enumerate() {
            if let Some(hash) = record.player_game_hash.as_deref() {
                if !seen_games.insert(hash) {
                    report.game_duplicates_dropped += 1;
                    continue;
                }
            }

            let availability = Availability::parse(record.status.as_deref().unwrap_or(""));
            if !availability.is_available() {
                report.unavailable_dropped += 1;
                continue;
            }

            let id = record.display_name.trim();
            if id.is_empty() {
                let err = DraftForgeError::MalformedRecord {
                    index,
                    reason: "missing display name".to_string(),
                };
                warn!(event = "malformed_record", error = %err);
                report.malformed_records += 1;
                continue;
            }

            let player = Player::new(
                id,
                record.salary,
                Position::parse(&record.position),
                record.projection(),
                availability,
            );
            if !pool.insert(player) {
                report.identity_duplicates += 1;
                match self.duplicate_policy {
                    DuplicatePolicy::KeepFirst => {
                        warn!(event = "duplicate_identity", player = id, index, policy = "keep_first");
                    }
                    DuplicatePolicy::Reject => {
                        return Err(DraftForgeError::DuplicateIdentity(id.to_string()));
                    }
                }
            } else {
                debug!(event = "player_added", player = id, salary = record.salary);
            }
        }

        let realized = if stats_rows.is_empty() {
            None
        } else {
            Some(RealizedStats::from_rows(stats_rows, self.stats_points_column))
        };

        info!(
            event = "pool_built",
            players = pool.len(),
            records = report.records_seen,
            game_duplicates = report.game_duplicates_dropped,
            unavailable = report.unavailable_dropped,
            identity_duplicates = report.identity_duplicates,
            malformed = report.malformed_records,
            realized_rows = stats_rows.len()
        );

        Ok(PoolBuild {
            pool,
            realized,
            report,
        })
    }
}
