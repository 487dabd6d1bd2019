//! Configuration system for DraftForge.
//!
//! Load contest configuration from TOML or YAML files to control the salary
//! cap, roster template, number of lineups and per-solve limits without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use draftforge_config::ContestConfig;
//! use std::time::Duration;
//!
//! let config = ContestConfig::from_toml_str(r#"
//!     salary_cap = 60000
//!     lineup_count = 20
//!
//!     [termination]
//!     seconds_spent_limit = 5
//!
//!     [exclusion]
//!     max_overlap = 7
//! "#).unwrap();
//!
//! assert_eq!(config.salary_cap, 60000);
//! assert_eq!(config.time_limit(), Duration::from_secs(5));
//! assert_eq!(config.max_overlap(), 7);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use draftforge_config::ContestConfig;
//!
//! let config = ContestConfig::load("draftforge.toml").unwrap_or_default();
//! assert_eq!(config.salary_cap, 50000);
//! assert_eq!(config.time_limit(), draftforge_config::DEFAULT_SOLVE_TIME_LIMIT);
//! ```

use std::path::Path;
use std::time::Duration;

use draftforge_core::pool::DEFAULT_STATS_POINTS_COLUMN;
use draftforge_core::{DuplicatePolicy, RosterRules};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Salary cap of the reference contest.
pub const DEFAULT_SALARY_CAP: u32 = 50_000;

/// Number of lineups requested when none is configured.
pub const DEFAULT_LINEUP_COUNT: usize = 10;

/// Wall-clock budget of one solve when no time limit is configured.
pub const DEFAULT_SOLVE_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main contest configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContestConfig {
    /// Maximum total salary of one lineup.
    #[serde(default = "default_salary_cap")]
    pub salary_cap: u32,

    /// Number of distinct lineups to produce.
    #[serde(default = "default_lineup_count")]
    pub lineup_count: usize,

    /// Lineup template.
    #[serde(default)]
    pub roster: RosterRules,

    /// Exclusion of previously found lineups.
    #[serde(default)]
    pub exclusion: ExclusionConfig,

    /// Per-solve termination.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Player pool building.
    #[serde(default)]
    pub pool: PoolConfig,
}

fn default_salary_cap() -> u32 {
    DEFAULT_SALARY_CAP
}

fn default_lineup_count() -> usize {
    DEFAULT_LINEUP_COUNT
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            salary_cap: DEFAULT_SALARY_CAP,
            lineup_count: DEFAULT_LINEUP_COUNT,
            roster: RosterRules::reference(),
            exclusion: ExclusionConfig::default(),
            termination: None,
            pool: PoolConfig::default(),
        }
    }
}

impl ContestConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the salary cap.
    pub fn with_salary_cap(mut self, salary_cap: u32) -> Self {
        self.salary_cap = salary_cap;
        self
    }

    /// Sets the number of lineups to produce.
    pub fn with_lineup_count(mut self, lineup_count: usize) -> Self {
        self.lineup_count = lineup_count;
        self
    }

    /// Replaces the roster template.
    pub fn with_roster(mut self, roster: RosterRules) -> Self {
        self.roster = roster;
        self
    }

    /// Sets the maximum number of players a lineup may share with any earlier one.
    pub fn with_max_overlap(mut self, max_overlap: u32) -> Self {
        self.exclusion.max_overlap = Some(max_overlap);
        self
    }

    /// Sets the per-solve time limit.
    pub fn with_time_limit_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the per-solve node limit.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the duplicate identity policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.pool.duplicate_policy = policy;
        self
    }

    /// Returns the per-solve time limit.
    ///
    /// Delegates to `termination.time_limit()` and falls back to
    /// [`DEFAULT_SOLVE_TIME_LIMIT`] when no limit is configured.
    pub fn time_limit(&self) -> Duration {
        self.termination
            .as_ref()
            .and_then(|t| t.time_limit())
            .unwrap_or(DEFAULT_SOLVE_TIME_LIMIT)
    }

    /// Returns the per-solve node limit, if configured.
    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }

    /// Maximum overlap with an earlier lineup.
    ///
    /// Defaults to one less than the roster's lineup size, which forces at
    /// least one swap per lineup.
    pub fn max_overlap(&self) -> u32 {
        self.exclusion
            .max_overlap
            .unwrap_or_else(|| self.roster.lineup_size().saturating_sub(1))
    }

    /// Checks that the configuration describes a solvable contest shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for inconsistent roster rules or an
    /// overlap bound that would not exclude anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.roster
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let size = self.roster.lineup_size();
        if let Some(overlap) = self.exclusion.max_overlap {
            if overlap >= size {
                return Err(ConfigError::Invalid(format!(
                    "max_overlap {overlap} does not exclude anything for lineups of {size} players"
                )));
            }
        }
        Ok(())
    }
}

/// Exclusion configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExclusionConfig {
    /// Players a new lineup may share with each earlier lineup.
    pub max_overlap: Option<u32>,
}

/// Termination configuration for a single solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend on one solve. Without either time field the
    /// solve gets [`DEFAULT_SOLVE_TIME_LIMIT`].
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend on one solve, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum branch-and-bound nodes explored in one solve.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Player pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PoolConfig {
    /// Resolution of two records that share a display name.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Column of the realized-stats table holding actual points.
    #[serde(default = "default_stats_points_column")]
    pub stats_points_column: usize,
}

fn default_stats_points_column() -> usize {
    DEFAULT_STATS_POINTS_COLUMN
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::KeepFirst,
            stats_points_column: DEFAULT_STATS_POINTS_COLUMN,
        }
    }
}
