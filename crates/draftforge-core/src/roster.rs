//! Roster rules describing a legal lineup.
//!
//! A roster is a set of per-position count windows plus an optional flex group
//! whose combined count is fixed while its internal split varies within the
//! member windows.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DraftForgeError, Result};
use crate::lineup::Lineup;
use crate::player::Position;
use crate::pool::PlayerPool;

/// Inclusive count window for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLimit {
    pub position: Position,
    pub min: u32,
    pub max: u32,
}

impl PositionLimit {
    pub fn new(position: Position, min: u32, max: u32) -> Self {
        Self { position, min, max }
    }

    /// A window with `min == max == count`.
    pub fn exactly(position: Position, count: u32) -> Self {
        Self::new(position, count, count)
    }

    /// Returns true if the limit pins the count to a single value.
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

/// Combined count over a group of positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexLimit {
    pub positions: Vec<Position>,
    pub count: u32,
}

impl FlexLimit {
    pub fn new(positions: Vec<Position>, count: u32) -> Self {
        Self { positions, count }
    }

    pub fn covers(&self, position: &Position) -> bool {
        self.positions.contains(position)
    }
}

/// Lineup template for a contest.
///
/// # Examples
///
/// ```
/// use draftforge_core::{Position, RosterRules};
///
/// let rules = RosterRules::reference();
/// assert_eq!(rules.lineup_size(), 9);
/// assert!(rules.governs(&Position::Te));
/// assert!(!rules.governs(&Position::K));
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRules {
    pub limits: Vec<PositionLimit>,
    #[serde(default)]
    pub flex: Option<FlexLimit>,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self::reference()
    }
}

impl RosterRules {
    /// Creates rules from position limits and an optional flex group.
    pub fn new(limits: Vec<PositionLimit>, flex: Option<FlexLimit>) -> Self {
        Self { limits, flex }
    }

    /// The classic template: 1 QB, 1 DST, 2-3 RB, 3-4 WR, 1-2 TE, 7 RB/WR/TE.
    pub fn reference() -> Self {
        Self {
            limits: vec![
                PositionLimit::exactly(Position::Qb, 1),
                PositionLimit::exactly(Position::Dst, 1),
                PositionLimit::new(Position::Te, 1, 2),
                PositionLimit::new(Position::Rb, 2, 3),
                PositionLimit::new(Position::Wr, 3, 4),
            ],
            flex: Some(FlexLimit::new(
                vec![Position::Rb, Position::Wr, Position::Te],
                7,
            )),
        }
    }

    /// Returns the limit for `position`, if one is defined.
    pub fn limit_for(&self, position: &Position) -> Option<&PositionLimit> {
        self.limits.iter().find(|l| &l.position == position)
    }

    /// Returns true if players of `position` may appear in a lineup.
    pub fn governs(&self, position: &Position) -> bool {
        self.limit_for(position).is_some() || self.flex.as_ref().is_some_and(|f| f.covers(position))
    }

    /// Upper bound on the number of players in a lineup.
    ///
    /// Positions outside the flex group contribute their maximum; the flex
    /// group contributes its fixed count. For the reference template every
    /// lineup has exactly this size.
    pub fn lineup_size(&self) -> u32 {
        let outside_flex = self
            .limits
            .iter()
            .filter(|l| !self.flex.as_ref().is_some_and(|f| f.covers(&l.position)))
            .fold(0u32, |total, l| total.saturating_add(l.max));
        outside_flex.saturating_add(self.flex.as_ref().map_or(0, |f| f.count))
    }

    /// Checks that some lineup could satisfy the rules, ignoring the pool.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for limit in &self.limits {
            if limit.min > limit.max {
                return Err(DraftForgeError::InvalidRoster(format!(
                    "{} minimum {} exceeds maximum {}",
                    limit.position, limit.min, limit.max
                )));
            }
            if !seen.insert(limit.position.clone()) {
                return Err(DraftForgeError::InvalidRoster(format!(
                    "{} has more than one limit",
                    limit.position
                )));
            }
        }

        if let Some(flex) = &self.flex {
            if flex.positions.is_empty() {
                return Err(DraftForgeError::InvalidRoster(
                    "flex group has no positions".to_string(),
                ));
            }
            let (low, high) = flex.positions.iter().fold((0u64, 0u64), |(lo, hi), p| {
                match self.limit_for(p) {
                    Some(limit) => (lo + u64::from(limit.min), hi + u64::from(limit.max)),
                    None => (lo, hi + u64::from(flex.count)),
                }
            });
            let count = u64::from(flex.count);
            if count < low || count > high {
                return Err(DraftForgeError::InvalidRoster(format!(
                    "flex count {} outside member bounds [{}, {}]",
                    flex.count, low, high
                )));
            }
        }

        if self.lineup_size() == 0 {
            return Err(DraftForgeError::InvalidRoster(
                "rules admit no players".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks a lineup against the rules and the salary cap.
    ///
    /// Returns every violation found; an empty vector means the lineup is legal.
    pub fn check(&self, lineup: &Lineup, pool: &PlayerPool, salary_cap: u32) -> Vec<RosterViolation> {
        let mut violations = Vec::new();
        let mut counts: BTreeMap<Position, u32> = BTreeMap::new();
        let mut total_salary: u64 = 0;

        for id in lineup.iter() {
            match pool.get(id) {
                Some(player) => {
                    total_salary += u64::from(player.salary());
                    if !self.governs(player.position()) {
                        violations.push(RosterViolation::UngovernedPosition {
                            player: id.to_string(),
                            position: player.position().clone(),
                        });
                    }
                    *counts.entry(player.position().clone()).or_default() += 1;
                }
                None => violations.push(RosterViolation::UnknownPlayer(id.to_string())),
            }
        }

        if total_salary > u64::from(salary_cap) {
            violations.push(RosterViolation::SalaryCapExceeded {
                total: total_salary,
                cap: salary_cap,
            });
        }

        for limit in &self.limits {
            let count = counts.get(&limit.position).copied().unwrap_or(0);
            if count < limit.min || count > limit.max {
                violations.push(RosterViolation::PositionCount {
                    position: limit.position.clone(),
                    count,
                    min: limit.min,
                    max: limit.max,
                });
            }
        }

        if let Some(flex) = &self.flex {
            let count = flex
                .positions
                .iter()
                .map(|p| counts.get(p).copied().unwrap_or(0))
                .sum();
            if count != flex.count {
                violations.push(RosterViolation::FlexCount {
                    count,
                    required: flex.count,
                });
            }
        }

        violations
    }
}

/// A single way in which a lineup breaks the roster rules.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterViolation {
    UnknownPlayer(String),
    UngovernedPosition { player: String, position: Position },
    SalaryCapExceeded { total: u64, cap: u32 },
    PositionCount { position: Position, count: u32, min: u32, max: u32 },
    FlexCount { count: u32, required: u32 },
}

impl fmt::Display for RosterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterViolation::UnknownPlayer(id) => write!(f, "player '{id}' is not in the pool"),
            RosterViolation::UngovernedPosition { player, position } => {
                write!(f, "player '{player}' plays {position}, which the roster does not use")
            }
            RosterViolation::SalaryCapExceeded { total, cap } => {
                write!(f, "salary {total} exceeds cap {cap}")
            }
            RosterViolation::PositionCount { position, count, min, max } => {
                write!(f, "{count} {position} selected, expected [{min}, {max}]")
            }
            RosterViolation::FlexCount { count, required } => {
                write!(f, "{count} flex players selected, expected {required}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn pool_of(players: Vec<Player>) -> PlayerPool {
        let mut pool = PlayerPool::new();
        for player in players {
            pool.insert(player);
        }
        pool
    }

    fn legal_pool() -> PlayerPool {
        pool_of(vec![
            Player::available("QB1", 7000, Position::Qb, 20.0),
            Player::available("DST1", 3000, Position::Dst, 8.0),
            Player::available("RB1", 6000, Position::Rb, 15.0),
            Player::available("RB2", 5000, Position::Rb, 12.0),
            Player::available("WR1", 6000, Position::Wr, 14.0),
            Player::available("WR2", 5000, Position::Wr, 11.0),
            Player::available("WR3", 4000, Position::Wr, 9.0),
            Player::available("WR4", 4000, Position::Wr, 8.0),
            Player::available("TE1", 4000, Position::Te, 7.0),
        ])
    }

    #[test]
    fn test_reference_rules() {
        let rules = RosterRules::reference();
        assert_eq!(rules.lineup_size(), 9);
        assert!(rules.validate().is_ok());
        assert_eq!(rules.limit_for(&Position::Rb), Some(&PositionLimit::new(Position::Rb, 2, 3)));
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let rules = RosterRules::new(vec![PositionLimit::new(Position::Qb, 2, 1)], None);
        assert!(matches!(rules.validate(), Err(DraftForgeError::InvalidRoster(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_limit() {
        let rules = RosterRules::new(
            vec![
                PositionLimit::exactly(Position::Qb, 1),
                PositionLimit::exactly(Position::Qb, 2),
            ],
            None,
        );
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unreachable_flex() {
        let mut rules = RosterRules::reference();
        rules.flex = Some(FlexLimit::new(vec![Position::Rb, Position::Wr, Position::Te], 12));
        assert!(rules.validate().is_err());

        rules.flex = Some(FlexLimit::new(vec![Position::Rb, Position::Wr, Position::Te], 5));
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_windows_without_overflow() {
        let mut rules = RosterRules::reference();
        rules.limits = vec![
            PositionLimit::exactly(Position::Qb, 1),
            PositionLimit::exactly(Position::Rb, 4_000_000_000),
            PositionLimit::exactly(Position::Wr, 4_000_000_000),
        ];
        rules.flex = Some(FlexLimit::new(vec![Position::Rb, Position::Wr, Position::Te], 7));
        assert!(matches!(rules.validate(), Err(DraftForgeError::InvalidRoster(_))));

        rules.flex = None;
        assert_eq!(rules.lineup_size(), u32::MAX);
    }

    #[test]
    fn test_check_accepts_legal_lineup() {
        let pool = legal_pool();
        let lineup = Lineup::new(pool.ids());
        let violations = RosterRules::reference().check(&lineup, &pool, 50_000);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_check_reports_cap_and_counts() {
        let pool = legal_pool();
        let lineup = Lineup::new(["QB1", "RB1", "WR1"]);
        let violations = RosterRules::reference().check(&lineup, &pool, 10_000);

        assert!(violations.contains(&RosterViolation::SalaryCapExceeded { total: 19_000, cap: 10_000 }));
        assert!(violations.contains(&RosterViolation::PositionCount {
            position: Position::Dst,
            count: 0,
            min: 1,
            max: 1,
        }));
        assert!(violations.contains(&RosterViolation::FlexCount { count: 2, required: 7 }));
    }

    #[test]
    fn test_check_reports_unknown_player() {
        let pool = legal_pool();
        let lineup = Lineup::new(["Nobody"]);
        let violations = RosterRules::reference().check(&lineup, &pool, 50_000);
        assert!(violations.contains(&RosterViolation::UnknownPlayer("Nobody".to_string())));
    }
}
