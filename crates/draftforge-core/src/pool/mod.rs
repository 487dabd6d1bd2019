//! Player pool and the builder that produces it.
//!
//! - [`draftable`] - draftable feed records and projection extraction
//! - [`realized`] - realized-stats table for post-hoc diagnostics
//! - [`builder`] - normalization of raw records into a [`PlayerPool`]

mod builder;
mod draftable;
mod realized;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use crate::player::{Player, PlayerId, Position};

pub use builder::{
    DuplicatePolicy, PoolBuild, PoolBuildReport, PoolBuilder, DEFAULT_STATS_POINTS_COLUMN,
};
pub use draftable::{projection_from_attributes, DraftableRecord, DraftablesFeed, StatAttribute};
pub use realized::{extract_player_name, RealizedStats, StatsRow};

/// Insertion-ordered mapping from player id to [`Player`].
///
/// Read-only once built by [`PoolBuilder`]; iteration follows the order in
/// which players were inserted.
///
/// # Examples
///
/// ```
/// use draftforge_core::{Player, PlayerPool, Position};
///
/// let mut pool = PlayerPool::new();
/// assert!(pool.insert(Player::available("Allen", 8000, Position::Qb, 24.1)));
/// assert!(!pool.insert(Player::available("Allen", 1000, Position::Qb, 1.0)));
///
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool.get("Allen").map(|p| p.salary()), Some(8000));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPool {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a player unless its id is already present.
    ///
    /// Returns false, leaving the pool unchanged, when the id collides.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.index.contains_key(player.id()) {
            return false;
        }
        self.index.insert(player.id().to_string(), self.players.len());
        self.players.push(player);
        true
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterates player ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(Player::id)
    }

    /// Salary keyed by player id.
    pub fn salaries(&self) -> HashMap<&str, u32> {
        self.players.iter().map(|p| (p.id(), p.salary())).collect()
    }

    /// Position keyed by player id.
    pub fn positions(&self) -> HashMap<&str, &Position> {
        self.players.iter().map(|p| (p.id(), p.position())).collect()
    }

    /// Projected score keyed by player id.
    pub fn scores(&self) -> HashMap<&str, f64> {
        self.players
            .iter()
            .map(|p| (p.id(), p.projected_score()))
            .collect()
    }

    /// Number of players at `position`.
    pub fn count_by_position(&self, position: &Position) -> usize {
        self.players
            .iter()
            .filter(|p| p.position() == position)
            .count()
    }
}

impl FromIterator<Player> for PlayerPool {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut pool = PlayerPool::new();
        for player in iter {
            pool.insert(player);
        }
        pool
    }
}

impl<'a> IntoIterator for &'a PlayerPool {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
