//! Lineup value type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// A set of selected player ids.
///
/// Order is the order in which the players appear in the pool; it carries
/// no meaning beyond stable display. Equality ignores order.
///
/// # Examples
///
/// ```
/// use draftforge_core::Lineup;
///
/// let a = Lineup::new(["Allen", "Kelce", "Hill"]);
/// let b = Lineup::new(["Hill", "Allen", "Adams"]);
///
/// assert_eq!(a.len(), 3);
/// assert_eq!(a.overlap(&b), 2);
/// assert!(a.contains("Kelce"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lineup {
    players: Vec<PlayerId>,
}

impl Lineup {
    /// Creates a lineup from player ids. Repeated ids are kept once.
    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        let mut seen = BTreeSet::new();
        let players = players
            .into_iter()
            .map(Into::into)
            .filter(|id: &PlayerId| seen.insert(id.clone()))
            .collect();
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(String::as_str)
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.players
    }

    /// Returns the player ids as an ordered set.
    pub fn to_set(&self) -> BTreeSet<PlayerId> {
        self.players.iter().cloned().collect()
    }

    /// Number of players shared with `other`.
    pub fn overlap(&self, other: &Lineup) -> usize {
        self.players.iter().filter(|p| other.contains(p)).count()
    }

    /// Number of players present in exactly one of the two lineups.
    pub fn symmetric_difference(&self, other: &Lineup) -> usize {
        self.len() + other.len() - 2 * self.overlap(other)
    }
}

impl PartialEq for Lineup {
    fn eq(&self, other: &Self) -> bool {
        self.to_set() == other.to_set()
    }
}

impl Eq for Lineup {}
