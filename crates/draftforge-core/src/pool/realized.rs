//! Realized-stats table.
//!
//! Rows come from a leaderboard whose player cell holds the display name
//! followed by extra text (team, opponent) separated by a run of whitespace.
//! One column holds the points a player actually scored in the contest window.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of a realized-stats table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    /// Raw player cell, e.g. `"Patrick Mahomes   KC QB"`.
    pub player_cell: String,
    /// Remaining cells, indexed by column offset.
    pub columns: Vec<String>,
}

impl StatsRow {
    pub fn new<I, S>(player_cell: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player_cell: player_cell.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Extracts the display name from a raw player cell.
///
/// The name is the text before the first run of two or more whitespace
/// characters. A cell without such a run is used whole.
///
/// # Examples
///
/// ```
/// use draftforge_core::pool::extract_player_name;
///
/// assert_eq!(extract_player_name("Derrick Henry   TEN RB"), "Derrick Henry");
/// assert_eq!(extract_player_name(" Lamar Jackson "), "Lamar Jackson");
/// ```
pub fn extract_player_name(cell: &str) -> String {
    let cell = cell.trim();
    let mut previous_whitespace = None;
    for (i, c) in cell.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = previous_whitespace {
                return cell[..start].to_string();
            }
            previous_whitespace = Some(i);
        } else {
            previous_whitespace = None;
        }
    }
    cell.to_string()
}

#[derive(Debug, Clone, PartialEq)]
struct RealizedEntry {
    name: String,
    points: Option<f64>,
}

/// Actual points per player, keyed by display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealizedStats {
    entries: Vec<RealizedEntry>,
}

impl RealizedStats {
    /// Builds the table, reading actual points from `points_column`.
    ///
    /// Cells that are missing or not numeric leave that player without points.
    pub fn from_rows(rows: &[StatsRow], points_column: usize) -> Self {
        let entries = rows
            .iter()
            .map(|row| RealizedEntry {
                name: extract_player_name(&row.player_cell),
                points: row
                    .columns
                    .get(points_column)
                    .and_then(|cell| cell.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite()),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Actual points scored by `player_id`.
    ///
    /// An exact name match wins; otherwise the first row whose name contains the
    /// trimmed id is used.
    pub fn actual_points(&self, player_id: &str) -> Option<f64> {
        let id = player_id.trim();
        if id.is_empty() {
            return None;
        }
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == id)
            .or_else(|| self.entries.iter().find(|e| e.name.contains(id)));

        match entry {
            Some(entry) => {
                if entry.points.is_none() {
                    warn!(event = "realized_points_unparsable", player = id);
                }
                entry.points
            }
            None => {
                warn!(event = "realized_player_missing", player = id);
                None
            }
        }
    }
}
