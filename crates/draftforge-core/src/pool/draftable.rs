//! Draftable feed records.
//!
//! The contest provider publishes a JSON document of the form
//! `{"draftables": [ { "displayName": ..., "playerGameHash": ..., ... } ]}`.
//! Decoding is lenient field by field: a value of the wrong type falls back to
//! the field default so that one bad record never aborts the whole feed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// A key/value score attribute attached to a draftable record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatAttribute {
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    pub value: Value,
}

impl StatAttribute {
    pub fn new(id: i64, value: impl Into<Value>) -> Self {
        Self {
            id: Some(id),
            value: value.into(),
        }
    }

    /// Returns the value as a finite float, if it is a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }
}

/// Returns the first attribute value that parses as a float, or 0.0.
///
/// The lookup is total and picks by list order, not by magnitude.
///
/// # Examples
///
/// ```
/// use draftforge_core::{projection_from_attributes, StatAttribute};
///
/// let attributes = vec![
///     StatAttribute::new(90, "-"),
///     StatAttribute::new(219, "18.4"),
///     StatAttribute::new(220, 31.0),
/// ];
/// assert_eq!(projection_from_attributes(&attributes), 18.4);
/// assert_eq!(projection_from_attributes(&[]), 0.0);
/// ```
pub fn projection_from_attributes(attributes: &[StatAttribute]) -> f64 {
    attributes
        .iter()
        .find_map(StatAttribute::as_f64)
        .unwrap_or(0.0)
}

/// One record of the draftable-player feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftableRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub player_game_hash: Option<String>,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub salary: u32,
    #[serde(deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::attributes")]
    pub draft_stat_attributes: Vec<StatAttribute>,
}

impl DraftableRecord {
    /// Creates a record with a single projection attribute and the available status.
    pub fn new(
        display_name: impl Into<String>,
        player_game_hash: impl Into<String>,
        salary: u32,
        position: impl Into<String>,
        projection: f64,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            player_game_hash: Some(player_game_hash.into()),
            salary,
            position: position.into(),
            status: Some("None".to_string()),
            draft_stat_attributes: vec![StatAttribute::new(219, projection.to_string())],
        }
    }

    /// Sets the provider status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the score attributes.
    pub fn with_attributes(mut self, attributes: Vec<StatAttribute>) -> Self {
        self.draft_stat_attributes = attributes;
        self
    }

    /// Projected score derived from the score attributes.
    pub fn projection(&self) -> f64 {
        projection_from_attributes(&self.draft_stat_attributes)
    }
}

/// Decoded draftable feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftablesFeed {
    pub draftables: Vec<DraftableRecord>,
    /// Entries dropped because they were not JSON objects.
    pub skipped: usize,
}

impl DraftablesFeed {
    /// Parses a feed document.
    ///
    /// Accepts either `{"draftables": [...]}` or a bare array. A document with
    /// no draftable array decodes to an empty feed.
    ///
    /// # Errors
    ///
    /// Returns error only if the text is not valid JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(s)?;
        let entries = match document {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("draftables") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    warn!(event = "feed_without_draftables");
                    Vec::new()
                }
            },
            _ => {
                warn!(event = "feed_without_draftables");
                Vec::new()
            }
        };

        let mut feed = DraftablesFeed::default();
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                warn!(event = "malformed_record", index, reason = "not an object");
                feed.skipped += 1;
                continue;
            }
            match serde_json::from_value::<DraftableRecord>(entry) {
                Ok(record) => feed.draftables.push(record),
                Err(err) => {
                    warn!(event = "malformed_record", index, error = %err);
                    feed.skipped += 1;
                }
            }
        }
        Ok(feed)
    }
}

/// Field decoders that fall back to defaults instead of failing.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::StatAttribute;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn unsigned<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let value = match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0))
    }

    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn attributes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<StatAttribute>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}
