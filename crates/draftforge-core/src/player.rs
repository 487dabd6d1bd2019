//! Player, position and availability types.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Player identity. The contest display name is used as the key.
pub type PlayerId = String;

/// Roster position of a player.
///
/// Parsing is total: codes the contest does not define map to [`Position::Other`].
///
/// # Examples
///
/// ```
/// use draftforge_core::Position;
///
/// assert_eq!(Position::parse("qb"), Position::Qb);
/// assert_eq!(Position::parse("DEF"), Position::Dst);
/// assert_eq!(Position::parse("LS"), Position::Other("LS".to_string()));
/// assert_eq!(Position::Dst.to_string(), "DST");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Dst,
    K,
    Other(String),
}

impl Position {
    /// Parses a contest position code.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        match code.to_ascii_uppercase().as_str() {
            "QB" => Position::Qb,
            "RB" => Position::Rb,
            "WR" => Position::Wr,
            "TE" => Position::Te,
            "DST" | "DEF" | "D" => Position::Dst,
            "K" => Position::K,
            _ => Position::Other(code.to_string()),
        }
    }

    /// Returns the contest code for this position.
    pub fn code(&self) -> &str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::Dst => "DST",
            Position::K => "K",
            Position::Other(code) => code,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Position {
    fn from(code: String) -> Self {
        Position::parse(&code)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.code().to_string()
    }
}

/// Availability status reported by the contest provider.
///
/// The provider marks a healthy player with the literal status `"None"`;
/// every other status makes the player ineligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Questionable,
    Doubtful,
    Out,
    InjuredReserve,
    Unknown(String),
}

impl Availability {
    /// Parses a provider status string.
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "None" => Availability::Available,
            "Q" | "Questionable" => Availability::Questionable,
            "D" | "Doubtful" => Availability::Doubtful,
            "O" | "Out" => Availability::Out,
            "IR" => Availability::InjuredReserve,
            other => Availability::Unknown(other.to_string()),
        }
    }

    /// Returns true if the player may be selected.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// A draftable player.
///
/// Immutable once built; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    salary: u32,
    position: Position,
    projected_score: f64,
    availability: Availability,
}

impl Player {
    /// Creates a new player.
    ///
    /// Negative or non-finite projections are clamped to 0.0 and logged as a
    /// `projection_clamped` warning.
    pub fn new(
        id: impl Into<PlayerId>,
        salary: u32,
        position: Position,
        projected_score: f64,
        availability: Availability,
    ) -> Self {
        let id = id.into();
        let projected_score = if projected_score.is_finite() && projected_score >= 0.0 {
            projected_score
        } else {
            warn!(
                event = "projection_clamped",
                player = %id,
                projection = projected_score
            );
            0.0
        };
        Self {
            id,
            salary,
            position,
            projected_score,
            availability,
        }
    }

    /// Creates an available player.
    pub fn available(
        id: impl Into<PlayerId>,
        salary: u32,
        position: Position,
        projected_score: f64,
    ) -> Self {
        Self::new(id, salary, position, projected_score, Availability::Available)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn salary(&self) -> u32 {
        self.salary
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn projected_score(&self) -> f64 {
        self.projected_score
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse_known_codes() {
        assert_eq!(Position::parse("QB"), Position::Qb);
        assert_eq!(Position::parse(" rb "), Position::Rb);
        assert_eq!(Position::parse("WR"), Position::Wr);
        assert_eq!(Position::parse("TE"), Position::Te);
        assert_eq!(Position::parse("DST"), Position::Dst);
        assert_eq!(Position::parse("D"), Position::Dst);
        assert_eq!(Position::parse("K"), Position::K);
    }

    #[test]
    fn test_position_parse_unknown_is_kept() {
        assert_eq!(Position::parse("FB"), Position::Other("FB".to_string()));
        assert_eq!(Position::parse("FB").code(), "FB");
    }

    #[test]
    fn test_position_serde_uses_codes() {
        let json = serde_json::to_string(&Position::Dst).unwrap();
        assert_eq!(json, "\"DST\"");
        let parsed: Position = serde_json::from_str("\"wr\"").unwrap();
        assert_eq!(parsed, Position::Wr);
    }

    #[test]
    fn test_availability_sentinel() {
        assert!(Availability::parse("None").is_available());
        assert!(!Availability::parse("O").is_available());
        assert!(!Availability::parse("Q").is_available());
        assert!(!Availability::parse("").is_available());
        assert_eq!(Availability::parse("IR"), Availability::InjuredReserve);
    }

    #[test]
    fn test_player_clamps_projection() {
        let player = Player::available("A", 5000, Position::Rb, -3.0);
        assert_eq!(player.projected_score(), 0.0);

        let player = Player::available("B", 5000, Position::Rb, f64::NAN);
        assert_eq!(player.projected_score(), 0.0);

        let player = Player::available("C", 5000, Position::Rb, 12.5);
        assert_eq!(player.projected_score(), 12.5);
        assert!(player.is_available());
    }

    #[test]
    fn test_negative_projection_is_clamped_and_logged() {
        use std::sync::{Arc, Mutex};
        use tracing::field::{Field, Visit};
        use tracing::{Event, Subscriber};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Default)]
        struct EventName(Option<String>);

        impl Visit for EventName {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "event" {
                    self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }

            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "event" {
                    self.0 = Some(value.to_string());
                }
            }
        }

        struct Recorder(Arc<Mutex<Vec<String>>>);

        impl<S: Subscriber> Layer<S> for Recorder {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                let mut name = EventName::default();
                event.record(&mut name);
                if let Some(name) = name.0 {
                    self.0.lock().unwrap().push(name);
                }
            }
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Recorder(Arc::clone(&events)));
        let (negative, zero) = tracing::subscriber::with_default(subscriber, || {
            (
                Player::available("Bust", 3000, Position::Wr, -1.5),
                Player::available("Bench", 3000, Position::Wr, 0.0),
            )
        });

        assert_eq!(negative.projected_score(), 0.0);
        assert_eq!(zero.projected_score(), 0.0);
        assert_eq!(*events.lock().unwrap(), vec!["projection_clamped".to_string()]);
    }
}
