//! Console output for optimizer progress.
//!
//! Provides a `tracing` layer that renders the optimizer's structured events
//! as one readable line each. Everything else is left to the filter.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "draftforge=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `draftforge=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DraftConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats DraftForge events.
pub struct DraftConsoleLayer;

impl<S: Subscriber> Layer<S> for DraftConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("draftforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "event" {
            self.event = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{:?}", value).trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, format!("{value:.2}"));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    let Some(event) = v.event.as_deref() else {
        return String::new();
    };
    let field = |name: &str| v.get(name).unwrap_or("-");

    let body = match event {
        "pool_built" => format!(
            "Pool built: {} players from {} records ({} game duplicates, {} unavailable, {} malformed)",
            field("players"),
            field("records"),
            field("game_duplicates"),
            field("unavailable"),
            field("malformed")
        ),
        "optimize_start" => format!(
            "Optimizing {} lineups over {} players, salary cap {}, max overlap {}",
            field("lineups"),
            field("players"),
            field("salary_cap"),
            field("max_overlap")
        ),
        "lineup_found" => {
            let mut line = format!(
                "Lineup {}: projected {}, salary {}",
                field("iteration"),
                field("projected"),
                field("salary")
            );
            if let Some(actual) = v.get("actual").filter(|a| *a != "None") {
                let _ = write!(line, ", actual {actual}");
            }
            line
        }
        "optimize_end" => format!(
            "Finished: {}/{} lineups ({}) in {} ms",
            field("lineups"),
            field("requested"),
            field("stop_reason"),
            field("duration_ms")
        ),
        _ if level <= Level::WARN => {
            let mut line = event.to_string();
            for (name, value) in &v.fields {
                let _ = write!(line, " {name}={value}");
            }
            line
        }
        _ => return String::new(),
    };

    format!("{:>5} [DraftForge] {}", level.as_str(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str, fields: &[(&'static str, &str)]) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    #[test]
    fn test_lineup_found_line() {
        let v = visitor(
            "lineup_found",
            &[("iteration", "2"), ("projected", "151.30"), ("salary", "49800"), ("actual", "None")],
        );
        assert_eq!(
            format_event(Level::INFO, &v),
            " INFO [DraftForge] Lineup 2: projected 151.30, salary 49800"
        );
    }

    #[test]
    fn test_warnings_are_rendered_generically() {
        let v = visitor("duplicate_identity", &[("player", "Josh Allen")]);
        assert_eq!(
            format_event(Level::WARN, &v),
            " WARN [DraftForge] duplicate_identity player=Josh Allen"
        );
    }

    #[test]
    fn test_unknown_debug_events_are_skipped() {
        let v = visitor("solve_end", &[("nodes", "12")]);
        assert!(format_event(Level::DEBUG, &v).is_empty());
        assert!(format_event(Level::INFO, &EventVisitor::default()).is_empty());
    }
}
