//! Search scope shared with termination conditions.

use std::time::{Duration, Instant};

use crate::stats::SolveStats;

/// Live state of one branch-and-bound search.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Instant,
    stats: SolveStats,
    has_incumbent: bool,
}

impl SearchScope {
    /// Starts the clock.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            stats: SolveStats::default(),
            has_incumbent: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolveStats {
        &mut self.stats
    }

    pub fn has_incumbent(&self) -> bool {
        self.has_incumbent
    }

    pub(crate) fn mark_incumbent(&mut self) {
        self.has_incumbent = true;
    }

    /// Stops the clock and returns the final statistics.
    pub fn finish(mut self) -> SolveStats {
        self.stats.set_total_time(self.start_time.elapsed());
        self.stats
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
