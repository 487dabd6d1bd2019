//! Data-provider capability.
//!
//! The optimizer never fetches data itself. A provider hands over the raw
//! realized-stats rows and draftable records; how it obtains them (scraping,
//! an HTTP API, a file) is its own business.

use draftforge_core::{DraftableRecord, DraftablesFeed, Result, StatsRow};

/// Source of the raw records a pool is built from.
pub trait DataProvider {
    /// Realized-stats rows. An empty table means no actual points are known.
    fn provide_stats(&self) -> Result<Vec<StatsRow>>;

    /// Draftable player records, in feed order.
    fn provide_draftables(&self) -> Result<Vec<DraftableRecord>>;
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn provide_stats(&self) -> Result<Vec<StatsRow>> {
        (**self).provide_stats()
    }

    fn provide_draftables(&self) -> Result<Vec<DraftableRecord>> {
        (**self).provide_draftables()
    }
}

/// Provider backed by records already in memory.
///
/// # Example
///
/// ```
/// use draftforge::{DataProvider, DraftableRecord, InMemoryProvider};
///
/// let provider = InMemoryProvider::new(vec![
///     DraftableRecord::new("Josh Allen", "buf-1", 8200, "QB", 24.1),
/// ]);
/// assert_eq!(provider.provide_draftables().unwrap().len(), 1);
/// assert!(provider.provide_stats().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    stats: Vec<StatsRow>,
    draftables: Vec<DraftableRecord>,
}

impl InMemoryProvider {
    pub fn new(draftables: Vec<DraftableRecord>) -> Self {
        Self {
            stats: Vec::new(),
            draftables,
        }
    }

    /// Decodes a draftable feed document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON.
    pub fn from_feed_json(json: &str) -> Result<Self> {
        Ok(Self::new(DraftablesFeed::from_json_str(json)?.draftables))
    }

    /// Attaches realized-stats rows.
    pub fn with_stats(mut self, stats: Vec<StatsRow>) -> Self {
        self.stats = stats;
        self
    }
}

impl DataProvider for InMemoryProvider {
    fn provide_stats(&self) -> Result<Vec<StatsRow>> {
        Ok(self.stats.clone())
    }

    fn provide_draftables(&self) -> Result<Vec<DraftableRecord>> {
        Ok(self.draftables.clone())
    }
}
