//! Provider to pool to lineups, in one call.

use draftforge_config::ContestConfig;
use draftforge_core::{PlayerPool, PoolBuildReport, PoolBuilder, Result};
use tracing::info;

use crate::optimizer::LineupOptimizer;
use crate::provider::DataProvider;
use crate::result::OptimizationRun;

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub pool: PlayerPool,
    pub report: PoolBuildReport,
    pub run: OptimizationRun,
}

/// Fetches records from a provider, builds the pool and optimizes lineups.
///
/// # Example
///
/// ```
/// use draftforge::{ContestConfig, DraftPipeline, InMemoryProvider};
///
/// let provider = InMemoryProvider::from_feed_json(r#"{"draftables": []}"#).unwrap();
/// let output = DraftPipeline::new(provider, ContestConfig::default()).run().unwrap();
/// assert!(output.pool.is_empty());
/// assert!(output.run.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DraftPipeline<P> {
    provider: P,
    config: ContestConfig,
}

impl<P: DataProvider> DraftPipeline<P> {
    pub fn new(provider: P, config: ContestConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ContestConfig {
        &self.config
    }

    /// Runs the pipeline.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails, the configuration is invalid, or
    /// the pool policy rejects a duplicate identity.
    pub fn run(&self) -> Result<PipelineOutput> {
        let stats = self.provider.provide_stats()?;
        let draftables = self.provider.provide_draftables()?;
        info!(
            event = "pipeline_start",
            stats_rows = stats.len(),
            draftables = draftables.len()
        );

        let build = PoolBuilder::new()
            .with_duplicate_policy(self.config.pool.duplicate_policy)
            .with_stats_points_column(self.config.pool.stats_points_column)
            .build(&stats, &draftables)?;

        let optimizer = LineupOptimizer::new(&build.pool, self.config.clone());
        let run = match &build.realized {
            Some(realized) => optimizer.with_realized(realized).optimize()?,
            None => optimizer.optimize()?,
        };

        Ok(PipelineOutput {
            pool: build.pool,
            report: build.report,
            run,
        })
    }
}
