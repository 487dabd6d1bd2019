//! Shared test fixtures for DraftForge crates.
//!
//! This crate provides player pools and raw feed data for testing.
//! It depends on `draftforge-core` and on `rand` for seeded slates.
//!
//! - [`pools`] - Ready-made player pools for optimizer scenarios
//! - [`feeds`] - Raw draftable records, feed JSON and realized-stats rows
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! draftforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use draftforge_test::pools::{reference_pool, minimal_pool};
//! use draftforge_test::feeds::sample_feed_json;
//! ```

pub mod feeds;
pub mod pools;

pub use feeds::{reference_records, reference_stats_rows, sample_feed_json};
pub use pools::{
    interchangeable_pair_pool, minimal_pool, player, reference_pool, seeded_slate_pool,
    thin_running_back_pool,
};
