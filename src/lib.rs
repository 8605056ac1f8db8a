//! ikbench - Identifier-Key Performance Test
//!
//! Measures the storage/query impact of three identifier strategies used as
//! unique indexed keys in one PostgreSQL table: time-ordered UUID (v1),
//! random UUID (v4), and a single-node snowflake sequence id.
//!
//! # Modules
//!
//! - [`generator`] - UUID v1/v4 and snowflake id generation
//! - [`dataset`] - In-memory record population and lookup sample
//! - [`cache`] - OS/database cache invalidation strategies
//! - [`bench`] - Timed insert and cold/warm lookup phases
//! - [`config`] / [`logging`] - App config and tracing setup

pub mod bench;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod logging;

// Convenient re-exports at crate root
pub use bench::{DbTester, run_benchmark};
pub use cache::{CacheInvalidator, InteractiveInvalidator, ShellInvalidator};
pub use dataset::Record;
pub use error::BenchError;
pub use generator::{IkGenerator, SnowflakeNode};
