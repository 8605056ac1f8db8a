use std::process::ExitStatus;
use thiserror::Error;

/// Every failure in the harness is fatal: the run either completes or aborts.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snowflake node id {0}: must fit in 10 bits")]
    InvalidNodeId(u16),

    #[error("System clock is {0} ms behind the last issued snowflake id")]
    ClockDrift(u64),

    #[error("Cache invalidation command failed: `{command}` ({status})")]
    CacheCommand { command: String, status: ExitStatus },

    #[error("No automatic cache invalidation available on {0}, use --pause")]
    UnsupportedPlatform(String),

    #[error("Database did not become ready after {0} reconnect attempts")]
    DatabaseUnavailable(u32),

    #[error("Looked-up row does not match the generated record for key {key}")]
    RowMismatch { key: String },
}
