use super::info::InfoParseError;
use redis::RedisError;
use std::time::Duration;
use thiserror::Error;

/// Failure of one sub-fetch of a scrape. Only the affected series is dropped.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("error fetching info: {0}")]
    Info(RedisError),

    #[error("error fetching key count: {0}")]
    Keys(RedisError),

    #[error(transparent)]
    Parse(#[from] InfoParseError),

    #[error("{operation} did not complete within the {timeout:?} scrape deadline")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
}
