//! Errors which stop the sweep.

use thiserror::Error;

/// Fatal harness errors.
///
/// A job exiting with a non-zero code is not an error: it is recorded in the result set.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("can't launch command `{command}`: {source}")]
    Invocation {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("can't parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
