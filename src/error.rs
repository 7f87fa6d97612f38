use std::path::PathBuf;

use thiserror::Error;

/// Failures of the file and command-line surface. The inference engine itself
/// never fails.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}
