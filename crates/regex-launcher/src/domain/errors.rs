//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("invalid position '{0}': expected LINE or LINE:COLUMN with 1-based numbers")]
    InvalidPosition(String),
}
