use thiserror::Error;

use super::ConfigError;

/// Failures of the process as a whole, as opposed to a single request.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("service task failed: {0}")]
    TaskFailed(String),
}
