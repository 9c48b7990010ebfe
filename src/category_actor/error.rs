use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CategoryError {
    pub fn status_code(&self) -> u16 {
        match self {
            CategoryError::NotFound(_) => 404,
            CategoryError::Validation(_) => 400,
            CategoryError::ActorCommunication(_) => 500,
        }
    }
}

impl From<FrameworkError> for CategoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound { id, .. } => CategoryError::NotFound(id),
            FrameworkError::Validation(msg) => CategoryError::Validation(msg),
            other => CategoryError::ActorCommunication(other.to_string()),
        }
    }
}
