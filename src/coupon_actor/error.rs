use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Coupon not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CouponError {
    pub fn status_code(&self) -> u16 {
        match self {
            CouponError::NotFound(_) => 404,
            CouponError::Validation(_) => 400,
            CouponError::ActorCommunication(_) => 500,
        }
    }
}

impl From<FrameworkError> for CouponError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound { id, .. } => CouponError::NotFound(id),
            FrameworkError::Validation(msg) => CouponError::Validation(msg),
            other => CouponError::ActorCommunication(other.to_string()),
        }
    }
}
