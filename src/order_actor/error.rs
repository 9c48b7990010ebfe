use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound(String),
    #[error("Coupon not found")]
    InvalidCoupon(String),
    #[error("Coupon expired")]
    CouponExpired(String),
    #[error("{0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl OrderError {
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::NotFound(_) | OrderError::InvalidCoupon(_) => 404,
            OrderError::CouponExpired(_) | OrderError::Validation(_) => 400,
            OrderError::ActorCommunication(_) => 500,
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound { id, .. } => OrderError::NotFound(id),
            FrameworkError::Validation(msg) => OrderError::Validation(msg),
            other => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
