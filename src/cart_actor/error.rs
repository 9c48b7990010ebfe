use thiserror::Error;

use crate::domain::ItemRef;
use crate::store::StoreError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found")]
    CartNotFound,
    #[error("Product not found")]
    ItemNotFound(ItemRef),
    #[error("Cart item not found")]
    LineItemNotFound,
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Cart store error: {0}")]
    Store(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CartError {
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::CartNotFound | CartError::ItemNotFound(_) | CartError::LineItemNotFound => 404,
            CartError::InvalidQuantity(_) => 400,
            CartError::Store(_) | CartError::ActorCommunication(_) => 500,
        }
    }
}
