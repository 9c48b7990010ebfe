//! Persistence boundary for carts.
//!
//! The cart service only talks to a [`CartStore`]; production wiring and
//! tests pick the implementation. [`InMemoryCartStore`] is the bundled one.

mod memory;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Cart, LineItemId, OwnerId};

pub use memory::InMemoryCartStore;

/// Failures reported by a [`CartStore`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("cart already exists for owner {0}")]
    Duplicate(OwnerId),
    #[error("no stored cart for owner {0}")]
    Missing(OwnerId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgment of a [`CartStore::pull_line_item`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullAck {
    pub acknowledged: bool,
    /// Carts matched by owner (0 or 1).
    pub matched_count: u64,
    /// Line items removed.
    pub modified_count: u64,
}

impl PullAck {
    /// True when the pull actually removed something.
    pub fn removed_any(&self) -> bool {
        self.acknowledged && self.modified_count > 0
    }
}

/// Document store of carts, one document per owner.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError>;

    /// Insert a cart for an owner that has none.
    async fn create(&self, cart: Cart) -> Result<Cart, StoreError>;

    /// Replace the stored document of an already loaded cart.
    async fn save(&self, cart: Cart) -> Result<Cart, StoreError>;

    /// Remove the line item with `line_item_id` in one operation, without a prior load.
    async fn pull_line_item(
        &self,
        owner_id: &OwnerId,
        line_item_id: &LineItemId,
    ) -> Result<PullAck, StoreError>;
}
