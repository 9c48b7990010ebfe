use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use super::{CartStore, PullAck, StoreError};
use crate::domain::{Cart, LineItemId, OwnerId};

/// Process-local [`CartStore`] backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: DashMap<OwnerId, Cart>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.get(owner_id).map(|cart| cart.clone()))
    }

    #[instrument(skip(self, cart), fields(owner_id = %cart.owner_id))]
    async fn create(&self, cart: Cart) -> Result<Cart, StoreError> {
        match self.carts.entry(cart.owner_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(cart.owner_id)),
            Entry::Vacant(slot) => {
                slot.insert(cart.clone());
                debug!("Cart document inserted");
                Ok(cart)
            }
        }
    }

    #[instrument(skip(self, cart), fields(owner_id = %cart.owner_id))]
    async fn save(&self, cart: Cart) -> Result<Cart, StoreError> {
        match self.carts.get_mut(&cart.owner_id) {
            Some(mut stored) => {
                *stored = cart.clone();
                debug!("Cart document replaced");
                Ok(cart)
            }
            None => Err(StoreError::Missing(cart.owner_id)),
        }
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    async fn pull_line_item(
        &self,
        owner_id: &OwnerId,
        line_item_id: &LineItemId,
    ) -> Result<PullAck, StoreError> {
        let Some(mut cart) = self.carts.get_mut(owner_id) else {
            return Ok(PullAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            });
        };

        let before = cart.line_items.len();
        cart.line_items.retain(|item| &item.id != line_item_id);
        let removed = (before - cart.line_items.len()) as u64;
        if removed > 0 {
            cart.updated_at = chrono::Utc::now();
        }
        debug!(removed, "Pulled line items");

        Ok(PullAck {
            acknowledged: true,
            matched_count: 1,
            modified_count: removed,
        })
    }
}
