use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, CartRequest, Decrement};
use crate::domain::{Cart, ItemRef, LineItem, LineItemId, OwnerId};
use crate::store::PullAck;

/// Client for the sharded cart service.
///
/// Requests for one owner always land on the same shard.
#[derive(Clone)]
pub struct CartClient {
    shards: Arc<[mpsc::Sender<CartRequest>]>,
}

impl CartClient {
    pub fn new(shards: Vec<mpsc::Sender<CartRequest>>) -> Self {
        Self {
            shards: shards.into(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, owner_id: &OwnerId) -> Result<&mpsc::Sender<CartRequest>, CartError> {
        let index = shard_index(owner_id, self.shards.len());
        self.shards
            .get(index)
            .ok_or_else(|| CartError::ActorCommunication("no cart shards running".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        for shard in self.shards.iter() {
            shard
                .send(CartRequest::Shutdown)
                .await
                .map_err(|_| CartError::ActorCommunication("Actor closed".to_string()))?;
        }
        Ok(())
    }
}

/// Stable shard assignment for an owner.
pub fn shard_index(owner_id: &OwnerId, shards: usize) -> usize {
    if shards == 0 {
        return 0;
    }
    let mut hasher = DefaultHasher::new();
    owner_id.hash(&mut hasher);
    (hasher.finish() % shards as u64) as usize
}

cart_method!(fn add_item(owner_id: OwnerId, item_ref: ItemRef, quantity: u32) -> LineItem as CartRequest::AddItem);
cart_method!(fn get_cart(owner_id: OwnerId) -> Option<Cart> as CartRequest::GetCart);
cart_method!(fn remove_item(owner_id: OwnerId, line_item_id: LineItemId) -> PullAck as CartRequest::RemoveItem);
cart_method!(fn decrement_item(owner_id: OwnerId, item_ref: ItemRef) -> Decrement as CartRequest::DecrementItem);
cart_method!(fn increment_item(owner_id: OwnerId, item_ref: ItemRef) -> LineItem as CartRequest::IncrementItem);
