use tokio::sync::oneshot;

use super::{CartError, Decrement};
use crate::domain::{Cart, ItemRef, LineItem, LineItemId, OwnerId};
use crate::store::PullAck;

pub type CartResponse<T> = oneshot::Sender<Result<T, CartError>>;

/// Messages accepted by a [`CartService`](super::CartService) shard.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        owner_id: OwnerId,
        item_ref: ItemRef,
        quantity: u32,
        respond_to: CartResponse<LineItem>,
    },
    GetCart {
        owner_id: OwnerId,
        respond_to: CartResponse<Option<Cart>>,
    },
    RemoveItem {
        owner_id: OwnerId,
        line_item_id: LineItemId,
        respond_to: CartResponse<PullAck>,
    },
    DecrementItem {
        owner_id: OwnerId,
        item_ref: ItemRef,
        respond_to: CartResponse<Decrement>,
    },
    IncrementItem {
        owner_id: OwnerId,
        item_ref: ItemRef,
        respond_to: CartResponse<LineItem>,
    },
    Shutdown,
}
