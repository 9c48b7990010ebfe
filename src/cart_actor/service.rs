use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::{CartError, CartRequest, CartResponse, Decrement};
use crate::domain::{Cart, ItemRef, LineItem, LineItemId, OwnerId};
use crate::store::{CartStore, PullAck};

/// One shard of the cart mutation engine.
///
/// The run loop handles one message at a time, and the client routes every
/// owner to a fixed shard, so the load-modify-save sequence of one owner is
/// never interleaved with another request for the same owner.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    store: Arc<dyn CartStore>,
    shard: usize,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        shard: usize,
        store: Arc<dyn CartStore>,
    ) -> (Self, mpsc::Sender<CartRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store,
            shard,
        };
        (service, sender)
    }

    #[instrument(name = "cart_service", fields(shard = self.shard), skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem {
                    owner_id,
                    item_ref,
                    quantity,
                    respond_to,
                } => {
                    self.handle_add_item(owner_id, item_ref, quantity, respond_to)
                        .await;
                }
                CartRequest::GetCart {
                    owner_id,
                    respond_to,
                } => {
                    self.handle_get_cart(owner_id, respond_to).await;
                }
                CartRequest::RemoveItem {
                    owner_id,
                    line_item_id,
                    respond_to,
                } => {
                    self.handle_remove_item(owner_id, line_item_id, respond_to)
                        .await;
                }
                CartRequest::DecrementItem {
                    owner_id,
                    item_ref,
                    respond_to,
                } => {
                    self.handle_decrement_item(owner_id, item_ref, respond_to)
                        .await;
                }
                CartRequest::IncrementItem {
                    owner_id,
                    item_ref,
                    respond_to,
                } => {
                    self.handle_increment_item(owner_id, item_ref, respond_to)
                        .await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(owner_id = %owner_id, item_ref = %item_ref), skip(self, owner_id, item_ref, respond_to))]
    async fn handle_add_item(
        &self,
        owner_id: OwnerId,
        item_ref: ItemRef,
        quantity: u32,
        respond_to: CartResponse<LineItem>,
    ) {
        debug!("Processing add_item request");
        let result = self.add_item(owner_id, item_ref, quantity).await;
        if let Ok(item) = &result {
            info!(quantity = item.quantity, "Added to cart");
        }
        let _ = respond_to.send(log_failure(result));
    }

    async fn add_item(
        &self,
        owner_id: OwnerId,
        item_ref: ItemRef,
        quantity: u32,
    ) -> Result<LineItem, CartError> {
        match self.store.find_by_owner(&owner_id).await? {
            Some(mut cart) => {
                let item = cart.add_item(item_ref, quantity)?;
                self.store.save(cart).await?;
                Ok(item)
            }
            None => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity("quantity must be at least 1".into()));
                }
                let item = LineItem::new(item_ref, quantity);
                self.store
                    .create(Cart::with_item(owner_id, item.clone()))
                    .await?;
                debug!("Created cart");
                Ok(item)
            }
        }
    }

    #[instrument(fields(owner_id = %owner_id), skip(self, owner_id, respond_to))]
    async fn handle_get_cart(&self, owner_id: OwnerId, respond_to: CartResponse<Option<Cart>>) {
        debug!("Processing get_cart request");
        let result = self.store.find_by_owner(&owner_id).await.map_err(CartError::from);
        match &result {
            Ok(Some(cart)) => debug!(line_items = cart.line_items.len(), "Cart found"),
            Ok(None) => debug!("No cart for owner"),
            Err(_) => {}
        }
        let _ = respond_to.send(log_failure(result));
    }

    #[instrument(fields(owner_id = %owner_id, line_item_id = %line_item_id), skip(self, owner_id, line_item_id, respond_to))]
    async fn handle_remove_item(
        &self,
        owner_id: OwnerId,
        line_item_id: LineItemId,
        respond_to: CartResponse<PullAck>,
    ) {
        debug!("Processing remove_item request");
        let result = self
            .store
            .pull_line_item(&owner_id, &line_item_id)
            .await
            .map_err(CartError::from)
            .and_then(|ack| {
                if ack.removed_any() {
                    info!(removed = ack.modified_count, "Cart item removed");
                    Ok(ack)
                } else {
                    Err(CartError::LineItemNotFound)
                }
            });
        let _ = respond_to.send(log_failure(result));
    }

    #[instrument(fields(owner_id = %owner_id, item_ref = %item_ref), skip(self, owner_id, item_ref, respond_to))]
    async fn handle_decrement_item(
        &self,
        owner_id: OwnerId,
        item_ref: ItemRef,
        respond_to: CartResponse<Decrement>,
    ) {
        debug!("Processing decrement_item request");
        let result = self.decrement_item(&owner_id, &item_ref).await;
        match &result {
            Ok(Decrement::Reduced(item)) => info!(quantity = item.quantity, "Cart item decremented"),
            Ok(Decrement::Removed(_)) => info!("Cart item removed at zero"),
            Err(_) => {}
        }
        let _ = respond_to.send(log_failure(result));
    }

    async fn decrement_item(&self, owner_id: &OwnerId, item_ref: &ItemRef) -> Result<Decrement, CartError> {
        let mut cart = self
            .store
            .find_by_owner(owner_id)
            .await?
            .ok_or(CartError::CartNotFound)?;
        let outcome = cart.decrement_item(item_ref)?;
        self.store.save(cart).await?;
        Ok(outcome)
    }

    #[instrument(fields(owner_id = %owner_id, item_ref = %item_ref), skip(self, owner_id, item_ref, respond_to))]
    async fn handle_increment_item(
        &self,
        owner_id: OwnerId,
        item_ref: ItemRef,
        respond_to: CartResponse<LineItem>,
    ) {
        debug!("Processing increment_item request");
        let result = self.increment_item(&owner_id, &item_ref).await;
        if let Ok(item) = &result {
            info!(quantity = item.quantity, "Cart item incremented");
        }
        let _ = respond_to.send(log_failure(result));
    }

    async fn increment_item(&self, owner_id: &OwnerId, item_ref: &ItemRef) -> Result<LineItem, CartError> {
        let mut cart = self
            .store
            .find_by_owner(owner_id)
            .await?
            .ok_or(CartError::CartNotFound)?;
        let item = cart.increment_item(item_ref)?;
        self.store.save(cart).await?;
        Ok(item)
    }
}

fn log_failure<T>(result: Result<T, CartError>) -> Result<T, CartError> {
    if let Err(e) = &result {
        if e.status_code() >= 500 {
            error!(error = %e, "Cart operation failed");
        } else {
            warn!(error = %e, "Cart operation rejected");
        }
    }
    result
}
