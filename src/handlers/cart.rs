use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::instrument;

use super::{parse_body, Reply};
use crate::clients::CartClient;
use crate::domain::{ItemRef, LineItemId, OwnerId};

/// Body of an add-to-cart request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    pub cart_item: ItemRef,
    #[serde(deserialize_with = "quantity_from_number_or_string")]
    pub quantity: u32,
}

/// Body of increment / decrement requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemBody {
    pub cart_item: ItemRef,
}

fn quantity_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Cart endpoints.
#[derive(Clone)]
pub struct CartHandlers {
    client: CartClient,
}

impl CartHandlers {
    pub fn new(client: CartClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, body))]
    pub async fn add_to_cart(&self, owner_id: OwnerId, body: Value) -> Reply {
        let body: AddToCartBody = match parse_body(body) {
            Ok(body) => body,
            Err(reply) => return reply,
        };
        match self.client.add_item(owner_id, body.cart_item, body.quantity).await {
            Ok(_) => Reply::message(200, "Added to cart"),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, owner_id: OwnerId) -> Reply {
        match self.client.get_cart(owner_id).await {
            Ok(cart) => Reply::ok(cart),
            Err(e) => e.into(),
        }
    }

    /// Replies with the store acknowledgment rather than the updated cart.
    #[instrument(skip(self))]
    pub async fn delete_cart_item(&self, owner_id: OwnerId, line_item_id: LineItemId) -> Reply {
        match self.client.remove_item(owner_id, line_item_id).await {
            Ok(ack) => Reply::ok(ack),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn decrement_cart_item(&self, owner_id: OwnerId, body: Value) -> Reply {
        let body: CartItemBody = match parse_body(body) {
            Ok(body) => body,
            Err(reply) => return reply,
        };
        match self.client.decrement_item(owner_id, body.cart_item).await {
            Ok(_) => Reply::message(200, "Cart item updated"),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn increase_cart_item(&self, owner_id: OwnerId, body: Value) -> Reply {
        let body: CartItemBody = match parse_body(body) {
            Ok(body) => body,
            Err(reply) => return reply,
        };
        match self.client.increment_item(owner_id, body.cart_item).await {
            Ok(_) => Reply::message(200, "Cart item updated"),
            Err(e) => e.into(),
        }
    }
}
