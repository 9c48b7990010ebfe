use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{parse_body, Reply};
use crate::clients::OrderClient;
use crate::domain::{OrderCreate, OrderStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    order_status: OrderStatus,
}

/// Order endpoints.
#[derive(Clone)]
pub struct OrderHandlers {
    client: OrderClient,
}

impl OrderHandlers {
    pub fn new(client: OrderClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, body))]
    pub async fn create_order(&self, body: Value) -> Reply {
        let params: OrderCreate = match parse_body(body) {
            Ok(params) => params,
            Err(reply) => return reply,
        };
        match self.client.create_order(params).await {
            Ok(order) => Reply::created(order),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Reply {
        match self.client.get_order(id).await {
            Ok(order) => Reply::ok(order),
            Err(e) => e.into(),
        }
    }

    /// Orders placed by `user_id`, newest first.
    #[instrument(skip(self))]
    pub async fn get_orders(&self, user_id: String) -> Reply {
        match self.client.list_orders_for_user(user_id).await {
            Ok(orders) => Reply::ok(orders),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn update_order_status(&self, id: String, body: Value) -> Reply {
        let body: StatusBody = match parse_body(body) {
            Ok(body) => body,
            Err(reply) => return reply,
        };
        match self.client.update_order_status(id, body.order_status).await {
            Ok(order) => Reply::ok(order),
            Err(e) => e.into(),
        }
    }
}
