use serde_json::Value;
use tracing::instrument;

use super::{parse_body, Reply};
use crate::clients::CouponClient;
use crate::domain::{CouponCreate, CouponPatch};

/// Coupon endpoints.
#[derive(Clone)]
pub struct CouponHandlers {
    client: CouponClient,
}

impl CouponHandlers {
    pub fn new(client: CouponClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, body))]
    pub async fn create_coupon(&self, body: Value) -> Reply {
        let params: CouponCreate = match parse_body(body) {
            Ok(params) => params,
            Err(reply) => return reply,
        };
        match self.client.create_coupon(params).await {
            Ok(coupon) => Reply::created(coupon),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_coupon(&self, id: String) -> Reply {
        match self.client.get_coupon(id).await {
            Ok(coupon) => Reply::ok(coupon),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_coupons(&self) -> Reply {
        match self.client.list_coupons().await {
            Ok(coupons) => Reply::ok(coupons),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn update_coupon(&self, id: String, body: Value) -> Reply {
        let patch: CouponPatch = match parse_body(body) {
            Ok(patch) => patch,
            Err(reply) => return reply,
        };
        match self.client.update_coupon(id, patch).await {
            Ok(coupon) => Reply::ok(coupon),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_coupon(&self, id: String) -> Reply {
        match self.client.delete_coupon(id).await {
            Ok(_) => Reply::notice(200, "Coupon removed"),
            Err(e) => e.into(),
        }
    }
}
