use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::coupon_actor::{CouponAction, CouponActionResult, CouponError};
use crate::domain::{Coupon, CouponCreate, CouponPatch};

/// Client for interacting with the Coupon actor.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl_basic_client!(CouponClient, Coupon, CouponError, coupon, coupons);

impl CouponClient {
    #[instrument(skip(self))]
    pub async fn create_coupon(&self, params: CouponCreate) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(CouponError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_coupon(&self, id: String, patch: CouponPatch) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(CouponError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_valid(&self, id: String, today: NaiveDate) -> Result<bool, CouponError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CouponAction::CheckValid { today })
            .await
            .map_err(CouponError::from)?
        {
            CouponActionResult::CheckValid(valid) => Ok(valid),
        }
    }
}
