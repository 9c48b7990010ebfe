use chrono::Utc;
use tracing::{error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::CouponClient;
use crate::coupon_actor::CouponError;
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for interacting with the Order actor.
///
/// Order creation is orchestrated here: the referenced coupon, if any, is
/// checked against the coupon service before the order is stored.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    coupon_client: CouponClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, coupon_client: CouponClient) -> Self {
        Self {
            inner,
            coupon_client,
        }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id, items = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        info!("Processing create_order request (Client Side)");

        if let Some(coupon_id) = params.coupon_id.clone() {
            let today = Utc::now().date_naive();
            match self.coupon_client.check_valid(coupon_id.clone(), today).await {
                Ok(true) => info!(coupon_id = %coupon_id, "Coupon validation successful"),
                Ok(false) => {
                    error!(coupon_id = %coupon_id, "Coupon expired");
                    return Err(OrderError::CouponExpired(coupon_id));
                }
                Err(CouponError::NotFound(_)) => {
                    error!(coupon_id = %coupon_id, "Coupon not found");
                    return Err(OrderError::InvalidCoupon(coupon_id));
                }
                Err(e) => {
                    error!(error = %e, "Coupon validation failed");
                    return Err(OrderError::ActorCommunication(format!("Coupon validation failed: {e}")));
                }
            }
        }

        self.inner.create(params).await.map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        self.inner
            .list(Some(Box::new(move |order: &Order| order.user_id == user_id)))
            .await
            .map_err(OrderError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::UpdateStatus(status))
            .await
            .map_err(OrderError::from)?
        {
            OrderActionResult::UpdateStatus(order) => {
                info!(status = %order.status, "Order status updated");
                Ok(order)
            }
        }
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);
