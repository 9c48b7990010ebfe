use std::cmp::Ordering;

use chrono::Utc;

use super::actions::{OrderAction, OrderActionResult};
use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Order, OrderCreate, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders change only through status transitions
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    const KIND: &'static str = "Order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order starts out `Pending` and is stamped with the current time.
    /// Coupon checks happen in the client before this is reached.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, FrameworkError> {
        if params.items.is_empty() {
            return Err(FrameworkError::Validation("Order has no items".to_string()));
        }
        if params.items.iter().any(|item| item.quantity == 0) {
            return Err(FrameworkError::Validation("Order item quantity must be at least 1".to_string()));
        }
        if !params.amount.is_finite() || params.amount < 0.0 {
            return Err(FrameworkError::Validation(format!("Invalid order amount: {}", params.amount)));
        }

        Ok(Self {
            id,
            user_id: params.user_id,
            order_date: Utc::now(),
            amount: params.amount,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            items: params.items,
            shipping_address: params.shipping_address,
            coupon_id: params.coupon_id,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Handles order-specific actions.
    ///
    /// # Errors
    /// Returns a validation error for transitions `OrderStatus::can_become` rejects.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, FrameworkError> {
        match action {
            OrderAction::UpdateStatus(next) => {
                if !self.status.can_become(next) {
                    return Err(FrameworkError::Validation(format!(
                        "Cannot change order status from {} to {}",
                        self.status, next
                    )));
                }
                self.status = next;
                Ok(OrderActionResult::UpdateStatus(self.clone()))
            }
        }
    }

    /// Newest first.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.order_date.cmp(&a.order_date)
    }
}
