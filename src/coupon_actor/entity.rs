use std::cmp::Ordering;

use super::actions::{CouponAction, CouponActionResult};
use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Coupon, CouponCreate, CouponPatch};

fn check_name(name: &str) -> Result<(), FrameworkError> {
    if name.trim().is_empty() {
        return Err(FrameworkError::Validation("Coupon name is required".to_string()));
    }
    Ok(())
}

fn check_discount(discount: u8) -> Result<(), FrameworkError> {
    if !(1..=100).contains(&discount) {
        return Err(FrameworkError::Validation(format!(
            "Discount must be between 1 and 100, got {discount}"
        )));
    }
    Ok(())
}

impl Entity for Coupon {
    type Id = String;
    type CreateParams = CouponCreate;
    type Patch = CouponPatch;
    type Action = CouponAction;
    type ActionResult = CouponActionResult;

    const KIND: &'static str = "Coupon";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: CouponCreate) -> Result<Self, FrameworkError> {
        check_name(&params.name)?;
        check_discount(params.discount)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            discount: params.discount,
            expiry: params.expiry,
        })
    }

    fn on_update(&mut self, patch: CouponPatch) -> Result<(), FrameworkError> {
        if let Some(name) = patch.name {
            check_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(discount) = patch.discount {
            check_discount(discount)?;
            self.discount = discount;
        }
        if let Some(expiry) = patch.expiry {
            self.expiry = expiry;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CouponAction) -> Result<CouponActionResult, FrameworkError> {
        match action {
            CouponAction::CheckValid { today } => Ok(CouponActionResult::CheckValid(self.is_valid_on(today))),
        }
    }

    /// Soonest expiry first.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.expiry.cmp(&b.expiry).then_with(|| a.name.cmp(&b.name))
    }
}
