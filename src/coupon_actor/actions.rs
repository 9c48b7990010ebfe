use chrono::NaiveDate;

/// Custom actions for Coupon entities.
#[derive(Debug, Clone)]
pub enum CouponAction {
    /// Checks whether the coupon can still be used on the given day.
    CheckValid { today: NaiveDate },
}

/// Results from CouponActions - variants match 1:1 with CouponAction
#[derive(Debug, Clone, PartialEq)]
pub enum CouponActionResult {
    CheckValid(bool),
}
