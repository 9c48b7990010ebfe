use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A percentage discount code with an expiry date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub name: String,
    /// Percent off, 1..=100.
    pub discount: u8,
    /// Last day on which the coupon may be used.
    pub expiry: NaiveDate,
}

impl Coupon {
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        day <= self.expiry
    }
}

/// Payload for creating a coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponCreate {
    pub name: String,
    pub discount: u8,
    pub expiry: NaiveDate,
}

/// Payload for updating a coupon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouponPatch {
    pub name: Option<String>,
    pub discount: Option<u8>,
    pub expiry: Option<NaiveDate>,
}
