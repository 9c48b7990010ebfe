//! Coupon-specific domain logic, including the validity check action.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
