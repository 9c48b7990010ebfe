//! Typed handles for talking to the services.

#[macro_use]
mod macros;

mod cart_client;
mod category_client;
mod coupon_client;
mod order_client;

pub use cart_client::*;
pub use category_client::*;
pub use coupon_client::*;
pub use order_client::*;
