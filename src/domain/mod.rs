//! Business entities, free of actor and store concerns.

pub mod cart;
pub mod category;
pub mod coupon;
pub mod ids;
pub mod order;

pub use cart::*;
pub use category::*;
pub use coupon::*;
pub use ids::*;
pub use order::*;
