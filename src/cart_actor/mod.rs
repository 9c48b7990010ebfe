//! The cart mutation engine: add, read, remove, decrement and increment of
//! cart line items, run by sharded actors over an injected [`CartStore`](crate::store::CartStore).

pub mod error;
mod messages;
mod mutations;
mod service;

pub use error::*;
pub use messages::*;
pub use mutations::Decrement;
pub use service::CartService;
