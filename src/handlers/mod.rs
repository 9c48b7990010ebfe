//! Controller-level façades.
//!
//! Each handler takes the authenticated owner (where relevant) and the raw
//! JSON request body, calls a client and folds the outcome into a [`Reply`]
//! carrying the HTTP status and JSON body a router would send back.

mod cart;
mod category;
mod coupon;
mod order;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::cart_actor::CartError;
use crate::category_actor::CategoryError;
use crate::coupon_actor::CouponError;
use crate::order_actor::OrderError;

pub use cart::*;
pub use category::*;
pub use coupon::*;
pub use order::*;

/// Status code and JSON body of a handler response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: impl Serialize) -> Self {
        Self::json(200, body)
    }

    pub fn created(body: impl Serialize) -> Self {
        Self::json(201, body)
    }

    /// A bare JSON string body, e.g. `"Added to cart"`.
    pub fn message(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Value::String(message.to_string()),
        }
    }

    /// `{ "message": ... }` body.
    pub fn notice(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            body: Value::String(message.into()),
        }
    }

    pub fn internal_error() -> Self {
        Self::message(500, "Internal server error")
    }

    /// Error reply; server-side failures never leak their details.
    pub fn failure(status: u16, error: &dyn std::error::Error) -> Self {
        if status >= 500 {
            Self::internal_error()
        } else {
            Self::message(status, &error.to_string())
        }
    }

    fn json(status: u16, body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                Self::internal_error()
            }
        }
    }
}

macro_rules! reply_from_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for Reply {
                fn from(e: $error) -> Self {
                    Reply::failure(e.status_code(), &e)
                }
            }
        )*
    };
}

reply_from_error!(CartError, CategoryError, CouponError, OrderError);

/// Parse a request body, or produce the 400 reply for it.
fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, Reply> {
    serde_json::from_value(body).map_err(|e| Reply::bad_request(format!("Invalid request body: {e}")))
}
