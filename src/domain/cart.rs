use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemRef, LineItemId, OwnerId};

/// One product-and-quantity entry in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub item_ref: ItemRef,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(item_ref: ItemRef, quantity: u32) -> Self {
        Self {
            id: LineItemId::generate(),
            item_ref,
            quantity,
        }
    }
}

/// The per-owner aggregate of line items awaiting checkout.
///
/// `item_ref` is unique across `line_items` and no line item is kept at
/// quantity zero. Mutations live in `cart_actor::mutations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub owner_id: OwnerId,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// A fresh cart holding a single line item.
    pub fn with_item(owner_id: OwnerId, item: LineItem) -> Self {
        let now = Utc::now();
        Self {
            owner_id,
            line_items: vec![item],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_item(&self, item_ref: &ItemRef) -> Option<&LineItem> {
        self.line_items.iter().find(|item| &item.item_ref == item_ref)
    }
}
