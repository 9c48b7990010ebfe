//! In-memory line-item arithmetic. Persisting the result is the caller's job.

use chrono::Utc;

use super::CartError;
use crate::domain::{Cart, ItemRef, LineItem};

/// What a decrement did to the targeted line item.
#[derive(Debug, Clone, PartialEq)]
pub enum Decrement {
    /// Quantity dropped to the contained value.
    Reduced(LineItem),
    /// Quantity was 1, so the line item left the cart.
    Removed(LineItem),
}

impl Cart {
    /// Merge `quantity` units of `item_ref` into the cart.
    ///
    /// An existing line item grows by `quantity`; otherwise a new one is appended.
    pub fn add_item(&mut self, item_ref: ItemRef, quantity: u32) -> Result<LineItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity("quantity must be at least 1".into()));
        }

        let item = match self.line_items.iter_mut().find(|item| item.item_ref == item_ref) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| CartError::InvalidQuantity("quantity overflow".into()))?;
                existing.clone()
            }
            None => {
                let item = LineItem::new(item_ref, quantity);
                self.line_items.push(item.clone());
                item
            }
        };
        self.updated_at = Utc::now();
        Ok(item)
    }

    pub fn increment_item(&mut self, item_ref: &ItemRef) -> Result<LineItem, CartError> {
        let item = self
            .line_items
            .iter_mut()
            .find(|item| &item.item_ref == item_ref)
            .ok_or_else(|| CartError::ItemNotFound(item_ref.clone()))?;
        item.quantity = item
            .quantity
            .checked_add(1)
            .ok_or_else(|| CartError::InvalidQuantity("quantity overflow".into()))?;
        let item = item.clone();
        self.updated_at = Utc::now();
        Ok(item)
    }

    /// Take one unit off `item_ref`; a line item at 1 is removed instead of kept at 0.
    pub fn decrement_item(&mut self, item_ref: &ItemRef) -> Result<Decrement, CartError> {
        let position = self
            .line_items
            .iter()
            .position(|item| &item.item_ref == item_ref)
            .ok_or_else(|| CartError::ItemNotFound(item_ref.clone()))?;

        let outcome = if self.line_items[position].quantity <= 1 {
            Decrement::Removed(self.line_items.remove(position))
        } else {
            let item = &mut self.line_items[position];
            item.quantity -= 1;
            Decrement::Reduced(item.clone())
        };
        self.updated_at = Utc::now();
        Ok(outcome)
    }
}
