use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status, if the transition is allowed.
    UpdateStatus(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The order after the transition.
    UpdateStatus(crate::domain::Order),
}
