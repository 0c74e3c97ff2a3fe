use crate::domain::{Adjustment, Inventory};

/// Custom actions for Inventory entities.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    /// Applies an adjustment to the quantity.
    ///
    /// # Errors
    /// Fails, without writing, if the result would be negative or overflow.
    Adjust(Adjustment),
}

/// Results from InventoryActions - variants match 1:1 with InventoryAction
#[derive(Debug, Clone)]
pub enum InventoryActionResult {
    /// The row after the adjustment was stored.
    Adjust(Inventory),
}
