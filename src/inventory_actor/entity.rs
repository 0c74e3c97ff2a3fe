use crate::actor_framework::Entity;
use crate::domain::{Inventory, InventoryKey};
use crate::error::QuantityError;
use super::actions::{InventoryAction, InventoryActionResult};

impl Entity for Inventory {
    type Key = InventoryKey;
    type CreateParams = InventoryKey;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Rejection = QuantityError;

    fn key(&self) -> InventoryKey { self.compound_key() }

    /// New rows always start at quantity 0.
    fn from_create_params(id: String, key: InventoryKey) -> Result<Self, QuantityError> {
        Ok(Self {
            id,
            shop_id: key.shop_id,
            product_id: key.product_id,
            quantity: 0,
        })
    }

    fn handle_action(&mut self, action: InventoryAction) -> Result<InventoryActionResult, QuantityError> {
        match action {
            InventoryAction::Adjust(adjustment) => {
                let rejected = QuantityError { current: self.quantity, adjustment };
                let quantity = adjustment.apply(self.quantity).ok_or(rejected)?;
                if quantity < 0 {
                    return Err(rejected);
                }
                self.quantity = quantity;
                Ok(InventoryActionResult::Adjust(self.clone()))
            }
        }
    }
}
