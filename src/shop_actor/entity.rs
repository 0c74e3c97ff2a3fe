use crate::actor_framework::Entity;
use crate::domain::{Shop, ShopCreate};
use crate::error::ValidationError;
use super::actions::{ShopAction, ShopActionResult};

impl Entity for Shop {
    type Key = String;
    type CreateParams = ShopCreate;
    type Action = ShopAction;
    type ActionResult = ShopActionResult;
    type Rejection = ValidationError;

    fn key(&self) -> String { self.id.clone() }

    /// Creates a new Shop with an empty serviceable-product list.
    ///
    /// # Errors
    /// Rejects an empty name and coordinates outside the degree ranges.
    fn from_create_params(id: String, params: ShopCreate) -> Result<Self, ValidationError> {
        ValidationError::require_non_empty("name", &params.name)?;
        ValidationError::require_valid_coordinates(params.coordinates)?;
        Ok(Self {
            id,
            name: params.name,
            location: params.location,
            operation_hours: params.operation_hours,
            coordinates: params.coordinates,
            serviceable_products: Vec::new(),
        })
    }

    /// Handles shop-specific actions.
    ///
    /// # Actions
    /// - `AttachProduct(id)`: appends `id` unless present; never duplicates
    fn handle_action(&mut self, action: ShopAction) -> Result<ShopActionResult, ValidationError> {
        match action {
            ShopAction::AttachProduct(product_id) => {
                ValidationError::require_non_empty("product_id", &product_id)?;
                let changed = !self.serves(&product_id);
                if changed {
                    self.serviceable_products.push(product_id);
                }
                Ok(ShopActionResult::AttachProduct { shop: self.clone(), changed })
            }
        }
    }
}
