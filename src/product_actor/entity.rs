use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate};
use crate::error::ValidationError;

impl Entity for Product {
    type Key = String;
    type CreateParams = ProductCreate;
    type Action = ();
    type ActionResult = ();
    type Rejection = ValidationError;

    fn key(&self) -> String { self.id.clone() }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the product
    /// * `params` - Name, description and price
    ///
    /// # Errors
    /// Rejects an empty name and a negative price.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ValidationError> {
        ValidationError::require_non_empty("name", &params.name)?;
        if params.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(params.price));
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
        })
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ValidationError> {
        Ok(())
    }
}
