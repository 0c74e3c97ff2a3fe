use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate};
use crate::error::ValidationError;

impl Entity for User {
    type Key = String;
    type CreateParams = UserCreate;
    type Action = ();
    type ActionResult = ();
    type Rejection = ValidationError;

    fn key(&self) -> String { self.id.clone() }

    /// Creates a new User from creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name and coordinates outside the degree ranges.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, ValidationError> {
        ValidationError::require_non_empty("name", &params.name)?;
        ValidationError::require_valid_coordinates(params.coordinates)?;
        Ok(Self {
            id,
            name: params.name,
            location: params.location,
            coordinates: params.coordinates,
        })
    }

    /// Users are immutable once created; no custom actions are defined.
    fn handle_action(&mut self, _action: ()) -> Result<(), ValidationError> {
        Ok(())
    }
}
