use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub location: String,
    pub coordinates: Coordinates,
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub location: String,
    pub coordinates: Coordinates,
}

impl UserCreate {
    pub fn new(name: impl Into<String>, location: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            coordinates: Coordinates::new(latitude, longitude),
        }
    }
}
