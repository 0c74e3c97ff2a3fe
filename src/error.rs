use std::fmt;

use thiserror::Error;

use crate::actor_framework::{FrameworkError, RequestError};
use crate::domain::Adjustment;
use crate::geo::Coordinates;

/// Collections a lookup can miss in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Shop,
    Product,
    Inventory,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Shop => "Shop",
            EntityKind::Product => "Product",
            EntityKind::Inventory => "Inventory",
        };
        f.write_str(name)
    }
}

/// Creation payloads that fail basic validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    #[error("price must not be negative: {0}")]
    NegativePrice(rust_decimal::Decimal),
    #[error("quantity must not be negative: {0}")]
    NegativeQuantity(i64),
}

impl ValidationError {
    pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField { field });
        }
        Ok(())
    }

    pub(crate) fn require_valid_coordinates(coordinates: Coordinates) -> Result<(), Self> {
        if !coordinates.is_valid() {
            return Err(ValidationError::InvalidCoordinates {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            });
        }
        Ok(())
    }
}

/// Adjustment that would leave an inventory count negative or overflow it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot apply {adjustment} to quantity {current}")]
pub struct QuantityError {
    pub current: i64,
    pub adjustment: Adjustment,
}

/// How the transport layer should present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    MissingResource,
    BadRequest,
    Internal,
}

/// Errors surfaced by every market operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },
    #[error("no other users to compare against user {0}")]
    EmptyPopulation(String),
    #[error("storage failure: {0}")]
    Storage(#[from] FrameworkError),
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl MarketError {
    pub fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        MarketError::NotFound { entity, id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MarketError::NotFound { .. })
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            MarketError::NotFound { .. } | MarketError::EmptyPopulation(_) => ErrorClass::MissingResource,
            MarketError::InvalidQuantity(_) | MarketError::InvalidInput(_) => ErrorClass::BadRequest,
            MarketError::Storage(_) | MarketError::Integrity(_) => ErrorClass::Internal,
        }
    }

    /// Message safe to hand to an external caller. Internal faults are not described.
    pub fn public_message(&self) -> String {
        match self.class() {
            ErrorClass::Internal => "internal failure".to_string(),
            _ => self.to_string(),
        }
    }
}

impl<R> From<RequestError<R>> for MarketError
where
    MarketError: From<R>,
{
    fn from(err: RequestError<R>) -> Self {
        match err {
            RequestError::Framework(e) => MarketError::Storage(e),
            RequestError::Rejected(r) => MarketError::from(r),
        }
    }
}
