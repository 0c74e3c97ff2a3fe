use serde::{Deserialize, Serialize};

use crate::domain::Product;
use crate::geo::Coordinates;

/// A shop as stored. `serviceable_products` holds product ids, each at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub location: String,
    pub operation_hours: String,
    pub coordinates: Coordinates,
    pub serviceable_products: Vec<String>,
}

impl Shop {
    pub fn serves(&self, product_id: &str) -> bool {
        self.serviceable_products.iter().any(|id| id == product_id)
    }
}

/// Payload for creating a new shop. New shops serve nothing.
#[derive(Debug, Clone)]
pub struct ShopCreate {
    pub name: String,
    pub location: String,
    pub operation_hours: String,
    pub coordinates: Coordinates,
}

impl ShopCreate {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        operation_hours: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            operation_hours: operation_hours.into(),
            coordinates: Coordinates::new(latitude, longitude),
        }
    }
}

/// Externally visible shop, with serviceable product ids resolved to records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub operation_hours: String,
    pub coordinates: Coordinates,
    pub serviceable_products: Vec<Product>,
}

impl ShopView {
    pub fn new(shop: Shop, serviceable_products: Vec<Product>) -> Self {
        Self {
            id: shop.id,
            name: shop.name,
            location: shop.location,
            operation_hours: shop.operation_hours,
            coordinates: shop.coordinates,
            serviceable_products,
        }
    }
}
