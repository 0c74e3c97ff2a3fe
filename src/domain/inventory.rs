use std::fmt;

use serde::{Deserialize, Serialize};

/// Stock count of one product at one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: String,
    pub shop_id: String,
    pub product_id: String,
    pub quantity: i64,
}

impl Inventory {
    pub fn compound_key(&self) -> InventoryKey {
        InventoryKey::new(&self.shop_id, &self.product_id)
    }
}

/// Compound `(shop_id, product_id)` key. At most one inventory row exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryKey {
    pub shop_id: String,
    pub product_id: String,
}

impl InventoryKey {
    pub fn new(shop_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            product_id: product_id.into(),
        }
    }
}

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.shop_id, self.product_id)
    }
}

/// Direction of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    Increase(u32),
    Decrease(u32),
}

impl Adjustment {
    pub fn new(delta: u32, is_increase: bool) -> Self {
        if is_increase {
            Adjustment::Increase(delta)
        } else {
            Adjustment::Decrease(delta)
        }
    }

    /// Quantity after applying this adjustment, or `None` on overflow.
    /// The result may be negative; callers enforce the lower bound.
    pub fn apply(self, quantity: i64) -> Option<i64> {
        match self {
            Adjustment::Increase(delta) => quantity.checked_add(i64::from(delta)),
            Adjustment::Decrease(delta) => quantity.checked_sub(i64::from(delta)),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Increase(delta) => write!(f, "+{delta}"),
            Adjustment::Decrease(delta) => write!(f, "-{delta}"),
        }
    }
}
