//! Inventory rows keyed by `(shop_id, product_id)` and the atomic quantity adjustment.

mod actions;
pub mod entity;

pub use actions::*;
