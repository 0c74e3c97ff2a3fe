//! Typed repository clients, one per collection.
//!
//! Each call sends a single request to the owning actor and awaits a single
//! `Result`. Lookups of one required record return
//! [`MarketError::NotFound`](crate::error::MarketError::NotFound) when it is
//! absent, which is kept apart from storage faults.

#[macro_use]
mod macros;

mod user_client;
mod shop_client;
mod product_client;
mod inventory_client;

pub use user_client::UserClient;
pub use shop_client::ShopClient;
pub use product_client::ProductClient;
pub use inventory_client::InventoryClient;
