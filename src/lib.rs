//! # Market Directory
//!
//! A small marketplace directory: shops, products, users and per-shop
//! inventory counts, with proximity queries on top.
//!
//! ## Layout
//!
//! - **Storage actors** - one [`ResourceActor`](actor_framework::ResourceActor) per collection,
//!   each owning its records and answering one request at a time over a oneshot reply
//! - **Clients** - typed repository handles → [`UserClient`](clients::UserClient),
//!   [`ShopClient`](clients::ShopClient), [`ProductClient`](clients::ProductClient),
//!   [`InventoryClient`](clients::InventoryClient)
//! - **Matching** - nearest neighbour, radius and reverse product lookups → [`MatchingEngine`]
//! - **Inventory consistency** - attach and quantity adjustment → [`InventoryManager`]
//! - **System** - startup, request spans and shutdown → [`MarketSystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), market_directory::MarketError> {
//! use market_directory::MarketSystem;
//! use rust_decimal::Decimal;
//!
//! let system = MarketSystem::new();
//! let shop = system.create_shop("VS Computers", "Meerut", "10-8", 28.98, 77.70).await?;
//! let product = system.create_product("Keyboard", "Used for typing", Decimal::new(1000, 0)).await?;
//! system.attach_product(shop.id.clone(), product.id.clone()).await?;
//! system.adjust_inventory(shop.id, product.id, 5, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod geo;
pub mod inventory_manager;
pub mod matching;

mod user_actor;
mod shop_actor;
mod product_actor;
mod inventory_actor;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, MarketConfig, MarketSystem};
pub use error::{ErrorClass, MarketError};
pub use geo::{haversine_km, Coordinates};
pub use inventory_manager::InventoryManager;
pub use inventory_actor::{InventoryAction, InventoryActionResult};
pub use matching::MatchingEngine;
pub use shop_actor::{ShopAction, ShopActionResult};
