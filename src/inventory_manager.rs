//! Keeps shop serviceable lists and inventory rows consistent.
//!
//! Invariants held here:
//! - a shop lists a product id at most once;
//! - every listed `(shop, product)` pair has exactly one inventory row,
//!   created at quantity 0 the first time the pair is attached;
//! - inventory quantities never go negative.

use tracing::{info, instrument, warn};

use crate::clients::{InventoryClient, ProductClient, ShopClient};
use crate::domain::{Adjustment, Inventory, InventoryKey, ShopView};
use crate::error::MarketError;
use crate::matching::hydrate_shop;

#[derive(Clone)]
pub struct InventoryManager {
    shops: ShopClient,
    products: ProductClient,
    inventory: InventoryClient,
}

impl InventoryManager {
    pub fn new(shops: ShopClient, products: ProductClient, inventory: InventoryClient) -> Self {
        Self { shops, products, inventory }
    }

    /// Declares that `shop_id` can supply `product_id`. Idempotent.
    ///
    /// # Steps
    /// 1. The product must exist.
    /// 2. The shop's list gains the id unless it already has it (atomic in the shop actor).
    /// 3. The inventory row for the pair is created at 0 if absent.
    /// 4. The refreshed, hydrated shop is returned.
    ///
    /// # Errors
    /// `NotFound` for an unknown product or shop. A failed inventory lookup
    /// other than "absent" is returned as is.
    #[instrument(skip(self))]
    pub async fn attach_product(&self, shop_id: String, product_id: String) -> Result<ShopView, MarketError> {
        self.products.get_product(product_id.clone()).await?;

        let (shop, changed) = self.shops.attach_product(shop_id.clone(), product_id.clone()).await?;
        if changed {
            info!("Product added to serviceable list");
        }

        let key = InventoryKey::new(shop_id, product_id);
        match self.inventory.get_inventory(key.clone()).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                self.inventory.ensure_inventory(key).await?;
            }
            Err(e) => return Err(e),
        }

        hydrate_shop(&self.products, shop).await
    }

    #[instrument(skip(self))]
    pub async fn get_inventory(&self, shop_id: String, product_id: String) -> Result<Inventory, MarketError> {
        self.inventory.get_inventory(InventoryKey::new(shop_id, product_id)).await
    }

    /// Changes the stored quantity for an existing row.
    ///
    /// Never creates a row. The non-negative check runs before anything is
    /// written, and a rejected adjustment leaves the row as it was.
    #[instrument(skip(self))]
    pub async fn adjust_inventory(
        &self,
        shop_id: String,
        product_id: String,
        delta: u32,
        is_increase: bool,
    ) -> Result<Inventory, MarketError> {
        let key = InventoryKey::new(shop_id, product_id);
        let adjustment = Adjustment::new(delta, is_increase);
        match self.inventory.adjust_inventory(key, adjustment).await {
            Ok(row) => {
                info!(quantity = row.quantity, "Inventory adjusted");
                Ok(row)
            }
            Err(e @ MarketError::InvalidQuantity(_)) => {
                warn!(error = %e, "Inventory adjustment rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
