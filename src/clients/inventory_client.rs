use tracing::{debug, info, instrument};

use crate::actor_framework::{Created, FrameworkError, RequestError, ResourceClient};
use crate::domain::{Adjustment, Inventory, InventoryKey};
use crate::error::{EntityKind, MarketError, ValidationError};
use crate::inventory_actor::{InventoryAction, InventoryActionResult};

/// Client for interacting with the Inventory actor.
///
/// Rows are stored under their `(shop_id, product_id)` key, so compound-key
/// lookups are direct and id lookups scan.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Inventory>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<Inventory>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_inventory_by_id(&self, id: String) -> Result<Inventory, MarketError> {
        debug!("Sending request");
        let needle = id.clone();
        self.inner
            .scan(move |row| row.id == needle)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MarketError::not_found(EntityKind::Inventory, id))
    }

    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn get_inventory(&self, key: InventoryKey) -> Result<Inventory, MarketError> {
        debug!("Sending request");
        self.inner
            .get(key.clone())
            .await?
            .ok_or_else(|| MarketError::not_found(EntityKind::Inventory, key))
    }

    /// Upserts `row` by its compound key. A negative quantity is refused before
    /// anything is sent to the actor.
    #[instrument(skip(self, row), fields(key = %row.compound_key(), quantity = row.quantity))]
    pub async fn save_inventory(&self, row: Inventory) -> Result<(), MarketError> {
        if row.quantity < 0 {
            return Err(ValidationError::NegativeQuantity(row.quantity).into());
        }
        debug!("Sending request");
        Ok(self.inner.save(row).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_inventories(&self) -> Result<Vec<Inventory>, MarketError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self, predicate))]
    pub async fn scan_inventories(
        &self,
        predicate: impl Fn(&Inventory) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<Inventory>, MarketError> {
        debug!("Sending request");
        Ok(self.inner.scan(predicate).await?)
    }

    /// Creates the row for `key` at quantity 0 unless one already exists.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn ensure_inventory(&self, key: InventoryKey) -> Result<Created<Inventory>, MarketError> {
        debug!("Sending request");
        let created = self.inner.create(key).await?;
        if created.was_inserted() {
            info!("Inventory row created");
        }
        Ok(created)
    }

    /// Applies `adjustment` inside the actor; a rejected adjustment writes nothing.
    #[instrument(skip(self, key, adjustment), fields(key = %key, adjustment = %adjustment))]
    pub async fn adjust_inventory(&self, key: InventoryKey, adjustment: Adjustment) -> Result<Inventory, MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(key.clone(), InventoryAction::Adjust(adjustment)).await {
            Ok(InventoryActionResult::Adjust(row)) => Ok(row),
            Err(RequestError::Framework(FrameworkError::NotFound(_))) => {
                Err(MarketError::not_found(EntityKind::Inventory, key))
            }
            Err(e) => Err(e.into()),
        }
    }
}
