use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, RequestError, ResourceClient};
use crate::domain::Shop;
use crate::error::{EntityKind, MarketError};
use crate::shop_actor::{ShopAction, ShopActionResult};

/// Client for interacting with the Shop actor.
#[derive(Clone)]
pub struct ShopClient {
    inner: ResourceClient<Shop>,
}

impl_basic_client!(ShopClient, Shop, EntityKind::Shop, shop);

impl ShopClient {
    /// Adds `product_id` to the shop's serviceable list in one atomic step.
    ///
    /// Returns the stored shop and whether the list changed.
    #[instrument(skip(self))]
    pub async fn attach_product(&self, shop_id: String, product_id: String) -> Result<(Shop, bool), MarketError> {
        debug!("Sending request");
        match self.inner.perform_action(shop_id.clone(), ShopAction::AttachProduct(product_id)).await {
            Ok(ShopActionResult::AttachProduct { shop, changed }) => Ok((shop, changed)),
            Err(RequestError::Framework(FrameworkError::NotFound(_))) => {
                Err(MarketError::not_found(EntityKind::Shop, shop_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
