use crate::actor_framework::ResourceClient;
use crate::domain::Product;
use crate::error::EntityKind;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, EntityKind::Product, product);
