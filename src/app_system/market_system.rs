use std::future::Future;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::app_system::MarketConfig;
use crate::clients::{InventoryClient, ProductClient, ShopClient, UserClient};
use crate::domain::ids::object_id;
use crate::domain::{
    Inventory, Product, ProductCreate, Shop, ShopCreate, ShopView, User, UserCreate,
};
use crate::error::{ErrorClass, MarketError};
use crate::inventory_manager::InventoryManager;
use crate::matching::MatchingEngine;

/// The main application system that owns one actor per collection.
///
/// Responsible for starting the actors, wiring clients into the matching
/// engine and inventory manager, and shutting everything down. Each public
/// operation runs in its own `request` span tagged with a fresh request id.
pub struct MarketSystem {
    users: UserClient,
    shops: ShopClient,
    products: ProductClient,
    matching: MatchingEngine,
    inventory: InventoryManager,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Starts the system with default settings. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&MarketConfig::default())
    }

    pub fn with_config(config: &MarketConfig) -> Self {
        info!(mailbox_capacity = config.mailbox_capacity, "Starting market system");
        let capacity = config.mailbox_capacity;

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(capacity, object_id);
        let (shop_actor, shop_resource_client) = ResourceActor::<Shop>::new(capacity, object_id);
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(capacity, object_id);
        let (inventory_actor, inventory_resource_client) = ResourceActor::<Inventory>::new(capacity, object_id);

        let handles = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(shop_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(inventory_actor.run()),
        ];

        let users = UserClient::new(user_resource_client);
        let shops = ShopClient::new(shop_resource_client);
        let products = ProductClient::new(product_resource_client);
        let inventory_client = InventoryClient::new(inventory_resource_client);

        Self {
            matching: MatchingEngine::new(users.clone(), shops.clone(), products.clone()),
            inventory: InventoryManager::new(shops.clone(), products.clone(), inventory_client),
            users,
            shops,
            products,
            handles,
        }
    }

    /// Runs `work` inside a request span and logs its outcome by error class.
    async fn observe<T, F>(&self, operation: &'static str, work: impl FnOnce() -> F) -> Result<T, MarketError>
    where
        F: Future<Output = Result<T, MarketError>>,
    {
        let request_id = Uuid::new_v4();
        let span = info_span!("request", %request_id, operation);
        async move {
            let started = Instant::now();
            let result = work().await;
            let took_ms = started.elapsed().as_secs_f64() * 1000.0;
            match &result {
                Ok(_) => info!(took_ms, "Request completed"),
                Err(e) => match e.class() {
                    ErrorClass::MissingResource => debug!(took_ms, error = %e, "Request found nothing"),
                    ErrorClass::BadRequest => warn!(took_ms, error = %e, "Request rejected"),
                    ErrorClass::Internal => error!(took_ms, error = %e, "Request failed"),
                },
            }
            result
        }
        .instrument(span)
        .await
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    pub async fn create_user(
        &self,
        name: impl Into<String>,
        location: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<User, MarketError> {
        let params = UserCreate::new(name, location, latitude, longitude);
        self.observe("create_user", || self.users.create_user(params)).await
    }

    pub async fn create_shop(
        &self,
        name: impl Into<String>,
        location: impl Into<String>,
        operation_hours: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Shop, MarketError> {
        let params = ShopCreate::new(name, location, operation_hours, latitude, longitude);
        self.observe("create_shop", || self.shops.create_shop(params)).await
    }

    pub async fn create_product(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Result<Product, MarketError> {
        let params = ProductCreate::new(name, description, price);
        self.observe("create_product", || self.products.create_product(params)).await
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub async fn get_user_by_id(&self, id: impl Into<String>) -> Result<User, MarketError> {
        let id = id.into();
        self.observe("get_user_by_id", || self.users.get_user(id)).await
    }

    pub async fn get_shop_by_id(&self, id: impl Into<String>) -> Result<ShopView, MarketError> {
        let id = id.into();
        self.observe("get_shop_by_id", || self.matching.shop_view(id)).await
    }

    pub async fn get_product_by_id(&self, id: impl Into<String>) -> Result<Product, MarketError> {
        let id = id.into();
        self.observe("get_product_by_id", || self.products.get_product(id)).await
    }

    pub async fn list_serviceable_products(&self, shop_id: impl Into<String>) -> Result<Vec<Product>, MarketError> {
        let shop_id = shop_id.into();
        self.observe("list_serviceable_products", || self.matching.list_serviceable_products(shop_id)).await
    }

    pub async fn get_inventory(
        &self,
        shop_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Result<Inventory, MarketError> {
        let (shop_id, product_id) = (shop_id.into(), product_id.into());
        self.observe("get_inventory", || self.inventory.get_inventory(shop_id, product_id)).await
    }

    // -------------------------------------------------------------------------
    // Inventory consistency
    // -------------------------------------------------------------------------

    pub async fn attach_product(
        &self,
        shop_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Result<ShopView, MarketError> {
        let (shop_id, product_id) = (shop_id.into(), product_id.into());
        self.observe("attach_product", || self.inventory.attach_product(shop_id, product_id)).await
    }

    pub async fn adjust_inventory(
        &self,
        shop_id: impl Into<String>,
        product_id: impl Into<String>,
        delta: u32,
        is_increase: bool,
    ) -> Result<Inventory, MarketError> {
        let (shop_id, product_id) = (shop_id.into(), product_id.into());
        self.observe("adjust_inventory", || {
            self.inventory.adjust_inventory(shop_id, product_id, delta, is_increase)
        })
        .await
    }

    // -------------------------------------------------------------------------
    // Matching
    // -------------------------------------------------------------------------

    pub async fn shops_by_product(&self, product_id: impl Into<String>) -> Result<Vec<ShopView>, MarketError> {
        let product_id = product_id.into();
        self.observe("shops_by_product", || self.matching.shops_by_product(product_id)).await
    }

    pub async fn shops_near_user(
        &self,
        user_id: impl Into<String>,
        max_distance_km: f64,
    ) -> Result<Vec<ShopView>, MarketError> {
        let user_id = user_id.into();
        self.observe("shops_near_user", || self.matching.shops_within_radius(user_id, max_distance_km)).await
    }

    pub async fn nearest_neighbour(&self, user_id: impl Into<String>) -> Result<User, MarketError> {
        let user_id = user_id.into();
        self.observe("nearest_neighbour", || self.matching.nearest_neighbour(user_id)).await
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Drops every client, which closes the mailboxes, then waits for the actors to exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let Self { users, shops, products, matching, inventory, handles } = self;
        drop((users, shops, products, matching, inventory));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for MarketSystem {
    fn default() -> Self {
        Self::new()
    }
}
