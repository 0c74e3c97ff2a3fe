//! Proximity and reverse-lookup queries.
//!
//! Every query is a full scan of the relevant collection. Distances come from
//! [`haversine_km`]. None of the operations here write.

use tracing::{debug, info, instrument, warn};

use crate::clients::{ProductClient, ShopClient, UserClient};
use crate::domain::{Product, Shop, ShopView, User};
use crate::error::MarketError;
use crate::geo::haversine_km;

/// Resolves each serviceable product id of `shop`, one lookup at a time.
///
/// # Errors
/// A listed product that does not exist is an [`MarketError::Integrity`]
/// fault; it is never skipped.
#[instrument(skip(products, shop), fields(shop_id = %shop.id))]
pub(crate) async fn resolve_products(products: &ProductClient, shop: &Shop) -> Result<Vec<Product>, MarketError> {
    let mut resolved = Vec::with_capacity(shop.serviceable_products.len());
    for product_id in &shop.serviceable_products {
        match products.get_product(product_id.clone()).await {
            Ok(product) => resolved.push(product),
            Err(e) if e.is_not_found() => {
                return Err(MarketError::Integrity(format!(
                    "shop {} lists missing product {}",
                    shop.id, product_id
                )));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(resolved)
}

/// Builds the externally visible form of `shop`.
pub(crate) async fn hydrate_shop(products: &ProductClient, shop: Shop) -> Result<ShopView, MarketError> {
    let resolved = resolve_products(products, &shop).await?;
    Ok(ShopView::new(shop, resolved))
}

/// Nearest-neighbour, radius and reverse-lookup queries over users and shops.
#[derive(Clone)]
pub struct MatchingEngine {
    users: UserClient,
    shops: ShopClient,
    products: ProductClient,
}

impl MatchingEngine {
    pub fn new(users: UserClient, shops: ShopClient, products: ProductClient) -> Self {
        Self { users, shops, products }
    }

    /// Returns the user closest to `user_id`, excluding the user itself.
    ///
    /// Ties go to the first minimal candidate in scan order, which is
    /// creation order. Candidates whose distance is not finite are skipped.
    ///
    /// # Errors
    /// `NotFound` if `user_id` does not resolve, `EmptyPopulation` if no
    /// other user with a finite distance exists.
    #[instrument(skip(self))]
    pub async fn nearest_neighbour(&self, user_id: String) -> Result<User, MarketError> {
        let target = self.users.get_user(user_id.clone()).await?;
        let population = self.users.list_users().await?;

        let mut nearest: Option<(User, f64)> = None;
        for candidate in population {
            if candidate.id == target.id {
                continue;
            }
            let distance = haversine_km(target.coordinates, candidate.coordinates);
            if !distance.is_finite() {
                warn!(candidate_id = %candidate.id, "Skipping candidate with no finite distance");
                continue;
            }
            // Strict comparison keeps the earliest candidate on ties.
            let closer = match &nearest {
                Some((_, best)) => distance < *best,
                None => true,
            };
            if closer {
                nearest = Some((candidate, distance));
            }
        }

        match nearest {
            Some((user, distance)) => {
                info!(neighbour_id = %user.id, distance_km = distance, "Nearest neighbour found");
                Ok(user)
            }
            None => {
                debug!("No other users to compare against");
                Err(MarketError::EmptyPopulation(user_id))
            }
        }
    }

    /// Shops strictly closer than `max_distance_km` to the user, in scan order.
    ///
    /// An empty result is not an error. A NaN or negative radius matches nothing.
    #[instrument(skip(self))]
    pub async fn shops_within_radius(&self, user_id: String, max_distance_km: f64) -> Result<Vec<ShopView>, MarketError> {
        let user = self.users.get_user(user_id).await?;
        let origin = user.coordinates;
        let nearby = self
            .shops
            .scan_shops(move |shop| haversine_km(origin, shop.coordinates) < max_distance_km)
            .await?;
        debug!(matches = nearby.len(), "Radius scan complete");
        self.hydrate_all(nearby).await
    }

    /// Shops whose serviceable list contains `product_id`. Empty when none do.
    #[instrument(skip(self))]
    pub async fn shops_by_product(&self, product_id: String) -> Result<Vec<ShopView>, MarketError> {
        let carrying = self
            .shops
            .scan_shops(move |shop| shop.serves(&product_id))
            .await?;
        debug!(matches = carrying.len(), "Reverse lookup complete");
        self.hydrate_all(carrying).await
    }

    /// Loads a shop and resolves its serviceable products.
    #[instrument(skip(self))]
    pub async fn shop_view(&self, shop_id: String) -> Result<ShopView, MarketError> {
        let shop = self.shops.get_shop(shop_id).await?;
        hydrate_shop(&self.products, shop).await
    }

    /// The resolved serviceable products of one shop.
    #[instrument(skip(self))]
    pub async fn list_serviceable_products(&self, shop_id: String) -> Result<Vec<Product>, MarketError> {
        let shop = self.shops.get_shop(shop_id).await?;
        resolve_products(&self.products, &shop).await
    }

    async fn hydrate_all(&self, shops: Vec<Shop>) -> Result<Vec<ShopView>, MarketError> {
        let mut views = Vec::with_capacity(shops.len());
        for shop in shops {
            views.push(hydrate_shop(&self.products, shop).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{FrameworkError, ResourceActor};
    use crate::domain::ids::object_id;
    use crate::domain::{ProductCreate, ShopCreate, UserCreate};
    use crate::geo::Coordinates;
    use crate::mock_framework::{create_mock_client, expect_get, expect_list};
    use rust_decimal::Decimal;

    struct Fixture {
        engine: MatchingEngine,
        users: UserClient,
        shops: ShopClient,
        products: ProductClient,
    }

    fn fixture() -> Fixture {
        let (user_actor, users) = ResourceActor::<User>::new(16, object_id);
        let (shop_actor, shops) = ResourceActor::<Shop>::new(16, object_id);
        let (product_actor, products) = ResourceActor::<Product>::new(16, object_id);
        tokio::spawn(user_actor.run());
        tokio::spawn(shop_actor.run());
        tokio::spawn(product_actor.run());

        let users = UserClient::new(users);
        let shops = ShopClient::new(shops);
        let products = ProductClient::new(products);
        Fixture {
            engine: MatchingEngine::new(users.clone(), shops.clone(), products.clone()),
            users,
            shops,
            products,
        }
    }

    async fn user(f: &Fixture, name: &str, lat: f64, lon: f64) -> User {
        f.users.create_user(UserCreate::new(name, "here", lat, lon)).await.unwrap()
    }

    async fn shop(f: &Fixture, name: &str, lat: f64, lon: f64) -> Shop {
        f.shops.create_shop(ShopCreate::new(name, "here", "9-5", lat, lon)).await.unwrap()
    }

    #[tokio::test]
    async fn test_nearest_neighbour_of_each_in_a_triangle() {
        let f = fixture();
        let a = user(&f, "a", 0.0, 0.0).await;
        let b = user(&f, "b", 0.0, 1.0).await;
        let c = user(&f, "c", 0.0, 3.0).await;

        assert_eq!(f.engine.nearest_neighbour(a.id.clone()).await.unwrap().id, b.id);
        assert_eq!(f.engine.nearest_neighbour(b.id.clone()).await.unwrap().id, a.id);
        assert_eq!(f.engine.nearest_neighbour(c.id.clone()).await.unwrap().id, b.id);
    }

    #[tokio::test]
    async fn test_nearest_neighbour_tie_goes_to_first_created() {
        let f = fixture();
        let centre = user(&f, "centre", 0.0, 0.0).await;
        let east = user(&f, "east", 0.0, 1.0).await;
        user(&f, "west", 0.0, -1.0).await;

        assert_eq!(f.engine.nearest_neighbour(centre.id).await.unwrap().id, east.id);
    }

    #[tokio::test]
    async fn test_nearest_neighbour_skips_unmeasurable_candidates() {
        let f = fixture();
        let target = user(&f, "target", 0.08, 0.0).await;
        // Stored directly to bypass creation validation; first candidate in scan order.
        let broken = User {
            id: "broken".into(),
            name: "broken".into(),
            location: "nowhere".into(),
            coordinates: Coordinates::new(f64::NAN, 0.0),
        };
        f.users.save_user(broken).await.unwrap();
        let far = user(&f, "far", -0.08, -180.0).await;
        let near = user(&f, "near", 0.09, 0.0).await;

        assert!(haversine_km(target.coordinates, far.coordinates).is_finite());
        assert_eq!(f.engine.nearest_neighbour(target.id.clone()).await.unwrap().id, near.id);
        // The exact antipode is the farthest point; `near` sits just off it.
        assert_eq!(f.engine.nearest_neighbour(far.id).await.unwrap().id, near.id);
    }

    #[tokio::test]
    async fn test_radius_includes_antipodal_shop() {
        let f = fixture();
        let u = user(&f, "u", 0.08, 0.0).await;
        let antipode = shop(&f, "antipode", -0.08, -180.0).await;

        let found = f.engine.shops_within_radius(u.id, 30_000.0).await.unwrap();
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, [antipode.id.as_str()]);
    }

    #[tokio::test]
    async fn test_nearest_neighbour_needs_a_second_user() {
        let f = fixture();
        let only = user(&f, "only", 10.0, 10.0).await;

        let err = f.engine.nearest_neighbour(only.id.clone()).await.unwrap_err();
        assert_eq!(err, MarketError::EmptyPopulation(only.id));
    }

    #[tokio::test]
    async fn test_nearest_neighbour_unknown_user() {
        let f = fixture();
        user(&f, "a", 0.0, 0.0).await;
        let err = f.engine.nearest_neighbour("missing".into()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_radius_boundary_is_exclusive() {
        let f = fixture();
        let u = user(&f, "u", 0.0, 0.0).await;
        let near = shop(&f, "near", 0.0, 1.0).await;
        let far = shop(&f, "far", 0.0, 2.0).await;

        let exact = haversine_km(u.coordinates, near.coordinates);

        let at_boundary = f.engine.shops_within_radius(u.id.clone(), exact).await.unwrap();
        assert!(at_boundary.is_empty());

        let just_inside = f.engine.shops_within_radius(u.id.clone(), exact + 1e-6).await.unwrap();
        let ids: Vec<_> = just_inside.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, [near.id.as_str()]);

        let everything = f.engine.shops_within_radius(u.id, 1000.0).await.unwrap();
        let ids: Vec<_> = everything.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, [near.id.as_str(), far.id.as_str()]);
    }

    #[tokio::test]
    async fn test_radius_with_no_matches_is_empty() {
        let f = fixture();
        let u = user(&f, "u", 0.0, 0.0).await;
        shop(&f, "far", 45.0, 45.0).await;

        assert!(f.engine.shops_within_radius(u.id.clone(), 1.0).await.unwrap().is_empty());
        assert!(f.engine.shops_within_radius(u.id, f64::NAN).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shops_by_product_hydrates_matches() {
        let f = fixture();
        let keyboard = f
            .products
            .create_product(ProductCreate::new("Keyboard", "Used for typing", Decimal::new(100000, 2)))
            .await
            .unwrap();
        let with = shop(&f, "with", 0.0, 0.0).await;
        shop(&f, "without", 0.0, 0.0).await;
        f.shops.attach_product(with.id.clone(), keyboard.id.clone()).await.unwrap();

        let found = f.engine.shops_by_product(keyboard.id.clone()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, with.id);
        assert_eq!(found[0].serviceable_products, vec![keyboard]);

        assert!(f.engine.shops_by_product("unlisted".into()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_product_is_an_integrity_error() {
        let f = fixture();
        let s = shop(&f, "s", 0.0, 0.0).await;
        f.shops.attach_product(s.id.clone(), "ghost".into()).await.unwrap();

        let err = f.engine.shop_view(s.id.clone()).await.unwrap_err();
        assert!(matches!(err, MarketError::Integrity(_)), "got {err:?}");

        let err = f.engine.list_serviceable_products(s.id).await.unwrap_err();
        assert!(matches!(err, MarketError::Integrity(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_population_scan_failure_is_not_empty_population() {
        let (user_inner, mut user_rx) = create_mock_client::<User>(4);
        let f = fixture();
        let engine = MatchingEngine::new(UserClient::new(user_inner), f.shops.clone(), f.products.clone());
        let task = tokio::spawn(async move { engine.nearest_neighbour("u1".into()).await });

        let (id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        let target = User { id, name: "a".into(), location: "x".into(), coordinates: Coordinates::new(0.0, 0.0) };
        responder.send(Ok(Some(target))).unwrap();

        // The user scan dies without answering.
        let responder = expect_list(&mut user_rx).await.expect("Expected User List");
        drop(responder);

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, MarketError::Storage(FrameworkError::ActorDropped));
    }
}
