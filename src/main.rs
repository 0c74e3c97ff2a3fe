use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use market_directory::{setup_tracing, MarketConfig, MarketSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    let config = MarketConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!("Starting application with market system");
    let system = MarketSystem::with_config(&config);

    let span = tracing::info_span!("seeding");
    let (alice, shop, product) = async {
        let alice = system.create_user("Alice", "Meerut", 28.9845, 77.7064).await?;
        system.create_user("Bob", "Delhi", 28.7041, 77.1025).await?;
        let shop = system.create_shop("VS Computers", "Meerut", "10:00-20:00", 28.9931, 77.7085).await?;
        system.create_shop("Capital Traders", "Delhi", "09:00-21:00", 28.6139, 77.2090).await?;
        let product = system.create_product("Keyboard", "Used for typing", Decimal::new(1000, 0)).await?;
        Ok::<_, market_directory::MarketError>((alice, shop, product))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("inventory");
    let stocked = async {
        system.attach_product(shop.id.clone(), product.id.clone()).await?;
        system.adjust_inventory(shop.id.clone(), product.id.clone(), 12, true).await?;
        system.adjust_inventory(shop.id.clone(), product.id.clone(), 20, false).await
    }
    .instrument(span)
    .await;

    match stocked {
        Ok(row) => info!(quantity = row.quantity, "Inventory updated"),
        Err(e) => info!(error = %e.public_message(), "Inventory update refused as expected"),
    }

    let span = tracing::info_span!("matching");
    let matched = async {
        let neighbour = system.nearest_neighbour(alice.id.clone()).await?;
        info!(neighbour = %neighbour.name, "Nearest neighbour");

        for view in system.shops_near_user(alice.id.clone(), 10.0).await? {
            let json = serde_json::to_string(&view).unwrap_or_default();
            info!(shop = %json, "Shop within 10 km");
        }

        let carrying = system.shops_by_product(product.id.clone()).await?;
        info!(count = carrying.len(), "Shops carrying product");
        Ok::<_, market_directory::MarketError>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = matched {
        error!(error = %e, "Matching failed");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
