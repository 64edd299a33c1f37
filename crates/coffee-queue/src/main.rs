//! # Coffee Queue Demo
//!
//! Starts the shop from `coffee.toml` (or the path given as the first argument), seeds the
//! default accounts and menu, then walks one order from the counter to pickup:
//!
//! 1. The seeded manager hires `bob`
//! 2. `alice` signs up and orders a latte
//! 3. `bob` claims and fulfills it
//! 4. `alice` picks it up
//!
//! The finished order, with its audit log, is printed as JSON.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p coffee-queue -- crates/coffee-queue/coffee.toml
//! ```

use actor_framework::tracing::setup_tracing;
use anyhow::Context;
use coffee_queue::config::{load_config, ShopConfig};
use coffee_queue::lifecycle::CoffeeShop;
use std::path::PathBuf;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("coffee.toml"));
    let (config, from_file) = if path.exists() {
        let config = load_config(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        (config, true)
    } else {
        (ShopConfig::default(), false)
    };

    setup_tracing(&config.log.level);
    if !from_file {
        warn!(path = %path.display(), "Config file not found, using defaults");
    }

    let shop = CoffeeShop::new(&config)?;
    shop.seed_defaults(&config).await?;
    let service = shop.service().clone();

    let manager = service.authenticate("manager", "manager").await?;
    if service.recipes().await?.is_empty() {
        service.add_recipe(&manager, "latte", 350).await?;
    }
    service.create_staff(&manager, "bob", "brew").await?;
    service.register_customer("alice", "beans").await?;

    let alice = service.authenticate("alice", "beans").await?;
    let bob = service.authenticate("bob", "brew").await?;

    let order_id = async {
        let order_id = service.create_order(&alice, "latte").await?;
        info!(%order_id, "Order placed");
        anyhow::Ok(order_id)
    }
    .instrument(tracing::info_span!("counter"))
    .await?;

    async {
        let queue = service.unclaimed_orders(&bob).await?;
        info!(waiting = queue.len(), "Queue checked");
        anyhow::ensure!(service.claim_order(&bob, order_id).await?, "claim rejected");
        anyhow::ensure!(service.fulfill_order(&bob).await?, "fulfill rejected");
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("bar", staff = %bob.username))
    .await?;

    anyhow::ensure!(
        service.pickup_order(&alice, order_id).await?,
        "pickup rejected"
    );

    let order = service.order(&alice, order_id).await?;
    println!("{}", serde_json::to_string_pretty(&order)?);
    for line in order.log().lines() {
        println!("  {line}");
    }
    info!(revenue = service.revenue(&manager).await?, "Day closed");

    drop(service);
    shop.shutdown().await?;
    Ok(())
}
