use super::LifecycleError;
use crate::auth::RoleTable;
use crate::config::{validate_config, ConfigError, ShopConfig};
use crate::model::UserCreate;
use crate::service::{ServiceError, ShopService};
use crate::{order_actor, recipe_actor, user_actor};
use actor_framework::ActorClient;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running shop: three actors and the service in front of them.
///
/// # Example
///
/// ```rust
/// use coffee_queue::config::ShopConfig;
/// use coffee_queue::lifecycle::CoffeeShop;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ShopConfig::default();
///     let shop = CoffeeShop::new(&config)?;
///     shop.seed_defaults(&config).await?;
///
///     let manager = shop.service().authenticate("manager", "manager").await?;
///     assert_eq!(shop.service().revenue(&manager).await?, 0);
///
///     shop.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct CoffeeShop {
    service: ShopService,
    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl CoffeeShop {
    /// Validates `config`, then spawns the recipe, order and user actors.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &ShopConfig) -> Result<Self, LifecycleError> {
        validate_config(config)?;
        let roles = RoleTable::build(&config.roles)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let buffer_size = config.actors.buffer_size;

        // 1. Create actors (no dependencies yet)
        let (recipe_actor, recipes) = recipe_actor::new(buffer_size);
        let (order_actor, orders) = order_actor::new(buffer_size);
        let (user_actor, users) = user_actor::new(buffer_size);

        // 2. Start actors with their dependencies injected
        let handles = vec![
            tokio::spawn(recipe_actor.run(())),
            tokio::spawn(order_actor.run(())),
            tokio::spawn(user_actor.run(orders.clone())),
        ];

        info!(buffer_size, roles = roles.roles().count(), "Coffee shop started");
        Ok(Self {
            service: ShopService::new(orders, users, recipes, roles),
            handles,
        })
    }

    pub fn service(&self) -> &ShopService {
        &self.service
    }

    /// Process-start initialisation.
    ///
    /// Removes every existing user, creates one user per role that declares a default
    /// password (username = role name), and adds configured recipes that are not on the menu.
    pub async fn seed_defaults(&self, config: &ShopConfig) -> Result<(), LifecycleError> {
        let users = self.service.user_client();
        for user in users.all().await.map_err(ServiceError::from)? {
            users.delete(user.id).await.map_err(ServiceError::from)?;
        }

        for (role, password) in self.service.roles().default_accounts() {
            let id = users
                .create_user(UserCreate {
                    username: role.to_string(),
                    password: password.to_string(),
                    role: role.to_string(),
                })
                .await
                .map_err(ServiceError::from)?;
            info!(%id, role, "Default user seeded");
        }

        let recipes = self.service.recipe_client();
        for recipe in &config.recipes {
            let name = recipe.name.trim();
            if recipes.find_by_name(name).await.map_err(ServiceError::from)?.is_some() {
                continue;
            }
            let id = recipes
                .create_recipe(name, recipe.price)
                .await
                .map_err(ServiceError::from)?;
            info!(%id, name, price = recipe.price, "Recipe seeded");
        }
        Ok(())
    }

    /// Gracefully shuts down the shop.
    ///
    /// Every actor task is awaited; an error lists each task that panicked.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down coffee shop...");

        // Closing the channels stops the actors
        drop(self.service);
        await_actors(self.handles).await?;

        info!("Coffee shop shutdown complete.");
        Ok(())
    }
}

async fn await_actors(handles: Vec<JoinHandle<()>>) -> Result<(), LifecycleError> {
    let mut failures = Vec::new();
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = ?e, "Actor task failed");
            failures.push(e.to_string());
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(LifecycleError::TaskFailed(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failed_task_does_not_skip_the_rest() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let handles = vec![
            tokio::spawn(async { panic!("order actor crashed") }),
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                flag.store(true, Ordering::SeqCst);
            }),
            tokio::spawn(async { panic!("user actor crashed") }),
        ];

        let result = await_actors(handles).await;
        assert!(finished.load(Ordering::SeqCst));
        match result {
            Err(LifecycleError::TaskFailed(msg)) => assert_eq!(msg.matches("panicked").count(), 2),
            other => panic!("expected TaskFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clean_shutdown() {
        let shop = CoffeeShop::new(&ShopConfig::default()).unwrap();
        assert!(shop.shutdown().await.is_ok());
    }
}
