//! # Shop Service
//!
//! The request-facing boundary. Every operation takes the authenticated [`Principal`], checks
//! its role against the [`RoleTable`], resolves names and ids, and delegates to the actors.
//!
//! | Operation | Requires | Result |
//! |---|---|---|
//! | `register_customer` | nothing | new user id |
//! | `create_staff` | `create_staff` | new user id |
//! | `create_order` | `place_order` | new order id |
//! | `orders` / `unclaimed_orders` | `view_all_orders` / `view_unclaimed_orders` | orders, oldest first |
//! | `my_orders` | `view_own_orders` | the caller's orders |
//! | `update_order_status` | `update_order_status` | `()` or `InvalidStatus` / `InvalidTransition` |
//! | `claim_order` | `claim_order` | `bool` |
//! | `return_order_to_queue` / `fulfill_order` / `cancel_working_order` | `work_order` | `bool` |
//! | `pickup_order` / `cancel_order` | `pickup_order` / `cancel_own_order` | `bool` |
//! | `delete_order` | `delete_order` | `()` |
//! | `revenue` | `view_revenue` | total in cents |
//! | `customers` / `users` | `view_users` | users |
//! | `delete_user` | `delete_user` | `()` |
//! | `add_recipe` / `update_recipe_price` | `manage_recipes` | recipe |
//!
//! Protocol rejections stay booleans; only absence, conflicts, bad input and
//! authorization failures are errors.
//!
//! Any operation that can move an order out from under another user (a status update, a
//! delete, a cancel from either side) ends by syncing every user still referencing it.

mod error;

pub use error::ServiceError;

use crate::auth::{authenticate_user, Operation, Principal, RoleTable};
use crate::clients::{OrderClient, RecipeClient, UserClient};
use crate::model::{Order, OrderId, OrderStatus, Recipe, RecipeId, User, UserCreate, UserId};
use actor_framework::ActorClient;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Role given to self-registered accounts.
pub const CUSTOMER_ROLE: &str = "customer";
/// Role given to accounts created through [`ShopService::create_staff`].
pub const STAFF_ROLE: &str = "staff";

#[derive(Clone)]
pub struct ShopService {
    orders: OrderClient,
    users: UserClient,
    recipes: RecipeClient,
    roles: Arc<RoleTable>,
}

impl ShopService {
    pub fn new(
        orders: OrderClient,
        users: UserClient,
        recipes: RecipeClient,
        roles: RoleTable,
    ) -> Self {
        Self {
            orders,
            users,
            recipes,
            roles: Arc::new(roles),
        }
    }

    pub fn order_client(&self) -> &OrderClient {
        &self.orders
    }

    pub fn user_client(&self) -> &UserClient {
        &self.users
    }

    pub fn recipe_client(&self) -> &RecipeClient {
        &self.recipes
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    fn authorize(&self, principal: &Principal, operation: Operation) -> Result<(), ServiceError> {
        self.roles.check(&principal.role, operation).map_err(|e| {
            warn!(username = %principal.username, role = %principal.role, %operation, "Forbidden");
            ServiceError::from(e)
        })
    }

    // --- Accounts ---

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Principal, ServiceError> {
        let user = self.users.find_by_username(username).await?;
        let principal = authenticate_user(user.as_ref(), password).map_err(|e| {
            warn!("Login failed");
            ServiceError::from(e)
        })?;
        info!(role = %principal.role, "Login");
        Ok(principal)
    }

    /// Open sign-up for customers.
    #[instrument(skip(self, password))]
    pub async fn register_customer(&self, username: &str, password: &str) -> Result<UserId, ServiceError> {
        self.create_account(username, password, CUSTOMER_ROLE).await
    }

    #[instrument(skip(self, principal, password), fields(by = %principal.username))]
    pub async fn create_staff(
        &self,
        principal: &Principal,
        username: &str,
        password: &str,
    ) -> Result<UserId, ServiceError> {
        self.authorize(principal, Operation::CreateStaff)?;
        self.create_account(username, password, STAFF_ROLE).await
    }

    async fn create_account(&self, username: &str, password: &str, role: &str) -> Result<UserId, ServiceError> {
        if !self.roles.contains(role) {
            return Err(ServiceError::BadRequest(format!("role '{role}' is not configured")));
        }
        let id = self
            .users
            .create_user(UserCreate {
                username: username.to_string(),
                password: password.to_string(),
                role: role.to_string(),
            })
            .await?;
        info!(%id, role, "Account created");
        Ok(id)
    }

    /// The caller's own account record.
    pub async fn account(&self, principal: &Principal) -> Result<User, ServiceError> {
        self.users
            .get(principal.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(principal.user_id.to_string()))
    }

    pub async fn customers(&self, principal: &Principal) -> Result<Vec<User>, ServiceError> {
        self.authorize(principal, Operation::ViewUsers)?;
        Ok(self.users.find_by_role(CUSTOMER_ROLE).await?)
    }

    pub async fn users(&self, principal: &Principal) -> Result<Vec<User>, ServiceError> {
        self.authorize(principal, Operation::ViewUsers)?;
        Ok(self.users.all().await?)
    }

    #[instrument(skip(self, principal), fields(by = %principal.username))]
    pub async fn delete_user(&self, principal: &Principal, id: UserId) -> Result<(), ServiceError> {
        self.authorize(principal, Operation::DeleteUser)?;
        self.users.delete(id).await?;
        info!(%id, "User deleted");
        Ok(())
    }

    // --- Orders ---

    /// Places an order for `recipe_name` on behalf of the calling customer.
    #[instrument(skip(self, principal), fields(customer = %principal.username))]
    pub async fn create_order(&self, principal: &Principal, recipe_name: &str) -> Result<OrderId, ServiceError> {
        self.authorize(principal, Operation::PlaceOrder)?;
        let recipe = self
            .recipes
            .find_by_name(recipe_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {recipe_name}")))?;
        let id = self.users.place_order(principal.user_id, recipe.to_ref()).await?;
        Ok(id)
    }

    /// Every order, oldest first.
    pub async fn orders(&self, principal: &Principal) -> Result<Vec<Order>, ServiceError> {
        self.authorize(principal, Operation::ViewAllOrders)?;
        Ok(self.orders.all_by_timestamp().await?)
    }

    pub async fn order(&self, principal: &Principal, id: OrderId) -> Result<Order, ServiceError> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        if order.customer() != principal.username {
            self.authorize(principal, Operation::ViewAllOrders)?;
        }
        Ok(order)
    }

    pub async fn unclaimed_orders(&self, principal: &Principal) -> Result<Vec<Order>, ServiceError> {
        self.authorize(principal, Operation::ViewUnclaimedOrders)?;
        Ok(self.orders.unclaimed().await?)
    }

    /// Every order the caller placed, including finished ones.
    pub async fn my_orders(&self, principal: &Principal) -> Result<Vec<Order>, ServiceError> {
        self.authorize(principal, Operation::ViewOwnOrders)?;
        Ok(self.orders.find_by_customer(&principal.username).await?)
    }

    /// Sets an order's status directly from an external token such as `"COMPLETED"`.
    ///
    /// The token is parsed before the order is looked at. Users still referencing the order
    /// are brought in line afterwards.
    #[instrument(skip(self, principal), fields(by = %principal.username))]
    pub async fn update_order_status(
        &self,
        principal: &Principal,
        id: OrderId,
        status_token: &str,
    ) -> Result<(), ServiceError> {
        self.authorize(principal, Operation::UpdateOrderStatus)?;
        let status: OrderStatus = status_token.parse()?;

        if !self.orders.transition(id, status).await? {
            return Err(ServiceError::InvalidTransition { order_id: id, status });
        }
        self.sync_holders(id, Some(status)).await?;
        Ok(())
    }

    #[instrument(skip(self, principal), fields(by = %principal.username))]
    pub async fn delete_order(&self, principal: &Principal, id: OrderId) -> Result<(), ServiceError> {
        self.authorize(principal, Operation::DeleteOrder)?;
        self.orders.delete(id).await?;
        self.sync_holders(id, None).await?;
        info!(order_id = %id, "Order deleted");
        Ok(())
    }

    async fn sync_holders(&self, id: OrderId, status: Option<OrderStatus>) -> Result<(), ServiceError> {
        for user in self.users.holding_order(id).await? {
            self.users.sync_order(user.id, id, status).await?;
        }
        Ok(())
    }

    /// Syncs holders with the order's current status, `None` if it is gone.
    async fn resync_holders(&self, id: OrderId) -> Result<(), ServiceError> {
        let status = self.orders.get(id).await?.map(|order| order.status());
        self.sync_holders(id, status).await
    }

    /// Sum of prices of completed and picked-up orders, in cents.
    pub async fn revenue(&self, principal: &Principal) -> Result<u64, ServiceError> {
        self.authorize(principal, Operation::ViewRevenue)?;
        Ok(self.orders.revenue().await?)
    }

    // --- Staff protocol ---

    pub async fn claim_order(&self, principal: &Principal, id: OrderId) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::ClaimOrder)?;
        Ok(self.users.claim_order(principal.user_id, id).await?)
    }

    pub async fn return_order_to_queue(&self, principal: &Principal) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::WorkOrder)?;
        Ok(self.users.return_current_order(principal.user_id).await?)
    }

    pub async fn fulfill_order(&self, principal: &Principal) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::WorkOrder)?;
        Ok(self.users.fulfill_current_order(principal.user_id).await?)
    }

    /// Cancels the caller's working order; the customer who placed it stops waiting for it.
    pub async fn cancel_working_order(&self, principal: &Principal) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::WorkOrder)?;
        let working = self.account(principal).await?.working_order;
        let cancelled = self.users.cancel_current_order(principal.user_id).await?;
        if let Some(order_id) = working {
            self.resync_holders(order_id).await?;
        }
        Ok(cancelled)
    }

    // --- Customer protocol ---

    pub async fn pickup_order(&self, principal: &Principal, id: OrderId) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::PickupOrder)?;
        Ok(self.users.pickup_order(principal.user_id, id).await?)
    }

    /// Cancels one of the caller's placed orders; a staff member working it loses the claim.
    pub async fn cancel_order(&self, principal: &Principal, id: OrderId) -> Result<bool, ServiceError> {
        self.authorize(principal, Operation::CancelOwnOrder)?;
        let cancelled = self.users.cancel_placed_order(principal.user_id, id).await?;
        if cancelled {
            self.resync_holders(id).await?;
        }
        Ok(cancelled)
    }

    // --- Recipes ---

    /// The menu. Open to everyone.
    pub async fn recipes(&self) -> Result<Vec<Recipe>, ServiceError> {
        Ok(self.recipes.all().await?)
    }

    #[instrument(skip(self, principal), fields(by = %principal.username))]
    pub async fn add_recipe(&self, principal: &Principal, name: &str, price: u32) -> Result<RecipeId, ServiceError> {
        self.authorize(principal, Operation::ManageRecipes)?;
        Ok(self.recipes.create_recipe(name, price).await?)
    }

    /// New price applies to orders placed afterwards.
    #[instrument(skip(self, principal), fields(by = %principal.username))]
    pub async fn update_recipe_price(
        &self,
        principal: &Principal,
        name: &str,
        price: u32,
    ) -> Result<Recipe, ServiceError> {
        self.authorize(principal, Operation::ManageRecipes)?;
        let recipe = self
            .recipes
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {name}")))?;
        Ok(self.recipes.update_price(recipe.id, price).await?)
    }
}
