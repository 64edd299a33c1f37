//! Entity trait implementation for the User domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`User`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! The user actor's context is the [`OrderClient`]: every protocol action asks the order
//! actor to change the order first and only then updates the user's own references.
//! The order actor never calls back into the user actor, so awaiting it here cannot deadlock.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::auth::hash_password;
use crate::clients::OrderClient;
use crate::model::{OrderId, OrderStatus, RecipeRef, User, UserCreate, UserId, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, info, warn};

fn validate_username(username: &str) -> Result<(), UserError> {
    if username.is_empty() {
        return Err(UserError::ValidationError(
            "username must not be empty".to_string(),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(UserError::ValidationError(format!(
            "username '{username}' must not contain whitespace"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserError> {
    if password.is_empty() {
        return Err(UserError::ValidationError(
            "password must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = OrderClient;
    type Error = UserError;

    /// Creates a new User, hashing the password.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate_username(&params.username)?;
        validate_password(&params.password)?;
        if params.role.trim().is_empty() {
            return Err(UserError::ValidationError("role must not be empty".to_string()));
        }
        let hash = hash_password(&params.username, &params.password);
        Ok(User::new(id, params.username, hash, params.role))
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `password`: re-hashed
    /// - `locked`: locked accounts cannot authenticate
    /// - `role`
    async fn on_update(
        &mut self,
        update: UserUpdate,
        _orders: &OrderClient,
    ) -> Result<(), Self::Error> {
        if let Some(password) = update.password {
            validate_password(&password)?;
            self.password_hash = hash_password(&self.username, &password);
        }
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }

    /// A staff member removed mid-order hands the order back to the queue.
    async fn on_delete(&self, orders: &OrderClient) -> Result<(), Self::Error> {
        if let Some(order_id) = self.working_order {
            match orders.assign_staff(order_id, None).await {
                Ok(released) => {
                    info!(username = %self.username, %order_id, released, "Working order released on delete")
                }
                Err(e) => {
                    warn!(username = %self.username, %order_id, error = %e, "Could not release working order")
                }
            }
        }
        Ok(())
    }

    /// Handles custom actions for the User entity.
    ///
    /// # Actions
    /// - Staff: `ClaimOrder`, `ReturnCurrentOrderToQueue`, `FulfillCurrentOrder`, `CancelCurrentOrder`
    /// - Customer: `PlaceOrder`, `PickupOrder`, `CancelPlacedOrder`
    /// - Housekeeping: `SyncOrder`
    async fn handle_action(
        &mut self,
        action: UserAction,
        orders: &OrderClient,
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::ClaimOrder(order_id) => self
                .claim_order(order_id, orders)
                .await
                .map(UserActionResult::ClaimOrder),
            UserAction::ReturnCurrentOrderToQueue => Ok(UserActionResult::ReturnCurrentOrderToQueue(
                self.return_current_order(orders).await,
            )),
            UserAction::FulfillCurrentOrder => self
                .fulfill_current_order(orders)
                .await
                .map(UserActionResult::FulfillCurrentOrder),
            UserAction::CancelCurrentOrder => Ok(UserActionResult::CancelCurrentOrder(
                self.cancel_current_order(orders).await,
            )),
            UserAction::PlaceOrder(recipe) => self
                .place_order(recipe, orders)
                .await
                .map(UserActionResult::PlaceOrder),
            UserAction::PickupOrder(order_id) => self
                .pickup_order(order_id, orders)
                .await
                .map(UserActionResult::PickupOrder),
            UserAction::CancelPlacedOrder(order_id) => Ok(UserActionResult::CancelPlacedOrder(
                self.cancel_placed_order(order_id, orders).await,
            )),
            UserAction::SyncOrder { order_id, status } => {
                Ok(UserActionResult::SyncOrder(self.sync_order(order_id, status)))
            }
        }
    }
}

// --- Staff side ---

impl User {
    async fn claim_order(&mut self, order_id: OrderId, orders: &OrderClient) -> Result<bool, UserError> {
        if let Some(current) = self.working_order {
            warn!(username = %self.username, %current, %order_id, "Claim rejected: already working an order");
            return Ok(false);
        }

        let claimed = orders
            .assign_staff(order_id, Some(self.username.clone()))
            .await?;
        if claimed {
            self.working_order = Some(order_id);
            self.order_history.insert(order_id);
            info!(username = %self.username, %order_id, "Order claimed");
        } else {
            warn!(username = %self.username, %order_id, "Claim rejected by order");
        }
        Ok(claimed)
    }

    async fn return_current_order(&mut self, orders: &OrderClient) -> bool {
        let Some(order_id) = self.working_order.take() else {
            debug!(username = %self.username, "No working order to return");
            return false;
        };

        match orders.assign_staff(order_id, None).await {
            Ok(true) => info!(username = %self.username, %order_id, "Order returned to queue"),
            Ok(false) => {
                warn!(username = %self.username, %order_id, "Order refused to return to queue; claim dropped")
            }
            Err(e) => {
                warn!(username = %self.username, %order_id, error = %e, "Release failed; claim dropped")
            }
        }
        true
    }

    async fn fulfill_current_order(&mut self, orders: &OrderClient) -> Result<bool, UserError> {
        let Some(order_id) = self.working_order else {
            debug!(username = %self.username, "No working order to fulfill");
            return Ok(false);
        };

        let completed = orders.transition(order_id, OrderStatus::Completed).await?;
        if completed {
            self.working_order = None;
            info!(username = %self.username, %order_id, "Order fulfilled");
        }
        Ok(completed)
    }

    async fn cancel_current_order(&mut self, orders: &OrderClient) -> bool {
        if let Some(order_id) = self.working_order.take() {
            match orders.transition(order_id, OrderStatus::Cancelled).await {
                Ok(cancelled) => {
                    info!(username = %self.username, %order_id, cancelled, "Working order cancelled")
                }
                Err(e) => warn!(username = %self.username, %order_id, error = %e, "Cancel failed"),
            }
        }
        true
    }
}

// --- Customer side ---

impl User {
    async fn place_order(&mut self, recipe: RecipeRef, orders: &OrderClient) -> Result<OrderId, UserError> {
        let order_id = orders.create_order(&self.username, recipe).await?;
        self.placed_orders.insert(order_id);
        self.order_history.insert(order_id);
        info!(username = %self.username, %order_id, "Order placed");
        Ok(order_id)
    }

    async fn pickup_order(&mut self, order_id: OrderId, orders: &OrderClient) -> Result<bool, UserError> {
        if !self.placed_orders.contains(&order_id) {
            warn!(username = %self.username, %order_id, "Pickup rejected: not a placed order");
            return Ok(false);
        }

        let picked_up = orders.transition(order_id, OrderStatus::PickedUp).await?;
        if picked_up {
            self.placed_orders.remove(&order_id);
            info!(username = %self.username, %order_id, "Order picked up");
        }
        Ok(picked_up)
    }

    async fn cancel_placed_order(&mut self, order_id: OrderId, orders: &OrderClient) -> bool {
        if !self.placed_orders.contains(&order_id) {
            warn!(username = %self.username, %order_id, "Cancel rejected: not a placed order");
            return false;
        }

        match orders.transition(order_id, OrderStatus::Cancelled).await {
            Ok(cancelled) => info!(username = %self.username, %order_id, cancelled, "Placed order cancelled"),
            Err(e) => warn!(username = %self.username, %order_id, error = %e, "Cancel failed"),
        }
        self.placed_orders.remove(&order_id);
        true
    }

    /// Placed orders leave the set once terminal or deleted; a working order is dropped once
    /// it is no longer `IN_PROGRESS`.
    fn sync_order(&mut self, order_id: OrderId, status: Option<OrderStatus>) -> bool {
        let mut changed = false;
        if status.map_or(true, |s| s.is_terminal()) {
            changed |= self.placed_orders.remove(&order_id);
        }
        if status != Some(OrderStatus::InProgress) && self.working_order == Some(order_id) {
            self.working_order = None;
            changed = true;
        }
        if changed {
            debug!(username = %self.username, %order_id, ?status, "References synced");
        }
        changed
    }
}
