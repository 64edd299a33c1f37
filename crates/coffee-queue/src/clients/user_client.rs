//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes account lookups and the ownership protocols.
use crate::model::{OrderId, OrderStatus, RecipeRef, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use actor_framework::ActorClient;
use actor_framework::{FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<UserError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Conflict(username) => UserError::AlreadyExists(username),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Exact, case-sensitive username match.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let username = username.to_string();
        let found = self
            .inner
            .query(move |user: &User| user.username == username)
            .await
            .map_err(Self::map_error)?;
        Ok(found.into_iter().next())
    }

    /// Users whose role contains `fragment`, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_role(&self, fragment: &str) -> Result<Vec<User>, UserError> {
        let fragment = fragment.to_string();
        self.inner
            .query(move |user: &User| user.role_contains(&fragment))
            .await
            .map_err(Self::map_error)
    }

    /// Users that still reference `order_id` as placed or working.
    pub async fn holding_order(&self, order_id: OrderId) -> Result<Vec<User>, UserError> {
        self.inner
            .query(move |user: &User| {
                user.working_order == Some(order_id) || user.placed_orders.contains(&order_id)
            })
            .await
            .map_err(Self::map_error)
    }

    async fn act(&self, id: UserId, action: UserAction) -> Result<UserActionResult, UserError> {
        debug!(%id, ?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    // --- Staff side ---

    #[instrument(skip(self))]
    pub async fn claim_order(&self, id: UserId, order_id: OrderId) -> Result<bool, UserError> {
        match self.act(id, UserAction::ClaimOrder(order_id)).await? {
            UserActionResult::ClaimOrder(claimed) => Ok(claimed),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn return_current_order(&self, id: UserId) -> Result<bool, UserError> {
        match self.act(id, UserAction::ReturnCurrentOrderToQueue).await? {
            UserActionResult::ReturnCurrentOrderToQueue(returned) => Ok(returned),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn fulfill_current_order(&self, id: UserId) -> Result<bool, UserError> {
        match self.act(id, UserAction::FulfillCurrentOrder).await? {
            UserActionResult::FulfillCurrentOrder(done) => Ok(done),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_current_order(&self, id: UserId) -> Result<bool, UserError> {
        match self.act(id, UserAction::CancelCurrentOrder).await? {
            UserActionResult::CancelCurrentOrder(cancelled) => Ok(cancelled),
            other => Err(unexpected(other)),
        }
    }

    // --- Customer side ---

    #[instrument(skip(self, recipe), fields(recipe = %recipe.name))]
    pub async fn place_order(&self, id: UserId, recipe: RecipeRef) -> Result<OrderId, UserError> {
        match self.act(id, UserAction::PlaceOrder(recipe)).await? {
            UserActionResult::PlaceOrder(order_id) => Ok(order_id),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn pickup_order(&self, id: UserId, order_id: OrderId) -> Result<bool, UserError> {
        match self.act(id, UserAction::PickupOrder(order_id)).await? {
            UserActionResult::PickupOrder(picked_up) => Ok(picked_up),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_placed_order(&self, id: UserId, order_id: OrderId) -> Result<bool, UserError> {
        match self.act(id, UserAction::CancelPlacedOrder(order_id)).await? {
            UserActionResult::CancelPlacedOrder(cancelled) => Ok(cancelled),
            other => Err(unexpected(other)),
        }
    }

    /// `status` is the order's new status, or `None` if it was deleted.
    #[instrument(skip(self))]
    pub async fn sync_order(
        &self,
        id: UserId,
        order_id: OrderId,
        status: Option<OrderStatus>,
    ) -> Result<bool, UserError> {
        match self.act(id, UserAction::SyncOrder { order_id, status }).await? {
            UserActionResult::SyncOrder(changed) => Ok(changed),
            other => Err(unexpected(other)),
        }
    }
}
