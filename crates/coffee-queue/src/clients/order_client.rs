//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>` and exposes the state machine and the order lookups.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, RecipeRef};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    /// Stores a new `IN_QUEUE` order for `customer`.
    #[instrument(skip(self, recipe), fields(recipe = %recipe.name))]
    pub async fn create_order(
        &self,
        customer: &str,
        recipe: RecipeRef,
    ) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let params = OrderCreate {
            customer: customer.to_string(),
            recipe,
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Requests a status change. `Ok(false)` means the state machine rejected it.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, status: OrderStatus) -> Result<bool, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(Self::map_error)
    }

    /// Claims (`Some`) or releases (`None`) the order.
    #[instrument(skip(self))]
    pub async fn assign_staff(
        &self,
        id: OrderId,
        staff: Option<String>,
    ) -> Result<bool, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::AssignStaff(staff))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_customer(&self, customer: &str) -> Result<Vec<Order>, OrderError> {
        let customer = customer.to_string();
        self.inner
            .query(move |order: &Order| order.customer() == customer)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.inner
            .query(move |order: &Order| order.status() == status)
            .await
            .map_err(Self::map_error)
    }

    /// Orders waiting for a staff member.
    pub async fn unclaimed(&self) -> Result<Vec<Order>, OrderError> {
        self.find_by_status(OrderStatus::InQueue).await
    }

    /// Every order, oldest first. Orders created within the same instant keep id order.
    #[instrument(skip(self))]
    pub async fn all_by_timestamp(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.all().await?;
        orders.sort_by_key(|order| (order.created_at(), order.id()));
        Ok(orders)
    }

    /// Sum of recipe prices over completed and picked-up orders. Computed on every call.
    #[instrument(skip(self))]
    pub async fn revenue(&self) -> Result<u64, OrderError> {
        let paid = self
            .inner
            .query(|order: &Order| order.status().is_paid())
            .await
            .map_err(Self::map_error)?;
        let total: u64 = paid.iter().map(|order| u64::from(order.recipe().price)).sum();
        debug!(orders = paid.len(), total, "Revenue computed");
        Ok(total)
    }
}
