//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! Orders have no update payload: after creation they change only through [`OrderAction`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::info;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = bool;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.customer.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "customer must not be empty".to_string(),
            ));
        }
        Ok(Order::new(id, params.customer, params.recipe))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    /// Handles custom actions for the Order entity.
    ///
    /// # Actions
    /// - `Transition`: runs the state machine
    /// - `AssignStaff`: claim or release
    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<bool, Self::Error> {
        let from = self.status();
        let changed = match action {
            OrderAction::Transition(status) => self.transition(status),
            OrderAction::AssignStaff(staff) => self.assign_staff(staff),
        };
        if changed {
            info!(order_id = %self.id(), %from, to = %self.status(), staff = ?self.staff(), "Order transitioned");
        }
        Ok(changed)
    }
}
