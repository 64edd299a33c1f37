//! # User Actor
//!
//! Holds every account and runs the ownership protocols on top of the order state machine.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`actions`] - [`UserAction`] and [`UserActionResult`] for the claim and placement protocols
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! The user actor depends on the order actor, so the [`OrderClient`](crate::clients::OrderClient)
//! is injected as its context:
//!
//! ```rust
//! use coffee_queue::model::{OrderStatus, RecipeId, RecipeRef, UserCreate};
//! use coffee_queue::{order_actor, user_actor};
//! use actor_framework::ActorClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (order_actor, orders) = order_actor::new(32);
//!     let (user_actor, users) = user_actor::new(32);
//!     tokio::spawn(order_actor.run(()));
//!     tokio::spawn(user_actor.run(orders.clone()));
//!
//!     let alice = users.create_user(UserCreate {
//!         username: "alice".into(),
//!         password: "pw".into(),
//!         role: "customer".into(),
//!     }).await?;
//!     let latte = RecipeRef { id: RecipeId(1), name: "latte".into(), price: 350 };
//!     let order_id = users.place_order(alice, latte).await?;
//!
//!     let order = orders.get(order_id).await?.expect("stored");
//!     assert_eq!(order.status(), OrderStatus::InQueue);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Ids, not copies**: users keep order ids; the order actor owns the orders
//! - **Order first, bookkeeping second**: a user's references change only after the order
//!   actor answers

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
