//! # Order Actor
//!
//! Holds every order and runs the status state machine.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`]: status transitions and staff assignment
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use coffee_queue::model::{OrderStatus, RecipeId, RecipeRef};
//! use coffee_queue::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = order_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let recipe = RecipeRef { id: RecipeId(1), name: "latte".into(), price: 350 };
//!     let id = client.create_order("alice", recipe).await?;
//!
//!     assert!(client.assign_staff(id, Some("bob".into())).await?);
//!     assert!(client.transition(id, OrderStatus::Completed).await?);
//!     assert!(!client.transition(id, OrderStatus::InQueue).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **No dependencies**: Context = ()
//! - **Atomic claims**: the staff check and write happen inside a single request
//! - **Rejections are values**: an illegal transition answers `false`, never an error

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
