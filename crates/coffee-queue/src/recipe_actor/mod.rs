//! # Recipe Actor
//!
//! The menu: priced recipes that orders are placed against. Plain CRUD, no actions.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Recipe`]
//! - [`error`] - [`RecipeError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RecipeClient;
use crate::model::Recipe;
use actor_framework::ResourceActor;

/// Creates a new Recipe actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Recipe>, RecipeClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RecipeClient::new(generic_client))
}
