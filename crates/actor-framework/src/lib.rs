//! # Actor Framework
//!
//! Building blocks for type-safe resource stores backed by Tokio actors. Every resource type
//! (orders, users, recipes, ...) gets one [`ResourceActor`] that owns its entities and
//! processes requests one at a time; callers talk to it through a cloneable
//! [`ResourceClient`].
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain model, create/update hooks and actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - store, id allocation, message processing
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests and error mapping
//!
//! Domain logic is written once on the entity; the runtime handles channels, id allocation,
//! unique keys and queries.
//!
//! ## Store Contract
//!
//! | Request | Result |
//! |---|---|
//! | `create(params)` | fresh id, or [`FrameworkError::Conflict`] when the unique key is taken |
//! | `get(id)` | `Some(entity)` or `None` |
//! | `update(id, update)` | updated entity, or [`FrameworkError::NotFound`] |
//! | `delete(id)` | `()` or [`FrameworkError::NotFound`] |
//! | `perform_action(id, action)` | the action's result |
//! | `query(predicate)` / `list()` | matching entities in id order |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Table { id: u32, name: String, seats: u32 }
//!
//! #[derive(Debug)] struct TableCreate { name: String, seats: u32 }
//! #[derive(Debug)] struct TableUpdate { seats: u32 }
//! #[derive(Debug)] enum TableAction { Occupy(u32) }
//! #[derive(Debug, thiserror::Error)]
//! enum TableError {
//!     #[error("a table needs at least one seat")]
//!     NoSeats,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Table {
//!     type Id = u32;
//!     type Create = TableCreate;
//!     type Update = TableUpdate;
//!     type Action = TableAction;
//!     type ActionResult = bool;
//!     type Context = ();
//!     type Error = TableError;
//!
//!     fn from_create_params(id: u32, params: TableCreate) -> Result<Self, Self::Error> {
//!         if params.seats == 0 {
//!             return Err(TableError::NoSeats);
//!         }
//!         Ok(Self { id, name: params.name, seats: params.seats })
//!     }
//!
//!     fn unique_key(&self) -> Option<String> {
//!         Some(self.name.clone())
//!     }
//!
//!     async fn on_update(&mut self, update: TableUpdate, _: &()) -> Result<(), Self::Error> {
//!         self.seats = update.seats;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: TableAction, _: &()) -> Result<bool, Self::Error> {
//!         let TableAction::Occupy(guests) = action;
//!         Ok(guests <= self.seats)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Table>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TableCreate { name: "window".into(), seats: 2 }).await.unwrap();
//!     assert!(!client.perform_action(id, TableAction::Occupy(3)).await.unwrap());
//!
//!     let dup = client.create(TableCreate { name: "window".into(), seats: 4 }).await;
//!     assert!(matches!(dup, Err(FrameworkError::Conflict(_))));
//!
//!     let big = client.query(|t: &Table| t.seats >= 2).await.unwrap();
//!     assert_eq!(big.len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to `new`, so every actor can be
//! created first and wired afterwards. An entity whose actions must touch another resource
//! declares that resource's client as its `Context`.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests to one actor are processed sequentially, so a check-then-set inside an action
//!   cannot interleave with another request on the same actor
//! - Different actors run in parallel
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`ResourceClient`] from scripted expectations, which
//! lets an entity that depends on another actor be tested in isolation.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
