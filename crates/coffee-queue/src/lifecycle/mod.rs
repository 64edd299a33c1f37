//! # Shop Lifecycle
//!
//! Starting, wiring, seeding and stopping the actors behind a [`ShopService`](crate::service::ShopService).
//!
//! ## Wiring
//!
//! Actors are created first and wired when they are spawned:
//!
//! | Actor | Context |
//! |---|---|
//! | recipe | `()` |
//! | order | `()` |
//! | user | [`OrderClient`](crate::clients::OrderClient) |
//!
//! The dependency graph is acyclic (users call orders, nothing calls users), so closing the
//! channels is enough to stop everything.
//!
//! ## Shutdown
//!
//! 1. Drop the service, which holds the last clients
//! 2. The recipe and user actors see their channels close and exit
//! 3. The user actor drops its order client, so the order actor exits next
//! 4. Every task is awaited; a panicked task is reported as [`LifecycleError::TaskFailed`]
//!
//! Clones of the service kept elsewhere hold the channels open, so drop them before calling
//! [`CoffeeShop::shutdown`].

mod coffee_shop;

pub use coffee_shop::*;

use crate::config::ConfigError;
use crate::service::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Seeding failed: {0}")]
    Seed(#[from] ServiceError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
