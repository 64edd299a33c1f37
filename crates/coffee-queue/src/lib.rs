//! # Coffee Queue
//!
//! An order queue for a coffee counter, built on `actor_framework`. Customers order against a
//! priced recipe, staff claim and work orders, and customers pick up or cancel them. Every
//! status change is recorded in the order's audit log.
//!
//! - [`model`]: orders, the status state machine, users and recipes
//! - [`order_actor`], [`user_actor`], [`recipe_actor`]: one actor per resource
//! - [`clients`]: typed wrappers around each actor's `ResourceClient`
//! - [`auth`]: password digests and the configured role table
//! - [`service`]: the authorizing facade every request goes through
//! - [`config`] and [`lifecycle`]: loading configuration, starting, seeding and stopping the shop

pub mod auth;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod recipe_actor;
pub mod service;
pub mod user_actor;
