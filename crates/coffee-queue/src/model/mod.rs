//! Domain data types. Each entity stored by an actor lives here; its
//! [`ActorEntity`](actor_framework::ActorEntity) implementation lives in the matching
//! `*_actor` module.

mod audit;
mod order;
mod recipe;
mod status;
mod user;

pub use audit::*;
pub use order::*;
pub use recipe::*;
pub use status::*;
pub use user::*;
