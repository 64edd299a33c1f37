//! Typed clients, one per actor. Each wraps a `ResourceClient` and maps framework errors to
//! the actor's own error type.

mod order_client;
mod recipe_client;
mod user_client;

pub use order_client::OrderClient;
pub use recipe_client::RecipeClient;
pub use user_client::UserClient;
