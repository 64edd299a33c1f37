//! Error type returned by every [`ShopService`](super::ShopService) operation.
//!
//! Each variant corresponds to one kind of response a request layer would send; mapping them
//! to transport status codes is left to that layer.

use crate::auth::{AuthError, Operation};
use crate::model::{OrderId, OrderStatus, ParseStatusError};
use crate::order_actor::OrderError;
use crate::recipe_actor::RecipeError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Role '{role}' may not perform {operation}")]
    Forbidden { role: String, operation: Operation },

    #[error("Not found: {0}")]
    NotFound(String),

    /// A status token that names no known state. Rejected before the state machine runs.
    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    #[error("{order_id} cannot move to {status}")]
    InvalidTransition { order_id: OrderId, status: OrderStatus },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => ServiceError::Unauthorized,
            AuthError::Forbidden { role, operation } => ServiceError::Forbidden { role, operation },
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<ParseStatusError> for ServiceError {
    fn from(e: ParseStatusError) -> Self {
        ServiceError::InvalidStatus(e.0)
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => ServiceError::NotFound(id),
            OrderError::ValidationError(msg) => ServiceError::BadRequest(msg),
            OrderError::ActorCommunicationError(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<UserError> for ServiceError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => ServiceError::NotFound(id),
            UserError::AlreadyExists(username) => ServiceError::Conflict(username),
            UserError::ValidationError(msg) => ServiceError::BadRequest(msg),
            UserError::Order(inner) => inner.into(),
            UserError::ActorCommunicationError(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<RecipeError> for ServiceError {
    fn from(e: RecipeError) -> Self {
        match e {
            RecipeError::NotFound(id) => ServiceError::NotFound(id),
            RecipeError::AlreadyExists(name) => ServiceError::Conflict(name),
            RecipeError::ValidationError(msg) => ServiceError::BadRequest(msg),
            RecipeError::ActorCommunicationError(msg) => ServiceError::Internal(msg),
        }
    }
}
