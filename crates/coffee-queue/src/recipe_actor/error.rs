//! Error types for the Recipe actor.

use thiserror::Error;

/// Errors that can occur during recipe operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecipeError {
    /// The requested recipe was not found.
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// A recipe with this name already exists.
    #[error("Recipe already exists: {0}")]
    AlreadyExists(String),

    /// The recipe data provided is invalid.
    #[error("Recipe validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for RecipeError {
    fn from(msg: String) -> Self {
        RecipeError::ActorCommunicationError(msg)
    }
}
