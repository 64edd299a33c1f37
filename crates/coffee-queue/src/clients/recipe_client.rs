//! # Recipe Client
//!
//! Provides a high‑level API for interacting with the `Recipe` actor.
//! It wraps a `ResourceClient<Recipe>` and exposes domain‑specific methods.
use crate::model::{Recipe, RecipeCreate, RecipeId, RecipeUpdate};
use crate::recipe_actor::RecipeError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Recipe actor.
#[derive(Clone)]
pub struct RecipeClient {
    inner: ResourceClient<Recipe>,
}

impl RecipeClient {
    pub fn new(inner: ResourceClient<Recipe>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Recipe> for RecipeClient {
    type Error = RecipeError;

    fn inner(&self) -> &ResourceClient<Recipe> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<RecipeError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => RecipeError::NotFound(id),
            FrameworkError::Conflict(name) => RecipeError::AlreadyExists(name),
            other => RecipeError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RecipeClient {
    #[instrument(skip(self))]
    pub async fn create_recipe(&self, name: &str, price: u32) -> Result<RecipeId, RecipeError> {
        debug!("Sending request");
        let params = RecipeCreate {
            name: name.to_string(),
            price,
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_price(&self, id: RecipeId, price: u32) -> Result<Recipe, RecipeError> {
        debug!("Sending request");
        self.inner
            .update(id, RecipeUpdate { price: Some(price) })
            .await
            .map_err(Self::map_error)
    }

    /// Exact name match.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, RecipeError> {
        let name = name.to_string();
        let found = self
            .inner
            .query(move |recipe: &Recipe| recipe.name == name)
            .await
            .map_err(Self::map_error)?;
        Ok(found.into_iter().next())
    }
}
