//! Entity trait implementation for the Recipe domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Recipe`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! Recipe names are the store's unique key.

use super::error::RecipeError;
use crate::model::{Recipe, RecipeCreate, RecipeId, RecipeUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Recipe {
    type Id = RecipeId;
    type Create = RecipeCreate;
    type Update = RecipeUpdate;
    type Action = std::convert::Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = RecipeError;

    /// Creates a new Recipe from creation parameters.
    fn from_create_params(id: RecipeId, params: RecipeCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(RecipeError::ValidationError(
                "recipe name must not be empty".to_string(),
            ));
        }
        Ok(Recipe::new(id, name, params.price))
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.clone())
    }

    /// Handles updates to the Recipe entity.
    ///
    /// # Fields Updated
    /// - `price`: applies to orders placed afterwards
    async fn on_update(&mut self, update: RecipeUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            self.price = price;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: std::convert::Infallible,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed_and_required() {
        let recipe = Recipe::from_create_params(
            RecipeId(1),
            RecipeCreate {
                name: "  latte ".into(),
                price: 350,
            },
        )
        .unwrap();
        assert_eq!(recipe.name, "latte");
        assert_eq!(recipe.unique_key().as_deref(), Some("latte"));

        let blank = Recipe::from_create_params(
            RecipeId(2),
            RecipeCreate {
                name: " ".into(),
                price: 100,
            },
        );
        assert!(matches!(blank, Err(RecipeError::ValidationError(_))));
    }
}
