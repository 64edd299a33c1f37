/// A priced drink on the menu.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Recipe`](#impl-ActorEntity-for-Recipe) for details on:
/// - Creation parameters ([`RecipeCreate`])
/// - Update parameters ([`RecipeUpdate`])
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

impl From<u32> for RecipeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recipe_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Price in cents.
    pub price: u32,
}

impl Recipe {
    pub fn new(id: RecipeId, name: impl Into<String>, price: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// The part of the recipe an order keeps.
    pub fn to_ref(&self) -> RecipeRef {
        RecipeRef {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Recipe as it was when an order was placed. Later price changes do not affect the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub id: RecipeId,
    pub name: String,
    pub price: u32,
}

/// Payload for creating a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub price: u32,
}

/// Payload for updating an existing recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub price: Option<u32>,
}
