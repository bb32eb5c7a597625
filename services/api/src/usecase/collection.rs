//! Favorites and shopping cart membership.

use uuid::Uuid;

use crate::domain::repository::{CollectionRepository, RecipeRepository};
use crate::domain::types::{Collection, Recipe};
use crate::error::ApiError;

// ── AddToCollection ──────────────────────────────────────────────────────────

pub struct AddToCollectionUseCase<R: RecipeRepository, C: CollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: CollectionRepository> AddToCollectionUseCase<R, C> {
    /// Returns the added recipe for the short response body.
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<Recipe, ApiError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if !self.collections.add(collection, user_id, recipe.id).await? {
            return Err(ApiError::AlreadyInCollection(collection));
        }
        tracing::debug!(%collection, %user_id, recipe_id, "recipe added");
        Ok(recipe)
    }
}

// ── RemoveFromCollection ─────────────────────────────────────────────────────

pub struct RemoveFromCollectionUseCase<R: RecipeRepository, C: CollectionRepository> {
    pub recipes: R,
    pub collections: C,
}

impl<R: RecipeRepository, C: CollectionRepository> RemoveFromCollectionUseCase<R, C> {
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), ApiError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(ApiError::RecipeNotFound);
        }
        if !self.collections.remove(collection, user_id, recipe_id).await? {
            return Err(ApiError::NotInCollection(collection));
        }
        Ok(())
    }
}

// ── ListCollection ───────────────────────────────────────────────────────────

pub struct ListCollectionUseCase<C: CollectionRepository> {
    pub collections: C,
}

impl<C: CollectionRepository> ListCollectionUseCase<C> {
    pub async fn execute(
        &self,
        collection: Collection,
        user_id: Uuid,
    ) -> Result<Vec<Recipe>, ApiError> {
        self.collections.list(collection, user_id).await
    }
}
