#![allow(async_fn_in_trait)]

use uuid::Uuid;

use pantry_domain::pagination::{Page, PageRequest};
use pantry_domain::shopping_list::ShoppingListItem;

use crate::domain::types::{
    Collection, Ingredient, NewIngredient, NewRecipe, NewTag, ProfilePatch, Recipe,
    RecipeChanges, RecipeDetail, RecipeFilter, Tag, User,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, ApiError>;
    /// Insert a new user. A uniqueness race surfaces as `UserAlreadyExists`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError>;
    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<User, ApiError>;
    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;
    /// Delete the user, adjusting the follow counters of everyone they were linked to.
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Repository for follow edges and their denormalized counters.
pub trait FollowRepository: Send + Sync {
    /// Insert `user_id → author_id`. Returns `false` if the edge already existed.
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError>;
    /// Remove `user_id → author_id`. Returns `false` if there was no edge.
    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError>;
    /// Authors `user_id` follows.
    async fn following(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError>;
    /// Users following `user_id`.
    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError>;
    /// Subset of `author_ids` that `user_id` follows.
    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError>;
}

pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError>;
    /// Insert a tag. Any uniqueness conflict surfaces as `TagAlreadyExists`.
    async fn create(&self, tag: &NewTag) -> Result<Tag, ApiError>;
    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name, optionally filtered by a case-insensitive name prefix.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError>;
    /// Insert an ingredient. A `(name, unit)` conflict surfaces as `IngredientAlreadyExists`.
    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ApiError>;
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError>;
}

pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError>;
    /// Newest-first page of recipes matching `filter`.
    async fn list(&self, filter: &RecipeFilter, page: PageRequest)
    -> Result<Page<Recipe>, ApiError>;
    /// Newest-first recipes of one author, at most `limit` when given.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError>;
    /// Load author, tags and ingredients for each recipe, preserving order.
    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetail>, ApiError>;
    /// Whether `author_id` already has a recipe called `name`, ignoring `except_id`.
    async fn name_taken(
        &self,
        author_id: Uuid,
        name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, ApiError>;
    /// Insert the recipe with its ingredients and tags and bump the author's count.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError>;
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, ApiError>;
    /// Delete the recipe and decrement the author's count.
    async fn delete(&self, recipe: &Recipe) -> Result<(), ApiError>;
}

/// Favorites and shopping cart entries.
pub trait CollectionRepository: Send + Sync {
    /// Returns `false` if the recipe was already in the collection.
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError>;
    /// Returns `false` if the recipe was not in the collection.
    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError>;
    /// Recipes in the collection, most recently added first.
    async fn list(&self, collection: Collection, user_id: Uuid) -> Result<Vec<Recipe>, ApiError>;
    /// Subset of `recipe_ids` in the collection.
    async fn contained_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError>;
}

pub trait ShoppingListRepository: Send + Sync {
    /// One line per ingredient of every recipe in the user's cart, unsummed.
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<ShoppingListItem>, ApiError>;
}

/// Storage for uploaded images.
pub trait ImageStore: Send + Sync {
    /// Decode a `data:image/<ext>;base64,<payload>` URL and store it under `folder`.
    /// Returns the stored media path.
    async fn save(&self, data_url: &str, folder: &str) -> Result<String, ApiError>;
    /// Delete a stored media path. Failures are logged, not returned.
    async fn remove(&self, path: &str);
    /// Public URL of a stored media path.
    fn url(&self, path: &str) -> String;
}
