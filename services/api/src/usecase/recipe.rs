use std::collections::HashSet;

use uuid::Uuid;

use pantry_auth_types::identity::Identity;
use pantry_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    CollectionRepository, FollowRepository, ImageStore, IngredientRepository, RecipeRepository,
    TagRepository,
};
use crate::domain::types::{
    Collection, IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeDetail, RecipeFilter,
    RecipeView,
};
use crate::error::ApiError;
use crate::usecase::{ensure_owner_or_admin, required};

/// Media folder recipe images are stored under.
const RECIPE_IMAGE_FOLDER: &str = "recipes";

/// Ingredient line as submitted, before range checks.
#[derive(Debug, Clone, Copy)]
pub struct IngredientAmountInput {
    pub id: i32,
    pub amount: i64,
}

fn validate_ingredients(items: &[IngredientAmountInput]) -> Result<Vec<IngredientAmount>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::EmptyIngredients);
    }
    let mut seen = HashSet::with_capacity(items.len());
    let mut validated = Vec::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ApiError::DuplicateIngredients);
        }
        let amount = i32::try_from(item.amount)
            .ok()
            .filter(|a| *a >= 1)
            .ok_or(ApiError::InvalidAmount)?;
        validated.push(IngredientAmount {
            ingredient_id: item.id,
            amount,
        });
    }
    Ok(validated)
}

fn validate_tags(tag_ids: &[i32]) -> Result<(), ApiError> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    if tag_ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(ApiError::DuplicateTags)
    }
}

fn validate_cooking_time(minutes: i64) -> Result<i32, ApiError> {
    i32::try_from(minutes)
        .ok()
        .filter(|m| *m >= 1)
        .ok_or(ApiError::InvalidCookingTime)
}

/// Fail with the first referenced tag or ingredient that does not exist.
async fn ensure_references<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    tag_ids: Option<&[i32]>,
    items: Option<&[IngredientAmount]>,
) -> Result<(), ApiError> {
    if let Some(items) = items {
        let ids: Vec<i32> = items.iter().map(|i| i.ingredient_id).collect();
        let existing = ingredients.existing_ids(&ids).await?;
        if let Some(missing) = ids.iter().find(|id| !existing.contains(id)) {
            return Err(ApiError::UnknownIngredient(*missing));
        }
    }
    if let Some(tag_ids) = tag_ids {
        let existing = tags.existing_ids(tag_ids).await?;
        if let Some(missing) = tag_ids.iter().find(|id| !existing.contains(id)) {
            return Err(ApiError::UnknownTag(*missing));
        }
    }
    Ok(())
}

/// Attach per-viewer flags to loaded recipes.
async fn recipe_views<C: CollectionRepository, F: FollowRepository>(
    collections: &C,
    follows: &F,
    viewer: Option<Uuid>,
    details: Vec<RecipeDetail>,
) -> Result<Vec<RecipeView>, ApiError> {
    let (favorited, in_cart, followed) = match viewer {
        Some(viewer) => {
            let ids: Vec<i32> = details.iter().map(|d| d.recipe.id).collect();
            let authors: Vec<Uuid> = details.iter().map(|d| d.author.id).collect();
            (
                collections
                    .contained_among(Collection::Favorites, viewer, &ids)
                    .await?,
                collections
                    .contained_among(Collection::ShoppingCart, viewer, &ids)
                    .await?,
                follows.followed_among(viewer, &authors).await?,
            )
        }
        None => (Vec::new(), Vec::new(), Vec::new()),
    };
    Ok(details
        .into_iter()
        .map(|detail| RecipeView {
            is_favorited: favorited.contains(&detail.recipe.id),
            is_in_shopping_cart: in_cart.contains(&detail.recipe.id),
            author_subscribed: followed.contains(&detail.author.id),
            detail,
        })
        .collect())
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    /// Base64 image data URL.
    pub image: String,
    pub ingredients: Vec<IngredientAmountInput>,
    pub tag_ids: Vec<i32>,
}

pub struct CreateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R, T, I, S> CreateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        author: &Identity,
        input: CreateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let ingredients = validate_ingredients(&input.ingredients)?;
        validate_tags(&input.tag_ids)?;
        let cooking_time = validate_cooking_time(input.cooking_time)?;
        let name = required(&input.name, "name")?;
        let text = required(&input.text, "text")?;
        if input.image.trim().is_empty() {
            return Err(ApiError::InvalidImage);
        }

        ensure_references(
            &self.tags,
            &self.ingredients,
            Some(input.tag_ids.as_slice()),
            Some(ingredients.as_slice()),
        )
        .await?;
        if self.recipes.name_taken(author.user_id, &name, None).await? {
            return Err(ApiError::RecipeAlreadyExists);
        }

        let image = self.images.save(&input.image, RECIPE_IMAGE_FOLDER).await?;
        let created = self
            .recipes
            .create(&NewRecipe {
                author_id: author.user_id,
                name,
                text,
                cooking_time,
                image: image.clone(),
                ingredients,
                tag_ids: input.tag_ids,
            })
            .await;
        let recipe = match created {
            Ok(recipe) => recipe,
            Err(e) => {
                self.images.remove(&image).await;
                return Err(e);
            }
        };
        tracing::info!(recipe_id = recipe.id, author_id = %author.user_id, "recipe created");
        Ok(recipe)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<IngredientAmountInput>>,
    pub tag_ids: Option<Vec<i32>>,
}

pub struct UpdateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub images: S,
}

impl<R, T, I, S> UpdateRecipeUseCase<R, T, I, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        actor: &Identity,
        recipe_id: i32,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let ingredients = input
            .ingredients
            .as_deref()
            .map(validate_ingredients)
            .transpose()?;
        if let Some(ref tag_ids) = input.tag_ids {
            validate_tags(tag_ids)?;
        }
        let cooking_time = input.cooking_time.map(validate_cooking_time).transpose()?;
        let name = input
            .name
            .as_deref()
            .map(|v| required(v, "name"))
            .transpose()?;
        let text = input
            .text
            .as_deref()
            .map(|v| required(v, "text"))
            .transpose()?;
        let has_changes = ingredients.is_some()
            || input.tag_ids.is_some()
            || cooking_time.is_some()
            || name.is_some()
            || text.is_some()
            || input.image.is_some();
        if !has_changes {
            return Err(ApiError::MissingData);
        }

        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        ensure_owner_or_admin(recipe.author_id, actor)?;

        ensure_references(
            &self.tags,
            &self.ingredients,
            input.tag_ids.as_deref(),
            ingredients.as_deref(),
        )
        .await?;
        if let Some(ref name) = name {
            if self
                .recipes
                .name_taken(recipe.author_id, name, Some(recipe.id))
                .await?
            {
                return Err(ApiError::RecipeAlreadyExists);
            }
        }

        let image = match input.image {
            Some(ref data_url) => Some(self.images.save(data_url, RECIPE_IMAGE_FOLDER).await?),
            None => None,
        };
        let updated = self
            .recipes
            .update(
                recipe.id,
                &RecipeChanges {
                    name,
                    text,
                    cooking_time,
                    image: image.clone(),
                    ingredients,
                    tag_ids: input.tag_ids,
                },
            )
            .await;
        // Exactly one of the two images is still referenced.
        if let Some(new_image) = image {
            let stale = if updated.is_ok() {
                &recipe.image
            } else {
                &new_image
            };
            self.images.remove(stale).await;
        }
        updated
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, S: ImageStore> {
    pub recipes: R,
    pub images: S,
}

impl<R: RecipeRepository, S: ImageStore> DeleteRecipeUseCase<R, S> {
    pub async fn execute(&self, actor: &Identity, recipe_id: i32) -> Result<(), ApiError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        ensure_owner_or_admin(recipe.author_id, actor)?;
        self.recipes.delete(&recipe).await?;
        self.images.remove(&recipe.image).await;
        tracing::info!(recipe_id, deleted_by = %actor.user_id, "recipe deleted");
        Ok(())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, C, F>
where
    R: RecipeRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub recipes: R,
    pub collections: C,
    pub follows: F,
}

impl<R, C, F> GetRecipeUseCase<R, C, F>
where
    R: RecipeRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        recipe_id: i32,
    ) -> Result<RecipeView, ApiError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        let details = self.recipes.load_details(vec![recipe]).await?;
        recipe_views(&self.collections, &self.follows, viewer, details)
            .await?
            .pop()
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Recipe list query. The collection flags only apply to authenticated viewers.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub tag_slugs: Vec<String>,
    pub tag_ids: Vec<i32>,
    pub author_id: Option<Uuid>,
    pub only_favorited: bool,
    pub only_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R, C, F>
where
    R: RecipeRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub recipes: R,
    pub collections: C,
    pub follows: F,
}

impl<R, C, F> ListRecipesUseCase<R, C, F>
where
    R: RecipeRepository,
    C: CollectionRepository,
    F: FollowRepository,
{
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        query: RecipeQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, ApiError> {
        let filter = RecipeFilter {
            tag_slugs: query.tag_slugs,
            tag_ids: query.tag_ids,
            author_id: query.author_id,
            favorited_by: viewer.filter(|_| query.only_favorited),
            in_cart_of: viewer.filter(|_| query.only_in_shopping_cart),
        };
        let Page { count, results } = self.recipes.list(&filter, page).await?;
        let details = self.recipes.load_details(results).await?;
        let views = recipe_views(&self.collections, &self.follows, viewer, details).await?;
        Ok(Page::new(count, views))
    }
}
