//! HTTP handlers and the JSON representations they share.

pub mod auth;
pub mod collection;
pub mod follow;
pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod tag;
pub mod user;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_domain::pagination::PageRequest;

use crate::domain::repository::ImageStore;
use crate::domain::types::{
    Ingredient, ProfileView, Recipe, RecipeView, SubscriptionView, Tag, User,
};
use crate::infra::media::FsImageStore;

// ── Query params ─────────────────────────────────────────────────────────────

/// Pagination plus the subscription preview size.
#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(alias = "per-page")]
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub recipes_limit: Option<u64>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            limit: self.limit.unwrap_or(defaults.limit),
            page: self.page.unwrap_or(defaults.page),
        }
        .clamped()
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub website: String,
    pub location: String,
    pub is_verified: bool,
    pub followers_count: i32,
    pub following_count: i32,
    pub recipes_count: i32,
    pub is_subscribed: bool,
}

impl ProfileResponse {
    pub fn new(user: User, is_subscribed: bool, media: &FsImageStore) -> Self {
        Self {
            id: user.id,
            avatar: user.avatar.as_deref().map(|path| media.url(path)),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            website: user.website,
            location: user.location,
            is_verified: user.is_verified,
            followers_count: user.followers_count,
            following_count: user.following_count,
            recipes_count: user.recipes_count,
            is_subscribed,
        }
    }

    pub fn from_view(view: ProfileView, media: &FsImageStore) -> Self {
        Self::new(view.user, view.is_subscribed, media)
    }
}

/// A followed author with a preview of their recipes.
#[derive(Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub recipes: Vec<RecipeShortResponse>,
}

impl SubscriptionResponse {
    /// `recipes_count` rides on the flattened profile.
    pub fn new(view: SubscriptionView, media: &FsImageStore) -> Self {
        let mut profile = ProfileResponse::new(view.author, true, media);
        profile.recipes_count = view.recipes_count;
        Self {
            profile,
            recipes: view
                .recipes
                .into_iter()
                .map(|r| RecipeShortResponse::new(r, media))
                .collect(),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeShortResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl RecipeShortResponse {
    pub fn new(recipe: Recipe, media: &FsImageStore) -> Self {
        Self {
            id: recipe.id,
            image: media.url(&recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: ProfileResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    #[serde(serialize_with = "pantry_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RecipeResponse {
    pub fn new(view: RecipeView, media: &FsImageStore) -> Self {
        let RecipeView {
            detail,
            is_favorited,
            is_in_shopping_cart,
            author_subscribed,
        } = view;
        let recipe = detail.recipe;
        Self {
            id: recipe.id,
            tags: detail.tags.into_iter().map(TagResponse::from).collect(),
            author: ProfileResponse::new(detail.author, author_subscribed, media),
            ingredients: detail
                .ingredients
                .into_iter()
                .map(|line| RecipeIngredientResponse {
                    id: line.ingredient.id,
                    name: line.ingredient.name,
                    measurement_unit: line.ingredient.measurement_unit,
                    amount: line.amount,
                })
                .collect(),
            is_favorited,
            is_in_shopping_cart,
            image: media.url(&recipe.image),
            name: recipe.name,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
        }
    }
}
