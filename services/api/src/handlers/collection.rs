use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use pantry_auth_types::identity::Identity;

use crate::domain::types::Collection;
use crate::error::ApiError;
use crate::handlers::RecipeShortResponse;
use crate::state::AppState;
use crate::usecase::collection::{
    AddToCollectionUseCase, ListCollectionUseCase, RemoveFromCollectionUseCase,
};

async fn add(
    state: AppState,
    identity: Identity,
    collection: Collection,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeShortResponse>), ApiError> {
    let usecase = AddToCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    let recipe = usecase
        .execute(collection, identity.user_id, recipe_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeShortResponse::new(recipe, &state.media)),
    ))
}

async fn remove(
    state: AppState,
    identity: Identity,
    collection: Collection,
    recipe_id: i32,
) -> Result<StatusCode, ApiError> {
    let usecase = RemoveFromCollectionUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
    };
    usecase
        .execute(collection, identity.user_id, recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list(
    state: AppState,
    identity: Identity,
    collection: Collection,
) -> Result<Json<Vec<RecipeShortResponse>>, ApiError> {
    let usecase = ListCollectionUseCase {
        collections: state.collection_repo(),
    };
    let recipes = usecase.execute(collection, identity.user_id).await?;
    Ok(Json(
        recipes
            .into_iter()
            .map(|r| RecipeShortResponse::new(r, &state.media))
            .collect(),
    ))
}

// ── /recipes/{id}/favorite ───────────────────────────────────────────────────

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), ApiError> {
    add(state, identity, Collection::Favorites, recipe_id).await
}

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove(state, identity, Collection::Favorites, recipe_id).await
}

pub async fn list_favorites(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeShortResponse>>, ApiError> {
    list(state, identity, Collection::Favorites).await
}

// ── /recipes/{id}/shopping_cart ──────────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), ApiError> {
    add(state, identity, Collection::ShoppingCart, recipe_id).await
}

pub async fn remove_from_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove(state, identity, Collection::ShoppingCart, recipe_id).await
}

pub async fn list_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeShortResponse>>, ApiError> {
    list(state, identity, Collection::ShoppingCart).await
}
