use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use pantry_auth_types::identity::{Identity, MaybeIdentity};
use pantry_domain::pagination::{Page, PageRequest};

use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::RecipeResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    IngredientAmountInput, ListRecipesUseCase, RecipeQuery, UpdateRecipeInput,
    UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    #[serde(alias = "quantity")]
    pub amount: i64,
}

impl From<IngredientAmountRequest> for IngredientAmountInput {
    fn from(item: IngredientAmountRequest) -> Self {
        Self {
            id: item.id,
            amount: item.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default, alias = "products")]
    pub ingredients: Vec<IngredientAmountRequest>,
    #[serde(default, alias = "categories")]
    pub tags: Vec<i32>,
    pub image: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(alias = "description")]
    pub text: String,
    #[serde(alias = "prep_time")]
    pub cooking_time: i64,
}

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(alias = "products")]
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    #[serde(alias = "categories")]
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    #[serde(alias = "title")]
    pub name: Option<String>,
    #[serde(alias = "description")]
    pub text: Option<String>,
    #[serde(alias = "prep_time")]
    pub cooking_time: Option<i64>,
}

/// Repeated keys (`tags=a&tags=b`) collect into vectors.
#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    #[serde(alias = "per-page")]
    pub limit: Option<u32>,
    pub page: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<i32>,
    #[serde(alias = "creator")]
    pub author: Option<Uuid>,
    #[serde(alias = "is_bookmarked")]
    pub is_favorited: Option<String>,
    #[serde(alias = "is_in_meal_plan")]
    pub is_in_shopping_cart: Option<String>,
}

fn flag_set(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}

async fn recipe_response(
    state: &AppState,
    viewer: Option<Uuid>,
    recipe_id: i32,
) -> Result<RecipeResponse, ApiError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let view = usecase.execute(viewer, recipe_id).await?;
    Ok(RecipeResponse::new(view, &state.media))
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecipeListQuery>,
) -> Result<Json<Page<RecipeResponse>>, ApiError> {
    let defaults = PageRequest::default();
    let page = PageRequest {
        limit: query.limit.unwrap_or(defaults.limit),
        page: query.page.unwrap_or(defaults.page),
    }
    .clamped();
    let filter = RecipeQuery {
        only_favorited: flag_set(query.is_favorited.as_deref()),
        only_in_shopping_cart: flag_set(query.is_in_shopping_cart.as_deref()),
        tag_slugs: query.tags,
        tag_ids: query.categories,
        author_id: query.author,
    };

    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        collections: state.collection_repo(),
        follows: state.follow_repo(),
    };
    let views = usecase.execute(viewer.user_id(), filter, page).await?;
    Ok(Json(
        views.map(|view| RecipeResponse::new(view, &state.media)),
    ))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    recipe_response(&state, viewer.user_id(), recipe_id)
        .await
        .map(Json)
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.media.clone(),
    };
    let recipe = usecase
        .execute(
            &identity,
            CreateRecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: body.ingredients.into_iter().map(Into::into).collect(),
                tag_ids: body.tags,
            },
        )
        .await?;
    let response = recipe_response(&state, Some(identity.user_id), recipe.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    AppJson(body): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        images: state.media.clone(),
    };
    usecase
        .execute(
            &identity,
            recipe_id,
            UpdateRecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: body
                    .ingredients
                    .map(|items| items.into_iter().map(Into::into).collect()),
                tag_ids: body.tags,
            },
        )
        .await?;
    recipe_response(&state, Some(identity.user_id), recipe_id)
        .await
        .map(Json)
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        images: state.media.clone(),
    };
    usecase.execute(&identity, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::Query;

    use super::*;

    #[test]
    fn should_accept_dish_vocabulary() {
        let body: CreateRecipeRequest = serde_json::from_str(
            r#"{
                "products": [{"id": 3, "quantity": 250}],
                "categories": [1, 2],
                "image": "data:image/png;base64,AAAA",
                "title": "Soup",
                "description": "Boil.",
                "prep_time": 30
            }"#,
        )
        .unwrap();
        assert_eq!(body.ingredients[0].id, 3);
        assert_eq!(body.ingredients[0].amount, 250);
        assert_eq!(body.tags, vec![1, 2]);
        assert_eq!(body.name, "Soup");
        assert_eq!(body.cooking_time, 30);
    }

    #[test]
    fn should_collect_repeated_tag_slugs() {
        let uri: axum::http::Uri = "/api/recipes?tags=breakfast&tags=dinner&is_bookmarked=1&limit=2"
            .parse()
            .unwrap();
        let Query(query) = Query::<RecipeListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.tags, vec!["breakfast", "dinner"]);
        assert!(flag_set(query.is_favorited.as_deref()));
        assert!(!flag_set(query.is_in_shopping_cart.as_deref()));
        assert_eq!(query.limit, Some(2));
    }

    #[test]
    fn should_only_treat_one_and_true_as_set() {
        assert!(flag_set(Some("true")));
        assert!(!flag_set(Some("0")));
        assert!(!flag_set(Some("false")));
        assert!(!flag_set(None));
    }
}
