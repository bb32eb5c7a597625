use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use pantry_auth_types::identity::Identity;

use crate::domain::types::NewIngredient;
use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::IngredientResponse;
use crate::state::AppState;
use crate::usecase::ingredient::{
    CreateIngredientUseCase, GetIngredientUseCase, ListIngredientsUseCase,
};

#[derive(Deserialize)]
pub struct IngredientListQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<IngredientListQuery>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let usecase = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(
        ingredients.into_iter().map(IngredientResponse::from).collect(),
    ))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    #[serde(alias = "unit")]
    pub measurement_unit: String,
}

pub async fn create_ingredient(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), ApiError> {
    let usecase = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase
        .execute(
            &identity,
            NewIngredient {
                name: body.name,
                measurement_unit: body.measurement_unit,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
