use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_auth_types::identity::{Identity, MaybeIdentity};
use pantry_domain::pagination::Page;

use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::handlers::{ListQuery, ProfileResponse, RecipeShortResponse};
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, GetProfileUseCase, ListAuthorRecipesUseCase, ListUsersUseCase,
    RegisterUserInput, RegisterUserUseCase, SetPasswordUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<ProfileResponse>>, ApiError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let page = usecase
        .execute(viewer.user_id(), query.page_request())
        .await?;
    Ok(Json(
        page.map(|view| ProfileResponse::from_view(view, &state.media)),
    ))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: Option<String>,
}

#[derive(Serialize)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
            password_confirm: body.password_confirm,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

// ── GET /users/me, GET /users/{id} ───────────────────────────────────────────

async fn profile(
    state: &AppState,
    viewer: Option<Uuid>,
    user_id: Uuid,
) -> Result<ProfileResponse, ApiError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let view = usecase.execute(viewer, user_id).await?;
    Ok(ProfileResponse::from_view(view, &state.media))
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    profile(&state, Some(identity.user_id), identity.user_id)
        .await
        .map(Json)
}

pub async fn get_user(
    viewer: MaybeIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    profile(&state, viewer.user_id(), user_id).await.map(Json)
}

// ── PATCH /users/me, PATCH /users/{id} ───────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
}

async fn update_profile(
    state: &AppState,
    identity: &Identity,
    user_id: Uuid,
    body: UpdateProfileRequest,
) -> Result<ProfileResponse, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        images: state.media.clone(),
    };
    usecase
        .execute(
            identity,
            user_id,
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
                bio: body.bio,
                website: body.website,
                location: body.location,
                avatar: body.avatar,
            },
        )
        .await?;
    profile(state, Some(identity.user_id), user_id).await
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    update_profile(&state, &identity, identity.user_id, body)
        .await
        .map(Json)
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppJson(body): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    update_profile(&state, &identity, user_id, body)
        .await
        .map(Json)
}

// ── POST /users/set_password ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<SetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = SetPasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(identity.user_id, &body.current_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&identity, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/recipes ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuthorRecipesResponse {
    pub id: Uuid,
    pub username: String,
    pub recipes: Vec<RecipeShortResponse>,
}

pub async fn author_recipes(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<AuthorRecipesResponse>, ApiError> {
    let usecase = ListAuthorRecipesUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let (author, recipes) = usecase.execute(author_id, query.recipes_limit).await?;
    Ok(Json(AuthorRecipesResponse {
        id: author.id,
        username: author.username,
        recipes: recipes
            .into_iter()
            .map(|r| RecipeShortResponse::new(r, &state.media))
            .collect(),
    }))
}
