use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use pantry_auth_types::identity::Identity;
use pantry_domain::pagination::Page;

use crate::error::ApiError;
use crate::extract::AppQuery;
use crate::handlers::{ListQuery, ProfileResponse, SubscriptionResponse};
use crate::state::AppState;
use crate::usecase::follow::{
    FollowUseCase, ListFollowersUseCase, ListSubscriptionsUseCase, UnfollowUseCase,
};

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn follow(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let usecase = FollowUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let view = usecase
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(view, &state.media)),
    ))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unfollow(
    identity: Identity,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = UnfollowUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<SubscriptionResponse>>, ApiError> {
    let usecase = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(identity.user_id, query.page_request(), query.recipes_limit)
        .await?;
    Ok(Json(
        page.map(|view| SubscriptionResponse::new(view, &state.media)),
    ))
}

// ── GET /users/followers ─────────────────────────────────────────────────────

pub async fn followers(
    identity: Identity,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<ProfileResponse>>, ApiError> {
    let usecase = ListFollowersUseCase {
        follows: state.follow_repo(),
    };
    let page = usecase
        .execute(identity.user_id, query.page_request())
        .await?;
    Ok(Json(
        page.map(|view| ProfileResponse::from_view(view, &state.media)),
    ))
}
