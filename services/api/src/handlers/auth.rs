use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use pantry_auth_types::{
    cookie::{clear_token_cookie, set_token_cookie},
    identity::Identity,
};

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::usecase::auth::LoginUseCase;

// ── POST /auth/token/login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl: state.token_ttl,
    };
    let issued = usecase.execute(&body.email, &body.password).await?;

    let jar = set_token_cookie(
        jar,
        issued.token.clone(),
        state.cookie_domain.clone(),
        state.token_ttl,
    );
    Ok((
        jar,
        Json(LoginResponse {
            auth_token: issued.token,
        }),
    ))
}

// ── POST /auth/token/logout ──────────────────────────────────────────────────

/// Drops the session cookie.
///
/// Tokens are stateless JWTs with no server-side session to destroy: a token
/// sent in `Authorization` stays valid until its `exp`. `TOKEN_TTL_SECS`
/// bounds that window.
pub async fn logout(
    _identity: Identity,
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    (
        clear_token_cookie(jar, state.cookie_domain.clone()),
        StatusCode::NO_CONTENT,
    )
}
