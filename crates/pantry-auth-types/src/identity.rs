//! Token-backed identity extractors.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use pantry_domain::user::UserRole;
use uuid::Uuid;

use crate::cookie::PANTRY_TOKEN;
use crate::token::validate_token;

/// HMAC secret the extractors validate tokens against.
///
/// Exposed to the extractors through `FromRef`, so any router state holding one works.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Authenticated caller.
///
/// The token is read from `Authorization: Token <t>` / `Authorization: Bearer <t>`,
/// falling back to the `pantry_token` cookie. Returns 401 if the token is absent
/// or fails validation. Permission checks (403) are done by use cases.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

/// Optional caller for endpoints open to anonymous users.
///
/// `None` when no token is supplied. A supplied but invalid token is still 401.
#[derive(Debug, Clone, Copy)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|identity| identity.user_id)
    }
}

fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let token = value
            .strip_prefix("Token ")
            .or_else(|| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = token {
            return Some(token.to_owned());
        }
    }

    CookieJar::from_headers(&parts.headers)
        .get(PANTRY_TOKEN)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

fn resolve(token: &str, secret: &JwtSecret) -> Result<Identity, StatusCode> {
    let info = validate_token(token, &secret.0).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_role = UserRole::from_u8(info.user_role).ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Identity {
        user_id: info.user_id,
        user_role,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; resolve synchronously
    // and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = token_from_parts(parts)
            .ok_or(StatusCode::UNAUTHORIZED)
            .and_then(|token| resolve(&token, &secret));

        async move { result }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match token_from_parts(parts) {
            Some(token) => resolve(&token, &secret).map(|identity| Self(Some(identity))),
            None => Ok(Self(None)),
        };

        async move { result }
    }
}
