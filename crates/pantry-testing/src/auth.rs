//! Mock auth helpers for integration tests.
//!
//! Signs real tokens with a known secret so requests pass the `Identity`
//! extractor without going through the login endpoint.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use pantry_auth_types::token::issue_token;
use uuid::Uuid;

/// Secret used by test routers and [`MockAuth`].
pub const TEST_JWT_SECRET: &str = "pantry-test-secret";

/// Configurable identity for test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, 1)
    }

    /// A signed token for this identity, valid for one hour.
    pub fn token(&self) -> String {
        issue_token(self.user_id, self.user_role, TEST_JWT_SECRET, 3600)
            .map(|(token, _)| token)
            .unwrap()
    }

    /// `Authorization: Token <t>` header value.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token())
    }

    /// Headers carrying the signed token.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.authorization()).unwrap(),
        );
        map
    }
}
