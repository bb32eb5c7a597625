use pantry_auth_types::identity::JwtSecret;
use pantry_auth_types::token::issue_token;

use crate::domain::repository::UserRepository;
use crate::error::ApiError;
use crate::infra::password::verify_password;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: JwtSecret,
    pub token_ttl: u64,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Exchange email + password for an access token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<IssuedToken, ApiError> {
        let email = email.trim().to_lowercase();
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        let (token, expires_at) = issue_token(
            user.id,
            user.role.as_u8(),
            &self.jwt_secret.0,
            self.token_ttl,
        )
        .map_err(|e| anyhow::anyhow!("issue token: {e}"))?;
        Ok(IssuedToken { token, expires_at })
    }
}
