use serde::Deserialize;

use pantry_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Directory uploaded images are written to. Env var: `MEDIA_ROOT`.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// Prefix prepended to stored image paths. Env var: `MEDIA_URL`.
    #[serde(default = "default_media_url")]
    pub media_url: String,
    /// Domain attribute of the session cookie. Env var: `COOKIE_DOMAIN`.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    /// Access-token lifetime in seconds. Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Config for ApiConfig {}

fn default_api_port() -> u16 {
    8000
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_media_url() -> String {
    "/media/".to_owned()
}

fn default_token_ttl_secs() -> u64 {
    pantry_auth_types::token::DEFAULT_TOKEN_TTL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn should_apply_defaults() {
        let config: ApiConfig = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/pantry"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.media_root, "media");
        assert_eq!(config.media_url, "/media/");
        assert_eq!(config.cookie_domain, None);
        assert_eq!(config.token_ttl_secs, 604800);
    }

    #[test]
    fn should_read_overrides() {
        let config: ApiConfig = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/pantry"),
            ("JWT_SECRET", "secret"),
            ("API_PORT", "9000"),
            ("COOKIE_DOMAIN", "pantry.example"),
            ("TOKEN_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 9000);
        assert_eq!(config.cookie_domain.as_deref(), Some("pantry.example"));
        assert_eq!(config.token_ttl_secs, 60);
    }

    #[test]
    fn should_require_jwt_secret() {
        let result: Result<ApiConfig, _> =
            envy::from_iter(vars(&[("DATABASE_URL", "postgres://localhost/pantry")]));
        assert!(result.is_err());
    }
}
