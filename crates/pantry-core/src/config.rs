/// Trait for loading service configuration from environment variables.
///
/// Implementors should derive `serde::Deserialize` and then call
/// `Config::from_env()` to load configuration at startup. Field names map to
/// upper-cased env vars (`database_url` → `DATABASE_URL`).
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load the configuration, returning a readable message on failure.
    fn try_from_env() -> Result<Self, String> {
        envy::from_env().map_err(|e| format!("failed to load config from environment: {e}"))
    }

    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(message) => panic!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct SampleConfig {
        #[allow(dead_code)]
        pantry_core_test_required: String,
    }

    impl Config for SampleConfig {}

    #[test]
    fn should_report_missing_required_var() {
        let err = SampleConfig::try_from_env().unwrap_err();
        assert!(err.contains("pantry_core_test_required"), "{err}");
    }
}
