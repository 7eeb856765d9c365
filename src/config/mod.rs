//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QCHAT_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use qchat_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.nlu.model);
//! ```

mod assistant;
mod error;
mod nlu;

pub use assistant::AssistantConfig;
pub use error::{ConfigError, ValidationError};
pub use nlu::NluConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the screening assistant.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Dialogue loop configuration (attempt caps, history windows)
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// NLU provider configuration (OpenAI)
    #[serde(default)]
    pub nlu: NluConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QCHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QCHAT__NLU__API_KEY=sk-...` -> `nlu.api_key = sk-...`
    /// - `QCHAT__ASSISTANT__MAX_ATTEMPTS=5` -> `assistant.max_attempts = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("QCHAT").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.assistant.validate()?;
        self.nlu.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("QCHAT__NLU__API_KEY", "sk-test-xxx");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("QCHAT__NLU__API_KEY");
        env::remove_var("QCHAT__NLU__MODEL");
        env::remove_var("QCHAT__ASSISTANT__MAX_ATTEMPTS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.nlu.api_key.as_deref(), Some("sk-test-xxx"));
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_assistant_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.assistant.max_attempts, 5);
        assert_eq!(config.assistant.max_turn_steps, 25);
        assert_eq!(config.nlu.model, "gpt-4o-mini");
    }

    #[test]
    fn test_custom_max_attempts() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QCHAT__ASSISTANT__MAX_ATTEMPTS", "3");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.assistant.max_attempts, 3);
    }

    #[test]
    fn test_custom_model() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QCHAT__NLU__MODEL", "gpt-4o");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.nlu.model, "gpt-4o");
    }

    #[test]
    fn test_validation_without_api_key_fails() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }
}
