//! NLU provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::nlu::OpenAiNluConfig;

/// OpenAI-backed NLU provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NluConfig {
    /// OpenAI API key
    pub api_key: Option<String>,

    /// Chat completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on retryable failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl NluConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Build the adapter configuration, or None when no API key is set
    pub fn adapter_config(&self) -> Option<OpenAiNluConfig> {
        let key = self.api_key.as_ref().filter(|k| !k.is_empty())?;
        Some(
            OpenAiNluConfig::new(key.clone())
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )
    }

    /// Validate NLU configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("QCHAT__NLU__API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}
