//! Dialogue loop configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assistant::TurnLimits;

/// Tunables for the per-question dialogue loop
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Failed extraction attempts before a question is closed as unanswered
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Internal phase transitions allowed within a single turn
    #[serde(default = "default_max_turn_steps")]
    pub max_turn_steps: u32,

    /// History turns forwarded to the classifier and extractor
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// History turns forwarded to response generation
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

impl AssistantConfig {
    /// Convert to the limits consumed by the dialogue machine
    pub fn limits(&self) -> TurnLimits {
        TurnLimits {
            max_attempts: self.max_attempts,
            max_turn_steps: self.max_turn_steps,
            history_window: self.history_window,
            context_window: self.context_window,
        }
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        if self.max_turn_steps == 0 {
            return Err(ValidationError::InvalidMaxTurnSteps);
        }
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_turn_steps: default_max_turn_steps(),
            history_window: default_history_window(),
            context_window: default_context_window(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_turn_steps() -> u32 {
    25
}

fn default_history_window() -> usize {
    10
}

fn default_context_window() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_config_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.max_turn_steps, 25);
        assert_eq!(config.history_window, 10);
        assert_eq!(config.context_window, 5);
    }

    #[test]
    fn test_limits_conversion() {
        let config = AssistantConfig {
            max_attempts: 2,
            ..Default::default()
        };
        let limits = config.limits();
        assert_eq!(limits.max_attempts, 2);
        assert_eq!(limits.history_window, 10);
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let config = AssistantConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_turn_steps() {
        let config = AssistantConfig {
            max_turn_steps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(AssistantConfig::default().validate().is_ok());
    }
}
