//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::OpenAIConfig;

use super::error::ValidationError;

/// AI provider configuration.
///
/// Without an API key the service answers every submission with the
/// fallback analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the API base URL
    pub base_url: Option<String>,

    /// Overall analysis timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Provider configuration, if a key is present.
    pub fn openai_config(&self) -> Option<OpenAIConfig> {
        if !self.has_openai() {
            return None;
        }
        let key = self.openai_api_key.clone()?;
        let mut config = OpenAIConfig::from_secret(key)
            .with_model(self.model.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries);
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            config = config.with_base_url(url);
        }
        Some(config)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_retries() -> u32 {
    1
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.max_tokens, 500);
        assert!(!config.has_openai());
        assert!(config.openai_config().is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_openai());
    }

    #[test]
    fn test_openai_config_carries_settings() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-xxx".to_string())),
            model: "gpt-4o".to_string(),
            base_url: Some("http://localhost:9999/v1".to_string()),
            timeout_secs: 5,
            max_retries: 2,
            ..Default::default()
        };
        let openai = config.openai_config().unwrap();
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.base_url, "http://localhost:9999/v1");
        assert_eq!(openai.timeout, Duration::from_secs(5));
        assert_eq!(openai.max_retries, 2);
    }

    #[test]
    fn test_key_not_in_debug_output() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-very-secret".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn test_validation() {
        assert!(AiConfig::default().validate().is_ok());

        let config = AiConfig {
            temperature: 3.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
