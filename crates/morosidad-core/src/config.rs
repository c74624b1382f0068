#![forbid(unsafe_code)]

//! Client configuration.
//!
//! Every field has a default that matches the page's fixed constants, so
//! `ClientConfig::default()` is the production behavior. A page may pass a
//! JSON object to override any subset:
//!
//! ```json
//! { "stats_refresh_interval_ms": 10000, "predict_endpoint": "/v2/predecir" }
//! ```

use core::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse client config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("client config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Tunables for both page controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `POST` target for predictions.
    pub predict_endpoint: String,
    /// `GET` target for aggregate statistics.
    pub stats_endpoint: String,
    /// Transient store key holding a pre-filled profile.
    pub handoff_key: String,
    pub stats_refresh_interval_ms: u64,
    /// Highlight duration for fields filled from the handoff.
    pub prefill_highlight_ms: u64,
    /// Highlight duration for assist-filled fields.
    pub assist_highlight_ms: u64,
    /// Delay before probability bars take their width.
    pub bar_animation_delay_ms: u64,
    /// How long the manual refresh button shows its "done" label.
    pub refresh_feedback_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            predict_endpoint: "/predecir".into(),
            stats_endpoint: "/api/estadisticas".into(),
            handoff_key: "perfilPrecargado".into(),
            stats_refresh_interval_ms: 30_000,
            prefill_highlight_ms: 3_000,
            assist_highlight_ms: 2_000,
            bar_animation_delay_ms: 100,
            refresh_feedback_ms: 2_000,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON override object.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Returns a list of findings. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.predict_endpoint.trim().is_empty() {
            errors.push("predict_endpoint must not be empty".into());
        }
        if self.stats_endpoint.trim().is_empty() {
            errors.push("stats_endpoint must not be empty".into());
        }
        if self.handoff_key.is_empty() {
            errors.push("handoff_key must not be empty".into());
        }
        if self.stats_refresh_interval_ms == 0 {
            errors.push("stats_refresh_interval_ms must be > 0".into());
        }
        errors
    }

    #[must_use]
    pub const fn stats_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.stats_refresh_interval_ms)
    }

    #[must_use]
    pub const fn prefill_highlight(&self) -> Duration {
        Duration::from_millis(self.prefill_highlight_ms)
    }

    #[must_use]
    pub const fn assist_highlight(&self) -> Duration {
        Duration::from_millis(self.assist_highlight_ms)
    }

    #[must_use]
    pub const fn bar_animation_delay(&self) -> Duration {
        Duration::from_millis(self.bar_animation_delay_ms)
    }

    #[must_use]
    pub const fn refresh_feedback(&self) -> Duration {
        Duration::from_millis(self.refresh_feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.predict_endpoint, "/predecir");
        assert_eq!(config.stats_endpoint, "/api/estadisticas");
        assert_eq!(config.handoff_key, "perfilPrecargado");
        assert_eq!(config.stats_refresh_interval(), Duration::from_secs(30));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let config =
            ClientConfig::from_json_str(r#"{"stats_refresh_interval_ms": 5000}"#).unwrap();
        assert_eq!(config.stats_refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.assist_highlight(), Duration::from_secs(2));
    }

    #[test]
    fn validation_rejects_zero_interval_and_blank_endpoint() {
        let err = ClientConfig::from_json_str(
            r#"{"stats_refresh_interval_ms": 0, "predict_endpoint": " "}"#,
        )
        .unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation error, got {err}");
        };
        assert!(errors.iter().any(|e| e.contains("stats_refresh_interval_ms")));
        assert!(errors.iter().any(|e| e.contains("predict_endpoint")));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ClientConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
