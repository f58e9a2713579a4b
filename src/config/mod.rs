//! Configuration (layered: code > env > defaults).

use std::sync::OnceLock;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::coerce::BooleanCoercion;
use crate::error::{Result, RocError};
use crate::types::ACCESS_DENIED_MESSAGE;

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<RocConfig> = OnceLock::new();

/// Characters of tool output included in the invocation log line.
pub const DEFAULT_OUTPUT_PREVIEW_CHARS: usize = 200;

const ENV_BOOLEAN_COERCION: &str = "ROC_BOOLEAN_COERCION";
const ENV_CONFIRM_MAX_ATTEMPTS: &str = "ROC_CONFIRM_MAX_ATTEMPTS";
const ENV_OUTPUT_PREVIEW_CHARS: &str = "ROC_OUTPUT_PREVIEW_CHARS";
const ENV_DENIAL_MESSAGE: &str = "ROC_DENIAL_MESSAGE";

/// Settings for return-of-control processing.
///
/// ```
/// use roc_bridge::coerce::BooleanCoercion;
/// use roc_bridge::config::RocConfig;
///
/// let config = RocConfig::builder()
///     .boolean_coercion(BooleanCoercion::Strict)
///     .confirm_max_attempts(3)
///     .build();
/// assert_eq!(config.output_preview_chars, 200);
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq, Eq)]
pub struct RocConfig {
    /// How `boolean` parameters are read.
    #[builder(default)]
    pub boolean_coercion: BooleanCoercion,
    /// Upper bound on confirmation prompts per invocation. `None` keeps
    /// asking until a yes/no answer arrives.
    pub confirm_max_attempts: Option<u32>,
    #[builder(default = DEFAULT_OUTPUT_PREVIEW_CHARS)]
    pub output_preview_chars: usize,
    /// Body of the fragment sent when the user declines a call that expected a result.
    #[builder(default = ACCESS_DENIED_MESSAGE.to_string(), into)]
    pub denial_message: String,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RocConfig {
    /// Load from environment variables (`ROC_BOOLEAN_COERCION`, ...).
    ///
    /// Loads `.env` if present. Invalid values are a configuration error.
    pub fn try_from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RocConfig::try_from_env`] but falls back to defaults on invalid values.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid roc-bridge environment configuration");
            Self::default()
        })
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static RocConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    /// Build a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BOOLEAN_COERCION) {
            config.boolean_coercion = raw.trim().parse().map_err(|_| {
                RocError::Configuration(format!(
                    "{ENV_BOOLEAN_COERCION} must be 'truthy' or 'strict', got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_CONFIRM_MAX_ATTEMPTS) {
            let attempts = parse_positive(ENV_CONFIRM_MAX_ATTEMPTS, &raw)?;
            config.confirm_max_attempts = Some(attempts);
        }

        if let Some(raw) = lookup(ENV_OUTPUT_PREVIEW_CHARS) {
            config.output_preview_chars = raw.trim().parse().map_err(|_| {
                RocError::Configuration(format!(
                    "{ENV_OUTPUT_PREVIEW_CHARS} must be a non-negative integer, got '{raw}'"
                ))
            })?;
        }

        if let Some(message) = lookup(ENV_DENIAL_MESSAGE) {
            if !message.trim().is_empty() {
                config.denial_message = message;
            }
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RocError::Configuration(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = RocConfig::default();
        assert_eq!(config.boolean_coercion, BooleanCoercion::Truthy);
        assert_eq!(config.confirm_max_attempts, None);
        assert_eq!(config.output_preview_chars, DEFAULT_OUTPUT_PREVIEW_CHARS);
        assert_eq!(config.denial_message, ACCESS_DENIED_MESSAGE);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = RocConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RocConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = RocConfig::from_lookup(lookup(&[
            ("ROC_BOOLEAN_COERCION", "Strict"),
            ("ROC_CONFIRM_MAX_ATTEMPTS", "5"),
            ("ROC_OUTPUT_PREVIEW_CHARS", "80"),
            ("ROC_DENIAL_MESSAGE", "Nope."),
        ]))
        .unwrap();

        assert_eq!(config.boolean_coercion, BooleanCoercion::Strict);
        assert_eq!(config.confirm_max_attempts, Some(5));
        assert_eq!(config.output_preview_chars, 80);
        assert_eq!(config.denial_message, "Nope.");
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        for pairs in [
            [("ROC_BOOLEAN_COERCION", "fuzzy")],
            [("ROC_CONFIRM_MAX_ATTEMPTS", "0")],
            [("ROC_OUTPUT_PREVIEW_CHARS", "-1")],
        ] {
            let err = RocConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, RocError::Configuration(_)), "{err}");
        }
    }

    #[test]
    fn blank_denial_message_is_ignored() {
        let config = RocConfig::from_lookup(lookup(&[("ROC_DENIAL_MESSAGE", "  ")])).unwrap();
        assert_eq!(config.denial_message, ACCESS_DENIED_MESSAGE);
    }
}
