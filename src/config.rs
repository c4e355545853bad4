use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::button::{CountMode, Polarity};

pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Runtime settings for a [`crate::joystick::Joystick`].
///
/// `count_mode` is kept as text so that an unknown mode is dropped the same
/// way [`crate::button::DebouncedButton::set_press_count_mode_str`] drops it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct JoystickConfig {
    pub debounce_ms: u64,
    pub count_mode: String,
    pub polarity: Polarity,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            count_mode: "COUNT_FALLING".to_string(),
            polarity: Polarity::default(),
        }
    }
}

impl JoystickConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse joystick config")
    }

    /// Reads JSON from the environment variable `var`, falling back to the
    /// defaults when it is not set.
    pub fn from_env(var: &str) -> anyhow::Result<Self> {
        match std::env::var(var) {
            Ok(json) => Self::from_json(&json).with_context(|| format!("in ${var}")),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("Failed to read ${var}")),
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn parsed_count_mode(&self) -> Option<CountMode> {
        self.count_mode.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = JoystickConfig::from_json(r#"{"debounce_ms": 100}"#).unwrap();
        assert_eq!(config.debounce_window(), Duration::from_millis(100));
        assert_eq!(config.parsed_count_mode(), Some(CountMode::CountFalling));
        assert_eq!(config.polarity, Polarity::ActiveLow);

        assert_eq!(JoystickConfig::from_json("{}").unwrap(), JoystickConfig::default());
    }

    #[test]
    fn full_config_parses() {
        let config = JoystickConfig::from_json(
            r#"{"debounce_ms": 5, "count_mode": "COUNT_BOTH", "polarity": "ActiveHigh"}"#,
        )
        .unwrap();
        assert_eq!(config.parsed_count_mode(), Some(CountMode::CountBoth));
        assert_eq!(config.polarity, Polarity::ActiveHigh);
    }

    #[test]
    fn unknown_count_mode_is_not_a_parse_error() {
        let config = JoystickConfig::from_json(r#"{"count_mode": "SOMETIMES"}"#).unwrap();
        assert_eq!(config.parsed_count_mode(), None);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = JoystickConfig::from_json(r#"{"debounce_ms": -3}"#).unwrap_err();
        assert!(err.to_string().contains("joystick config"));
        assert!(JoystickConfig::from_json("not json").is_err());
    }

    #[test]
    fn unset_env_var_gives_defaults() {
        let config = JoystickConfig::from_env("JOYSTICK_BUTTON_TEST_UNSET_VAR").unwrap();
        assert_eq!(config, JoystickConfig::default());
    }
}
