//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default countdown length and near-expiry threshold
//! - Goal export filename
//!
//! Configuration is stored at `~/.config/focusboard/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::TimerSettings;

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default = "default_near_expiry_secs")]
    pub near_expiry_secs: u32,
}

/// Goal checklist configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

fn default_minutes() -> u32 {
    25
}
fn default_near_expiry_secs() -> u32 {
    5
}
fn default_export_filename() -> String {
    "goals.csv".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            near_expiry_secs: default_near_expiry_secs(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            export_filename: default_export_filename(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("only leaf keys can be set".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Update a value in memory only.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.default_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.default_minutes".into(),
                message: "must be at least 1".into(),
            });
        }
        let filename = self.goals.export_filename.trim();
        if filename.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "goals.export_filename".into(),
                message: "must not be empty".into(),
            });
        }
        if filename.contains(['/', '\\']) || matches!(filename, "." | "..") {
            return Err(ConfigError::InvalidValue {
                key: "goals.export_filename".into(),
                message: "must be a bare file name".into(),
            });
        }
        Ok(())
    }

    /// Countdown settings derived from the `[timer]` section.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            duration_secs: u64::from(self.timer.default_minutes.max(1)) * 60,
            near_expiry_secs: u64::from(self.timer.near_expiry_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.default_minutes, 25);
        assert_eq!(parsed.goals.export_filename, "goals.csv");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\ndefault_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.default_minutes, 50);
        assert_eq!(parsed.timer.near_expiry_secs, 5);
        assert_eq!(parsed.goals.export_filename, "goals.csv");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.default_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("goals.export_filename").as_deref(), Some("goals.csv"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_number_and_string() {
        let mut cfg = Config::default();
        cfg.apply("timer.default_minutes", "50").unwrap();
        cfg.apply("goals.export_filename", "today.csv").unwrap();
        assert_eq!(cfg.timer.default_minutes, 50);
        assert_eq!(cfg.goals.export_filename, "today.csv");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("timer.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        let err = cfg.apply("timer.default_minutes", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.timer.default_minutes, 25);
    }

    #[test]
    fn apply_rejects_zero_minutes() {
        let mut cfg = Config::default();
        assert!(cfg.apply("timer.default_minutes", "0").is_err());
        assert_eq!(cfg.timer.default_minutes, 25);
    }

    #[test]
    fn apply_rejects_section_keys() {
        let mut cfg = Config::default();
        assert!(cfg.apply("timer", "{}").is_err());
    }

    #[test]
    fn timer_settings_follow_config() {
        let mut cfg = Config::default();
        cfg.timer.default_minutes = 10;
        let settings = cfg.timer_settings();
        assert_eq!(settings.duration_secs, 600);
        assert_eq!(settings.near_expiry_secs, 5);
    }

    #[test]
    fn tick_period_is_not_configurable() {
        let mut cfg = Config::default();
        let err = cfg.apply("timer.tick_interval_ms", "250").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));

        // Files written before the key was dropped still parse.
        let parsed: Config = toml::from_str("[timer]\ntick_interval_ms = 250\n").unwrap();
        assert_eq!(parsed.timer.default_minutes, 25);
    }

    #[test]
    fn apply_rejects_export_filename_with_path() {
        let mut cfg = Config::default();
        for bad in ["/tmp/goals.csv", "out/goals.csv", "..\\goals.csv", ".."] {
            let err = cfg.apply("goals.export_filename", bad).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{bad}");
        }
        assert_eq!(cfg.goals.export_filename, "goals.csv");
    }
}
