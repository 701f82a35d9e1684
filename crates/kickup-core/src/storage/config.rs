//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Drill driver tuning (detection interval, simulated hit rate, seed,
//!   post-drill fatigue rate)
//! - Matchmaking defaults (search radius)
//! - Local profile (display name, age used for the privacy filter)
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Drill driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    #[serde(default = "default_detection_interval")]
    pub detection_interval_secs: u32,
    #[serde(default = "default_detection_probability")]
    pub detection_probability: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Chance that a finished drill flags the player as fatigued.
    #[serde(default = "default_fatigue_probability")]
    pub fatigue_probability: f64,
}

/// Matchmaking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchmakingConfig {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

/// Local player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_age")]
    pub age: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub drill: DrillConfig,
    #[serde(default)]
    pub matchmaking: MatchmakingConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_detection_interval() -> u32 {
    2
}
fn default_detection_probability() -> f64 {
    0.7
}
fn default_seed() -> u64 {
    42
}
fn default_fatigue_probability() -> f64 {
    crate::profile::FATIGUE_PROBABILITY
}
fn default_radius_km() -> f64 {
    10.0
}
fn default_username() -> String {
    "KickUpHero".into()
}
fn default_age() -> u32 {
    16
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            detection_interval_secs: default_detection_interval(),
            detection_probability: default_detection_probability(),
            seed: default_seed(),
            fatigue_probability: default_fatigue_probability(),
        }
    }
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            age: default_age(),
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

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(format!("{e}")))?,
                ),
                serde_json::Value::Number(n) if n.is_u64() => {
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                    serde_json::Value::Number(parsed.into())
                }
                serde_json::Value::Number(_) => value
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("only leaf values can be set".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::from_toml(&content).map_err(|message| {
                ConfigError::LoadFailed {
                    path: path.clone(),
                    message,
                }
            })?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
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

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
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

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as the key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
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
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg = Config::from_toml("[profile]\nage = 25\n").unwrap();
        assert_eq!(cfg.profile.age, 25);
        assert_eq!(cfg.profile.username, "KickUpHero");
        assert_eq!(cfg.drill.detection_interval_secs, 2);
        assert_eq!(cfg.matchmaking.default_radius_km, 10.0);
    }

    #[test]
    fn malformed_file_is_reported() {
        assert!(Config::from_toml("[profile\nage = ").is_err());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("profile.username").as_deref(), Some("KickUpHero"));
        assert_eq!(cfg.get("drill.detection_interval_secs").as_deref(), Some("2"));
        assert_eq!(cfg.get("drill.detection_probability").as_deref(), Some("0.7"));
        assert!(cfg.get("profile.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_integer() {
        let mut cfg = Config::default();
        cfg.apply("profile.age", "31").unwrap();
        assert_eq!(cfg.profile.age, 31);
    }

    #[test]
    fn apply_updates_float() {
        let mut cfg = Config::default();
        cfg.apply("matchmaking.default_radius_km", "2.5").unwrap();
        assert_eq!(cfg.matchmaking.default_radius_km, 2.5);
    }

    #[test]
    fn apply_updates_string() {
        let mut cfg = Config::default();
        cfg.apply("profile.username", "Striker99").unwrap();
        assert_eq!(cfg.profile.username, "Striker99");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("profile.nonexistent_key", "value").unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Config(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("profile.age", "sixteen").is_err());
        assert!(cfg.apply("profile.age", "-3").is_err());
        assert!(cfg.apply("drill", "{}").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn apply_names_key_when_value_overflows_field() {
        let mut cfg = Config::default();
        let err = cfg.apply("profile.age", "5000000000").unwrap_err();
        match err {
            crate::error::CoreError::Config(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, "profile.age");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cfg, Config::default());
    }
}
