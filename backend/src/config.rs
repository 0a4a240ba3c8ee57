//! Application configuration.
//!
//! Values come from an optional `tiffin.yaml` (path overridable through
//! `TIFFIN_CONFIG`) and are then overridden by `TIFFIN_*` environment
//! variables. Every field has a default, so no file is required.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::reminder::{ReminderSettings, DEFAULT_REMINDER_MESSAGE, DEFAULT_REMINDER_TITLE};
use crate::storage::csv::CsvConnection;

const DEFAULT_CONFIG_FILE: &str = "tiffin.yaml";
const REMINDER_TIME_FORMAT: &str = "%H:%M";

pub const DEFAULT_SEED_MEMBERS: [&str; 6] = ["Ayush", "Saish", "Pranav", "Dhiraj", "Vivek", "Vaibhav"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    /// Local time of day, `HH:MM`
    pub time: String,
    pub title: String,
    pub message: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            time: "21:00".to_string(),
            title: DEFAULT_REMINDER_TITLE.to_string(),
            message: DEFAULT_REMINDER_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where `orders.csv` and `members.yaml` live. Platform data dir if unset.
    pub data_dir: Option<PathBuf>,
    pub bind_address: String,
    pub cors_origin: String,
    pub seed_members: Vec<String>,
    pub reminder: ReminderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            seed_members: DEFAULT_SEED_MEMBERS.iter().map(|m| m.to_string()).collect(),
            reminder: ReminderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from file (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("TIFFIN_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Defaults when `path` does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override fields from `TIFFIN_*` variables looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("TIFFIN_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(addr) = lookup("TIFFIN_BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(origin) = lookup("TIFFIN_CORS_ORIGIN") {
            self.cors_origin = origin;
        }
        if let Some(raw) = lookup("TIFFIN_REMINDER_ENABLED") {
            match parse_bool(&raw) {
                Some(enabled) => self.reminder.enabled = enabled,
                None => warn!("Ignoring TIFFIN_REMINDER_ENABLED={}", raw),
            }
        }
        if let Some(time) = lookup("TIFFIN_REMINDER_TIME") {
            self.reminder.time = time;
        }
        if let Some(members) = lookup("TIFFIN_MEMBERS") {
            self.seed_members = members
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    pub fn reminder_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.reminder.time.trim(), REMINDER_TIME_FORMAT)
            .with_context(|| format!("Reminder time '{}' is not HH:MM", self.reminder.time))
    }

    pub fn reminder_settings(&self) -> Result<ReminderSettings> {
        Ok(ReminderSettings {
            time: self.reminder_time()?,
            title: self.reminder.title.clone(),
            message: self.reminder.message.clone(),
        })
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => CsvConnection::default_directory(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.seed_members.len(), 6);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder_time().unwrap(), NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        assert_eq!(config.reminder_settings().unwrap(), ReminderSettings::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = AppConfig::from_yaml_str(
            "bind_address: 0.0.0.0:8000\nreminder:\n  time: \"20:30\"\nseed_members: [Ayush, Vivek]\n",
        )
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.reminder.time, "20:30");
        assert_eq!(config.reminder.title, DEFAULT_REMINDER_TITLE);
        assert_eq!(config.seed_members, vec!["Ayush", "Vivek"]);
        assert_eq!(config.cors_origin, "http://localhost:8080");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::from_yaml_str("reminder:\n  enabled: true\n").unwrap();
        config.apply_env_overrides(env(&[
            ("TIFFIN_DATA_DIR", "/tmp/tiffin"),
            ("TIFFIN_REMINDER_ENABLED", "no"),
            ("TIFFIN_REMINDER_TIME", "19:45"),
            ("TIFFIN_MEMBERS", "Pranav, Dhiraj,,"),
        ]));

        assert_eq!(config.resolved_data_dir().unwrap(), PathBuf::from("/tmp/tiffin"));
        assert!(!config.reminder.enabled);
        assert_eq!(config.reminder_time().unwrap(), NaiveTime::from_hms_opt(19, 45, 0).unwrap());
        assert_eq!(config.seed_members, vec!["Pranav", "Dhiraj"]);
    }

    #[test]
    fn test_bad_reminder_time_is_an_error() {
        let mut config = AppConfig::default();
        config.reminder.time = "9pm".to_string();
        assert!(config.reminder_time().is_err());
    }
}
