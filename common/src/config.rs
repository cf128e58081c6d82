//! Process-wide configuration for the hub publisher.
//!
//! Values come from an optional dotenv file and the process environment. The
//! loaded [`Config`] is kept in a `OnceCell` so every component sees the same
//! source identifier for the lifetime of the process.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_dir: String,
    pub log_to_console: bool,
    /// Identifier of this hub; root namespace of every topic it publishes on.
    pub source_id: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Reads the configuration from the current environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "hub-topics".into());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "hub-topics.log".into());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".into());
        let log_to_console = match env::var("LOG_TO_CONSOLE") {
            Ok(v) => parse_bool("LOG_TO_CONSOLE", &v)?,
            Err(_) => false,
        };

        let source_id = env::var("SOURCE_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SOURCE_ID"))?;

        Ok(Config {
            project_name,
            log_level,
            log_file,
            log_dir,
            log_to_console,
            source_id,
        })
    }

    /// Loads `env_path` (if it exists) and initializes the global config.
    ///
    /// Later calls return the already initialized value.
    pub fn init(env_path: &str) -> Result<&'static Self, ConfigError> {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_try_init(Config::from_env)
    }

    pub fn get() -> Option<&'static Self> {
        CONFIG.get()
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "PROJECT_NAME",
            "LOG_LEVEL",
            "LOG_FILE",
            "LOG_DIR",
            "LOG_TO_CONSOLE",
            "SOURCE_ID",
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_source_id_is_set() {
        clear_env();
        unsafe {
            env::set_var("SOURCE_ID", "hub1");
        }

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.source_id, "hub1");
        assert_eq!(cfg.project_name, "hub-topics");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_dir, "logs");
        assert!(!cfg.log_to_console);
    }

    #[test]
    #[serial]
    fn missing_source_id_is_rejected() {
        clear_env();
        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::Missing("SOURCE_ID")
        );
    }

    #[test]
    #[serial]
    fn blank_source_id_is_rejected() {
        clear_env();
        unsafe {
            env::set_var("SOURCE_ID", "   ");
        }
        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::Missing("SOURCE_ID")
        );
    }

    #[test]
    #[serial]
    fn log_to_console_must_be_a_boolean() {
        clear_env();
        unsafe {
            env::set_var("SOURCE_ID", "hub1");
            env::set_var("LOG_TO_CONSOLE", "sometimes");
        }
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { key: "LOG_TO_CONSOLE", .. })
        ));

        unsafe {
            env::set_var("LOG_TO_CONSOLE", "TRUE");
        }
        assert!(Config::from_env().unwrap().log_to_console);
    }
}
