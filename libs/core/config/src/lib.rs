//! Shared configuration primitives for the taskboard services.
//!
//! Every configuration struct in the workspace is loaded from environment
//! variables through the [`FromEnv`] trait, using [`env_or_default`] and
//! [`env_required`] for the individual keys.

pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version of the running binary, reported by `/health`.
///
/// Build it with [`app_info!`] so the values come from the calling crate's
/// `Cargo.toml` rather than this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Expands to an [`AppInfo`] for the crate in which it is invoked.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Helper to load an optional environment variable; empty values count as unset
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse a variable with [`std::str::FromStr`], falling back to `default` when unset
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TASKBOARD_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TASKBOARD_TEST_VAR", "default"), "test_value");
        });

        temp_env::with_var_unset("TASKBOARD_TEST_VAR", || {
            assert_eq!(env_or_default("TASKBOARD_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("TASKBOARD_MISSING_REQUIRED", || {
            let err = env_required("TASKBOARD_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("TASKBOARD_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("TASKBOARD_OPTIONAL", Some("   "), || {
            assert!(env_optional("TASKBOARD_OPTIONAL").is_none());
        });

        temp_env::with_var("TASKBOARD_OPTIONAL", Some("postgres://db"), || {
            assert_eq!(
                env_optional("TASKBOARD_OPTIONAL").as_deref(),
                Some("postgres://db")
            );
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var_unset("TASKBOARD_NUMBER", || {
            assert_eq!(env_parse_or("TASKBOARD_NUMBER", 7u32).unwrap(), 7);
        });

        temp_env::with_var("TASKBOARD_NUMBER", Some("42"), || {
            assert_eq!(env_parse_or("TASKBOARD_NUMBER", 7u32).unwrap(), 42);
        });

        temp_env::with_var("TASKBOARD_NUMBER", Some("many"), || {
            let err = env_parse_or("TASKBOARD_NUMBER", 7u32).unwrap_err();
            assert!(err.to_string().contains("TASKBOARD_NUMBER"));
        });
    }

    #[test]
    fn test_app_info_macro_uses_calling_crate() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
