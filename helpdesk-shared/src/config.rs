/// Deployment environment and configuration errors
///
/// The deployment environment decides defaults that differ between local
/// development and hosted deployments, most notably the database TLS policy
/// (see [`crate::db::tls::TlsPolicy::for_environment`]).
///
/// # Environment Variables
///
/// - `APP_ENV`: `development` (default), `test` or `production`
///
/// # Example
///
/// ```
/// use helpdesk_shared::config::Environment;
///
/// let env: Environment = "production".parse().unwrap();
/// assert!(env.is_production());
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the variable holding the deployment environment
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Errors raised while assembling configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Reads `APP_ENV` through `lookup`, defaulting to development when unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(APP_ENV_VAR) {
            None => Ok(Environment::default()),
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                name: APP_ENV_VAR,
                value,
                reason,
            }),
        }
    }

    /// Reads `APP_ENV` from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!(
                "unknown environment '{}', expected development, test or production",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads a `.env` file from the working directory if one exists
///
/// Missing files are ignored; only the process environment is consulted then.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_defaults_to_development() {
        let env = Environment::from_lookup(lookup(&[])).unwrap();
        assert_eq!(env, Environment::Development);
        assert!(!env.is_production());
    }

    #[test]
    fn test_environment_parses_aliases() {
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" test ".parse::<Environment>(), Ok(Environment::Test));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
    }

    #[test]
    fn test_environment_rejects_unknown_value() {
        let err = Environment::from_lookup(lookup(&[("APP_ENV", "staging")])).unwrap_err();
        match err {
            ConfigError::Invalid { name, value, .. } => {
                assert_eq!(name, "APP_ENV");
                assert_eq!(value, "staging");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_environment_display_round_trips() {
        for env in [Environment::Development, Environment::Test, Environment::Production] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }
}
