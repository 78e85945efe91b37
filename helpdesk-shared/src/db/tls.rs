/// TLS policy for database connections
///
/// Hosted Postgres providers usually terminate TLS with certificates whose
/// chain is not in the local trust store, so production deployments connect
/// encrypted but without verifying the server certificate. Local development
/// and test databases run without TLS.
///
/// | environment   | default policy | sqlx mode              |
/// |---------------|----------------|------------------------|
/// | development   | `Disabled`     | `PgSslMode::Disable`   |
/// | test          | `Disabled`     | `PgSslMode::Disable`   |
/// | production    | `Relaxed`      | `PgSslMode::Require`   |
///
/// An `sslmode` parameter in the connection URL replaces the environment
/// default. `DATABASE_TLS` replaces both; `DATABASE_TLS=verify-full` opts in
/// to full certificate and hostname verification (`PgSslMode::VerifyFull`).

use crate::config::Environment;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgSslMode;
use std::fmt;
use std::str::FromStr;

/// Name of the variable overriding the environment-derived policy
pub const DATABASE_TLS_VAR: &str = "DATABASE_TLS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TlsPolicy {
    /// Plain TCP, no TLS negotiation
    #[serde(rename = "disable")]
    Disabled,

    /// TLS required, server certificate accepted without verification
    Relaxed,

    /// TLS required, certificate chain and hostname verified
    VerifyFull,
}

impl TlsPolicy {
    /// Default policy for a deployment environment
    pub fn for_environment(env: Environment) -> Self {
        if env.is_production() {
            TlsPolicy::Relaxed
        } else {
            TlsPolicy::Disabled
        }
    }

    pub fn ssl_mode(&self) -> PgSslMode {
        match self {
            TlsPolicy::Disabled => PgSslMode::Disable,
            TlsPolicy::Relaxed => PgSslMode::Require,
            TlsPolicy::VerifyFull => PgSslMode::VerifyFull,
        }
    }

    /// Whether the server certificate goes unchecked under this policy
    pub fn skips_verification(&self) -> bool {
        matches!(self, TlsPolicy::Relaxed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TlsPolicy::Disabled => "disable",
            TlsPolicy::Relaxed => "relaxed",
            TlsPolicy::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for TlsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" | "disabled" | "off" => Ok(TlsPolicy::Disabled),
            "relaxed" | "require" => Ok(TlsPolicy::Relaxed),
            "verify-full" | "verify" => Ok(TlsPolicy::VerifyFull),
            other => Err(format!(
                "unknown TLS policy '{}', expected disable, relaxed or verify-full",
                other
            )),
        }
    }
}

impl fmt::Display for TlsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_relaxes_verification() {
        let policy = TlsPolicy::for_environment(Environment::Production);
        assert_eq!(policy, TlsPolicy::Relaxed);
        assert!(policy.skips_verification());
        assert!(matches!(policy.ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn test_non_production_disables_tls() {
        for env in [Environment::Development, Environment::Test] {
            let policy = TlsPolicy::for_environment(env);
            assert_eq!(policy, TlsPolicy::Disabled);
            assert!(matches!(policy.ssl_mode(), PgSslMode::Disable));
        }
    }

    #[test]
    fn test_verify_full_maps_to_verifying_mode() {
        let policy: TlsPolicy = "verify-full".parse().unwrap();
        assert!(!policy.skips_verification());
        assert!(matches!(policy.ssl_mode(), PgSslMode::VerifyFull));
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        assert!("sometimes".parse::<TlsPolicy>().is_err());
        assert_eq!("REQUIRE".parse::<TlsPolicy>(), Ok(TlsPolicy::Relaxed));
    }

    #[test]
    fn test_serialized_name_matches_display() {
        for policy in [TlsPolicy::Disabled, TlsPolicy::Relaxed, TlsPolicy::VerifyFull] {
            let json = serde_json::to_value(policy).unwrap();
            assert_eq!(json, serde_json::Value::String(policy.to_string()));

            let back: TlsPolicy = serde_json::from_value(json).unwrap();
            assert_eq!(back, policy);
        }
    }
}
