//! Command-line arguments for the provisioning tool.
//!
//! Every flag can also come from the environment, so deployment pipelines
//! usually run the binary without arguments.

use clap::Parser;
use crate::output::EXIT_FAILURE;
use helpdesk_shared::config::Environment;
use helpdesk_shared::db::pool::DatabaseConfig;
use helpdesk_shared::db::tls::TlsPolicy;

/// Ensure the helpdesk database schema exists
#[derive(Parser, Debug)]
#[command(name = "helpdesk-provision")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Deployment environment; selects the default TLS policy
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub environment: Environment,

    /// TLS policy override (disable, relaxed, verify-full)
    #[arg(long, env = "DATABASE_TLS")]
    pub tls: Option<TlsPolicy>,

    /// Seconds to wait for the database connection
    #[arg(long, env = "DATABASE_CONNECT_TIMEOUT", default_value_t = 30)]
    pub connect_timeout: u64,

    /// Only report which schema objects are missing; create nothing
    #[arg(long)]
    pub check: bool,

    /// Print a machine-readable result document on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parses `args`, mapping a rejected command line to its exit code
    ///
    /// `--help` and `--version` map to 0; anything clap rejects (a missing
    /// `DATABASE_URL`, an unknown environment) is a setup failure.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, (clap::Error, u8)>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|err| {
            let code = if err.use_stderr() { EXIT_FAILURE } else { 0 };
            (err, code)
        })
    }

    pub fn database_config(&self) -> DatabaseConfig {
        let mut config = DatabaseConfig::for_environment(&self.database_url, self.environment);
        if let Some(tls) = self.tls {
            config = config.with_tls(tls);
        }
        config.connect_timeout_seconds = self.connect_timeout;
        config
    }
}
