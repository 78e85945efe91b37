/// Database layer for the helpdesk backend
///
/// # Modules
///
/// - `pool`: connection configuration, single connections and pools
/// - `tls`: TLS policy derived from the deployment environment
/// - Schema provisioning lives in the `provision` module at crate root level
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod tls;
