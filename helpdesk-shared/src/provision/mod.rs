/// Schema provisioning
///
/// Brings a database from an unknown state to one that has the helpdesk
/// bootstrap schema, using create-if-absent statements only.
///
/// # Modules
///
/// - `schema`: schema objects and their idempotent statements
/// - `provisioner`: the sequential runner and its connection handling
/// - `events`: progress events, states and sinks
/// - `inspect`: read-only schema snapshots
/// - `error`: failures tagged by step
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::db::pool::DatabaseConfig;
/// use helpdesk_shared::provision::{ProvisionEvent, Provisioner, TracingSink};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig::from_env()?;
///
/// // Log the narrative and keep the events for assertions
/// let mut sink = (TracingSink, Vec::<ProvisionEvent>::new());
/// let report = Provisioner::new().run(&config, &mut sink).await?;
///
/// assert_eq!(report.ensured.len(), 3);
/// assert!(sink.1.iter().all(|event| !event.is_failure()));
/// # Ok(())
/// # }
/// ```

pub mod error;
pub mod events;
pub mod inspect;
pub mod provisioner;
pub mod schema;

pub use error::{FailureKind, FailureSummary, ProvisionError};
pub use events::{EventSink, ProvisionEvent, ProvisionState, TracingSink};
pub use inspect::{inspect_schema, ColumnInfo, SchemaSnapshot};
pub use provisioner::{ProvisionReport, Provisioner};
pub use schema::{standard_steps, ProvisionStep, SchemaObject};
