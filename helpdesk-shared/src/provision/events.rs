/// Provisioning progress events and sinks
///
/// The provisioner reports each transition as a [`ProvisionEvent`] to an
/// [`EventSink`]. The `Display` form of an event is the human-readable
/// narrative line; the serialized form is what pipelines assert on.
///
/// # Example
///
/// ```
/// use helpdesk_shared::provision::events::{EventSink, ProvisionEvent};
///
/// let mut events: Vec<ProvisionEvent> = Vec::new();
/// events.record(ProvisionEvent::Connected);
/// assert_eq!(events[0].to_string(), "Connected to database");
/// ```

use crate::provision::schema::SchemaObject;
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

/// Where the provisioner stands in its linear sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    Disconnected,
    Connected,
    /// The given object is known to exist
    Ensured(SchemaObject),
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionState::Disconnected => f.write_str("disconnected"),
            ProvisionState::Connected => f.write_str("connected"),
            ProvisionState::Ensured(object) => write!(f, "ensured {}", object),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProvisionEvent {
    Connected,
    ConnectionFailed { error: String },
    StepSucceeded { object: SchemaObject },
    StepFailed { object: SchemaObject, error: String },
    Disconnected,
}

impl ProvisionEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ProvisionEvent::ConnectionFailed { .. } | ProvisionEvent::StepFailed { .. }
        )
    }
}

impl fmt::Display for ProvisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionEvent::Connected => f.write_str("Connected to database"),
            ProvisionEvent::ConnectionFailed { error } => {
                write!(f, "Could not connect to database: {}", error)
            }
            ProvisionEvent::StepSucceeded { object } => write!(f, "Ensured {}", object),
            ProvisionEvent::StepFailed { object, error } => {
                write!(f, "Failed to ensure {}: {}", object, error)
            }
            ProvisionEvent::Disconnected => f.write_str("Database connection released"),
        }
    }
}

/// Receives provisioning events in the order they happen
pub trait EventSink {
    fn record(&mut self, event: ProvisionEvent);
}

/// Collects events for later inspection
impl EventSink for Vec<ProvisionEvent> {
    fn record(&mut self, event: ProvisionEvent) {
        self.push(event);
    }
}

/// Fans every event out to both sinks
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: ProvisionEvent) {
        self.0.record(event.clone());
        self.1.record(event);
    }
}

/// Writes the narrative through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: ProvisionEvent) {
        match &event {
            ProvisionEvent::StepSucceeded { object } => info!(object = %object, "{}", event),
            ProvisionEvent::StepFailed { object, .. } => error!(object = %object, "{}", event),
            ProvisionEvent::ConnectionFailed { .. } => error!("{}", event),
            ProvisionEvent::Connected | ProvisionEvent::Disconnected => info!("{}", event),
        }
    }
}
