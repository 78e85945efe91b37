/// Provisioning failures, tagged by the step that failed

use crate::provision::schema::SchemaObject;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// No database session could be established
    #[error("could not connect to database: {source}")]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    /// The extension statement failed (usually missing privileges)
    #[error("could not ensure extension \"{extension}\": {source}")]
    Extension {
        extension: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A table statement failed
    #[error("could not ensure table {table}: {source}")]
    TableCreation {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Failure category, stable across releases for pipeline consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Connection,
    Extension,
    TableCreation,
    /// The schema catalog could not be read (check-only runs)
    Inspection,
}

/// Machine-readable description of a failed run
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<SchemaObject>,
    pub message: String,
}

impl ProvisionError {
    /// Classifies a failed statement by the object it was ensuring
    pub fn for_step(object: SchemaObject, source: sqlx::Error) -> Self {
        match object {
            SchemaObject::Extension(extension) => ProvisionError::Extension { extension, source },
            SchemaObject::Table(table) => ProvisionError::TableCreation { table, source },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ProvisionError::Connection { .. } => FailureKind::Connection,
            ProvisionError::Extension { .. } => FailureKind::Extension,
            ProvisionError::TableCreation { .. } => FailureKind::TableCreation,
        }
    }

    /// The schema object whose step failed, `None` for connection failures
    pub fn object(&self) -> Option<SchemaObject> {
        match self {
            ProvisionError::Connection { .. } => None,
            ProvisionError::Extension { extension, .. } => Some(SchemaObject::Extension(extension)),
            ProvisionError::TableCreation { table, .. } => Some(SchemaObject::Table(table)),
        }
    }

    /// Underlying driver error
    pub fn driver_error(&self) -> &sqlx::Error {
        match self {
            ProvisionError::Connection { source }
            | ProvisionError::Extension { source, .. }
            | ProvisionError::TableCreation { source, .. } => source,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            ProvisionError::Connection { .. } => 3,
            ProvisionError::Extension { .. } => 4,
            ProvisionError::TableCreation { .. } => 5,
        }
    }

    pub fn summary(&self) -> FailureSummary {
        FailureSummary {
            kind: self.kind(),
            object: self.object(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_error() -> sqlx::Error {
        sqlx::Error::Protocol("permission denied".into())
    }

    #[test]
    fn test_for_step_classifies_by_object() {
        let err = ProvisionError::for_step(SchemaObject::Extension("uuid-ossp"), driver_error());
        assert_eq!(err.kind(), FailureKind::Extension);
        assert_eq!(err.object(), Some(SchemaObject::Extension("uuid-ossp")));

        let err = ProvisionError::for_step(SchemaObject::Table("users"), driver_error());
        assert_eq!(err.kind(), FailureKind::TableCreation);
        assert_eq!(err.object(), Some(SchemaObject::Table("users")));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ProvisionError::Connection { source: driver_error() }.exit_code(),
            ProvisionError::for_step(SchemaObject::Extension("uuid-ossp"), driver_error()).exit_code(),
            ProvisionError::for_step(SchemaObject::Table("users"), driver_error()).exit_code(),
        ];
        assert_eq!(codes, [3, 4, 5]);
    }

    #[test]
    fn test_message_names_the_failed_step() {
        let err = ProvisionError::for_step(SchemaObject::Table("organizations"), driver_error());
        let message = err.to_string();
        assert!(message.contains("organizations"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn test_summary_serialization() {
        let err = ProvisionError::Connection { source: driver_error() };
        let json = serde_json::to_value(err.summary()).unwrap();
        assert_eq!(json["kind"], "connection");
        assert!(json.get("object").is_none());

        let err = ProvisionError::for_step(SchemaObject::Table("users"), driver_error());
        let json = serde_json::to_value(err.summary()).unwrap();
        assert_eq!(json["kind"], "table_creation");
        assert_eq!(json["object"]["name"], "users");
    }
}
