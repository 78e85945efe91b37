//! Result documents and exit codes.

use helpdesk_shared::provision::{
    FailureKind, FailureSummary, ProvisionError, ProvisionEvent, ProvisionReport, SchemaObject,
    SchemaSnapshot,
};
use serde::Serialize;
use std::io::Write;

/// Rejected arguments, bad environment, or a schema check that could not read the catalog
pub const EXIT_FAILURE: u8 = 1;

/// `--check` found missing objects
pub const EXIT_SCHEMA_INCOMPLETE: u8 = 6;

/// What a run printed with `--json` looks like
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunDocument<'a> {
    Provisioned {
        report: &'a ProvisionReport,
        events: &'a [ProvisionEvent],
    },
    Failed {
        failure: FailureSummary,
        exit_code: u8,
        events: &'a [ProvisionEvent],
    },
    Checked {
        complete: bool,
        missing: Vec<SchemaObject>,
        snapshot: &'a SchemaSnapshot,
    },
}

impl<'a> RunDocument<'a> {
    pub fn from_result(
        result: &'a Result<ProvisionReport, ProvisionError>,
        events: &'a [ProvisionEvent],
    ) -> Self {
        match result {
            Ok(report) => RunDocument::Provisioned { report, events },
            Err(err) => RunDocument::Failed {
                failure: err.summary(),
                exit_code: err.exit_code(),
                events,
            },
        }
    }

    /// A `--check` run whose catalog queries failed after connecting
    pub fn inspection_failed(error: &sqlx::Error) -> Self {
        RunDocument::Failed {
            failure: FailureSummary {
                kind: FailureKind::Inspection,
                object: None,
                message: format!("could not inspect schema: {}", error),
            },
            exit_code: EXIT_FAILURE,
            events: &[],
        }
    }

    pub fn from_snapshot(snapshot: &'a SchemaSnapshot) -> Self {
        RunDocument::Checked {
            complete: snapshot.is_complete(),
            missing: snapshot.missing(),
            snapshot,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RunDocument::Provisioned { .. } => 0,
            RunDocument::Failed { exit_code, .. } => *exit_code,
            RunDocument::Checked { complete: true, .. } => 0,
            RunDocument::Checked { complete: false, .. } => EXIT_SCHEMA_INCOMPLETE,
        }
    }

    /// Writes the document as pretty JSON and returns its exit code
    pub fn write_to<W: Write>(&self, out: &mut W) -> u8 {
        let written = serde_json::to_writer_pretty(&mut *out, self)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(out));

        match written {
            Ok(()) => self.exit_code(),
            Err(e) => {
                tracing::error!(error = %e, "Could not write result document");
                EXIT_FAILURE
            }
        }
    }
}
