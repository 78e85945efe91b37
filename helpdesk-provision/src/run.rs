//! Provision and check flows.
//!
//! Both flows return the process exit code and write their `--json`
//! document to the given writer (stdout in the binary).

use crate::output::{RunDocument, EXIT_FAILURE};
use helpdesk_shared::db::pool::{self, DatabaseConfig};
use helpdesk_shared::provision::{
    ProvisionError, ProvisionEvent, ProvisionReport, Provisioner, TracingSink,
};
use sqlx::Connection;
use std::io::Write;
use tracing::{error, info, warn};

/// Ensures the schema exists, logging each step
pub async fn provision<W: Write>(config: &DatabaseConfig, json: bool, out: &mut W) -> u8 {
    let mut sink = (TracingSink, Vec::<ProvisionEvent>::new());
    let result = Provisioner::new().run(config, &mut sink).await;

    if json {
        return RunDocument::from_result(&result, &sink.1).write_to(out);
    }

    match result {
        Ok(report) => {
            info!(
                ensured = report.ensured.len(),
                elapsed_ms = report.elapsed_ms,
                "Database schema is ready"
            );
            0
        }
        Err(err) => {
            error!(kind = ?err.kind(), "Provisioning failed: {}", err);
            err.exit_code()
        }
    }
}

/// Reports missing schema objects without creating anything
pub async fn check<W: Write>(config: &DatabaseConfig, json: bool, out: &mut W) -> u8 {
    let mut conn = match pool::connect(config).await {
        Ok(conn) => conn,
        Err(source) => {
            let err = ProvisionError::Connection { source };
            error!("{}", err);
            if json {
                let events = [ProvisionEvent::ConnectionFailed {
                    error: err.driver_error().to_string(),
                }];
                let result: Result<ProvisionReport, ProvisionError> = Err(err);
                return RunDocument::from_result(&result, &events).write_to(out);
            }
            return err.exit_code();
        }
    };

    let inspected = Provisioner::new().inspect(&mut conn).await;
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Database connection did not close cleanly");
    }

    let snapshot = match inspected {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Schema inspection failed");
            if json {
                return RunDocument::inspection_failed(&e).write_to(out);
            }
            return EXIT_FAILURE;
        }
    };

    let document = RunDocument::from_snapshot(&snapshot);
    if json {
        return document.write_to(out);
    }

    let missing = snapshot.missing();
    if missing.is_empty() {
        info!(schema = %snapshot.schema, "All schema objects are present");
    } else {
        for object in &missing {
            error!(schema = %snapshot.schema, "Missing {}", object);
        }
    }
    document.exit_code()
}
