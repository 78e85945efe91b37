//! # Helpdesk Provisioning Tool
//!
//! Runs the schema provisioner once against the configured database and
//! exits with a code that tells deployment pipelines which step failed.
//!
//! ## Modules
//!
//! - `cli`: Command-line and environment arguments
//! - `output`: JSON result documents and exit codes
//! - `run`: The provision and check flows
//!
//! ## Exit codes
//!
//! | code | meaning                               |
//! |------|---------------------------------------|
//! | 0    | schema ensured (or complete, `--check`) |
//! | 1    | setup failure, bad arguments          |
//! | 3    | could not connect                     |
//! | 4    | extension could not be created        |
//! | 5    | a table could not be created          |
//! | 6    | schema incomplete (`--check`)         |

pub mod cli;
pub mod output;
pub mod run;
