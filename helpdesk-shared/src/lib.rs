//! # Helpdesk Shared Library
//!
//! This crate contains the configuration, database access and schema
//! provisioning code used by the helpdesk API server and the provisioning CLI.
//!
//! ## Module Organization
//!
//! - `config`: Deployment environment and configuration errors
//! - `db`: Connection configuration, TLS policy and pooling
//! - `provision`: Idempotent schema bootstrap
//! - `models`: Row models for the bootstrap tables

pub mod config;
pub mod db;
pub mod models;
pub mod provision;

/// Current version of the helpdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
