//! # Helpdesk API Server Library
//!
//! The HTTP surface of the helpdesk backend. It currently serves health
//! checks against the database the provisioner bootstraps.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
