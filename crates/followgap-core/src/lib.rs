//! Core domain + application logic for the follow-back reconciliation tool.
//!
//! This crate is intentionally provider-agnostic. The Instagram HTTP client
//! lives behind a port (trait) implemented in an adapter crate.

pub mod collector;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod ports;
pub mod reconcile;
pub mod session;
pub mod store;

pub use errors::{Error, Result};
