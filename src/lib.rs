//! `coh-export` library crate.
//!
//! The binary (`coh-export`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the export pipeline is reusable (e.g., a future scheduler or multi-client
//!   driver can call it directly)

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
