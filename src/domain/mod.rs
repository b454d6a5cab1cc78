//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the flattened recommendation record (`Recommendation`)
//! - one page of listing results (`Page`)
//! - the page-failure policy (`PagePolicy`)
//! - the run outcome (`ExportSummary`)

pub mod types;

pub use types::*;
