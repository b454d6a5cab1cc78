//! Remote data access.
//!
//! - Cost Optimization Hub listing client (`hub`)

pub mod hub;

pub use hub::*;
