//! Input/output helpers.
//!
//! - streaming CSV export (`export`)

pub mod export;

pub use export::*;
