//! Input/output helpers.
//!
//! - host value dumps as JSON (`json`)

pub mod json;

pub use json::*;
