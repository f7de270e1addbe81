//! `flu-bridge` library crate.
//!
//! Marshals host values (named lists, numeric vectors and matrices, date
//! sequences) into the typed structures consumed by the flu simulation engine,
//! and encodes engine state back into host values.
//!
//! The binary (`flubridge`) is a thin wrapper around this library so that:
//!
//! - conversions are testable without spawning processes
//! - host bindings can call the converters directly

pub mod app;
pub mod cli;
pub mod codec;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod value;
