//! Primitive decoders/encoders shared by every converter.
//!
//! - `primitive`: scalars, vectors, matrices, index sequences, field lookup
//! - `calendar`: host date sequences

pub mod calendar;
pub mod primitive;

pub use calendar::*;
pub use primitive::*;
