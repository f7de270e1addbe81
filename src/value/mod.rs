//! Host value model and its JSON interchange form.
//!
//! - `generic`: the closed [`GenericValue`] variant and named [`Mapping`]
//! - `wire`: serde representation used for host dumps

pub mod generic;
pub mod wire;

pub use generic::*;
