//! Converters between host values and domain structures.
//!
//! Each structure gets a `Decode` (fallible) and, where the host ever receives
//! it back, an `Encode` (total) implementation:
//!
//! - `vaccine`: [`VaccineProgram`](crate::domain::VaccineProgram)
//! - `contacts`: [`ContactSurvey`](crate::domain::ContactSurvey), decode only
//! - `parameters`: [`ParameterSet`](crate::domain::ParameterSet)
//! - `state`: [`ModelState`](crate::domain::ModelState)
//! - `batch`: unnamed lists of any of the above

use crate::error::DecodeError;
use crate::value::GenericValue;

pub mod batch;
pub mod contacts;
pub mod parameters;
pub mod state;
pub mod vaccine;

pub use batch::*;

/// Knobs for decoding. The default is the lenient baseline contract.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecodeOptions {
    /// Reject a vaccine programme whose `dates` length differs from the
    /// number of calendar rows.
    pub strict_calendar_dates: bool,
}

/// Knobs for encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Written for a state's `likelihood` when it has not been computed.
    pub likelihood_sentinel: f64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            // The host's NA_real.
            likelihood_sentinel: f64::NAN,
        }
    }
}

/// Host value -> typed structure.
pub trait Decode: Sized {
    fn decode(value: &GenericValue, opts: &DecodeOptions) -> Result<Self, DecodeError>;
}

/// Typed structure -> host value. Never fails.
pub trait Encode {
    fn encode(&self, opts: &EncodeOptions) -> GenericValue;
}

/// Decode with default (lenient) options.
pub fn decode<T: Decode>(value: &GenericValue) -> Result<T, DecodeError> {
    T::decode(value, &DecodeOptions::default())
}

/// Encode with default options.
pub fn encode<T: Encode>(item: &T) -> GenericValue {
    item.encode(&EncodeOptions::default())
}
