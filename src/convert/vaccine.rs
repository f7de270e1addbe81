//! Vaccination programme <-> host named list.
//!
//! Host layout:
//!
//! ```text
//! list(efficacy = <numeric vector>, calendar = <numeric matrix>, dates = <Date vector>?)
//! ```
//!
//! `dates` is optional metadata, not part of the calendar's structure. Its
//! length is not checked against the calendar rows unless the caller opts into
//! strict decoding; a mismatch otherwise only surfaces when the engine indexes
//! the two together.

use crate::codec::{
    decode_dates, decode_matrix, decode_optional_field, decode_vector, encode_dates, encode_matrix,
    encode_vector, expect_mapping, required_field,
};
use crate::convert::{Decode, DecodeOptions, Encode, EncodeOptions};
use crate::domain::VaccineProgram;
use crate::error::DecodeError;
use crate::value::{GenericValue, Mapping};

const EFFICACY: &str = "efficacy";
/// Also accepted on decode; never written.
const EFFICACY_ALIAS: &str = "efficacy_age";
const CALENDAR: &str = "calendar";
const DATES: &str = "dates";

impl Decode for VaccineProgram {
    fn decode(value: &GenericValue, opts: &DecodeOptions) -> Result<Self, DecodeError> {
        let mapping = expect_mapping(value, "")?;

        let (efficacy_key, efficacy) = match mapping.get(EFFICACY) {
            Some(v) => (EFFICACY, v),
            None => (
                EFFICACY_ALIAS,
                mapping
                    .get(EFFICACY_ALIAS)
                    .ok_or_else(|| DecodeError::missing(EFFICACY))?,
            ),
        };
        let efficacy_age = decode_vector(efficacy, efficacy_key)?;
        let calendar = decode_matrix(required_field(mapping, CALENDAR)?, CALENDAR)?;

        let dates = decode_optional_field(mapping, DATES)
            .map(|v| decode_dates(v, DATES))
            .transpose()?;

        if let Some(dates) = &dates {
            if dates.len() != calendar.nrows() {
                if opts.strict_calendar_dates {
                    return Err(DecodeError::LengthMismatch {
                        field: DATES.to_string(),
                        expected: calendar.nrows(),
                        found: dates.len(),
                    });
                }
                log::warn!(
                    "vaccine programme has {} dates for {} calendar rows",
                    dates.len(),
                    calendar.nrows()
                );
            }
        } else {
            log::debug!("vaccine programme has no dates");
        }

        log::debug!(
            "decoded vaccine programme: {} efficacy ages, calendar {}x{}",
            efficacy_age.len(),
            calendar.nrows(),
            calendar.ncols()
        );

        Ok(VaccineProgram {
            efficacy_age,
            calendar,
            dates,
        })
    }
}

impl Encode for VaccineProgram {
    fn encode(&self, _opts: &EncodeOptions) -> GenericValue {
        let mut mapping = Mapping::with_capacity(3)
            .with(EFFICACY, encode_vector(&self.efficacy_age))
            .with(CALENDAR, encode_matrix(&self.calendar));
        if let Some(dates) = &self.dates {
            mapping.insert(DATES, encode_dates(dates));
        }
        GenericValue::Mapping(mapping)
    }
}
