//! Host date sequences -> plain calendar dates.
//!
//! Downstream calendar indexing is daily, so any time-of-day the host carries is
//! dropped. The host's calendar fields are taken verbatim; there is no timezone
//! normalization.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DecodeError;
use crate::value::{GenericValue, Shape};

pub fn decode_dates(value: &GenericValue, field: &str) -> Result<Vec<NaiveDate>, DecodeError> {
    match value {
        GenericValue::DateSequence(dates) => Ok(dates.iter().map(NaiveDateTime::date).collect()),
        _ => Err(DecodeError::mismatch(field, Shape::DateSequence)),
    }
}

pub fn encode_dates(dates: &[NaiveDate]) -> GenericValue {
    GenericValue::DateSequence(dates.iter().map(|d| d.and_time(NaiveTime::MIN)).collect())
}

/// Convert the host's numeric date representation (days since 1970-01-01,
/// fraction = time of day) into a host date-time.
///
/// Returns `None` for non-finite input or dates outside chrono's range.
pub fn date_from_epoch_days(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?.and_time(NaiveTime::MIN);
    let whole = days.floor();
    let seconds = ((days - whole) * 86_400.0).round() as i64;
    let offset = Duration::try_days(whole as i64)?.checked_add(&Duration::try_seconds(seconds)?)?;
    epoch.checked_add_signed(offset)
}
