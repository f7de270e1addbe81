//! Contact survey decoding.
//!
//! The host supplies an integer matrix with one row per respondent:
//!
//! ```text
//! [age, weekend_flag, contacts_0, contacts_1, ...]
//! ```
//!
//! Survey data flows in only, so there is no encoder.

use crate::codec::decode_int_matrix;
use crate::convert::{Decode, DecodeOptions};
use crate::domain::{AGE_HISTOGRAM_LEN, ContactSurvey, Respondent, age_group};
use crate::error::DecodeError;
use crate::value::{GenericValue, Shape};

const AGE_COL: usize = 0;
const WEEKEND_COL: usize = 1;
const FIRST_COUNT_COL: usize = 2;

impl Decode for ContactSurvey {
    fn decode(value: &GenericValue, _opts: &DecodeOptions) -> Result<Self, DecodeError> {
        let raw = decode_int_matrix(value, "")?;
        if raw.ncols() < FIRST_COUNT_COL {
            return Err(DecodeError::mismatch("", Shape::IntMatrix));
        }

        let mut respondents = Vec::with_capacity(raw.nrows());
        let mut age_histogram = [0u32; AGE_HISTOGRAM_LEN];
        let mut weekend_respondent_count = 0;

        for (id, row) in raw.row_iter().enumerate() {
            let raw_age = row[AGE_COL];
            // The histogram has a fixed 90 buckets with no overflow bucket.
            let age = u32::try_from(raw_age)
                .ok()
                .filter(|&age| (age as usize) < AGE_HISTOGRAM_LEN)
                .ok_or_else(|| DecodeError::out_of_range(format!("age[{id}]"), raw_age as f64))?;
            let is_weekend = row[WEEKEND_COL] != 0;

            // Counts pass through as-is, host NA cells included.
            let contact_counts: Vec<i64> = row.iter().skip(FIRST_COUNT_COL).copied().collect();

            age_histogram[age as usize] += 1;
            if is_weekend {
                weekend_respondent_count += 1;
            }

            respondents.push(Respondent {
                id,
                age,
                is_weekend,
                age_group: age_group(age),
                contact_counts,
            });
        }

        log::debug!(
            "decoded contact survey: {} respondents ({} weekend), {} contact buckets",
            respondents.len(),
            weekend_respondent_count,
            raw.ncols() - FIRST_COUNT_COL
        );

        Ok(ContactSurvey {
            respondents,
            age_histogram,
            weekend_respondent_count,
        })
    }
}
