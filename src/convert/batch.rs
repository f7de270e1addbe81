//! Unnamed host lists of structures (e.g. every sample of an MCMC chain).
//!
//! Elements are independent, so decoding fans out over rayon's pool. The
//! output keeps input order and the error reported is the one with the lowest
//! index.

use rayon::prelude::*;

use crate::codec::expect_list;
use crate::convert::{Decode, DecodeOptions, Encode, EncodeOptions};
use crate::error::DecodeError;
use crate::value::GenericValue;

pub fn decode_list<T>(value: &GenericValue, field: &str, opts: &DecodeOptions) -> Result<Vec<T>, DecodeError>
where
    T: Decode + Send,
{
    let items = expect_list(value, field)?;

    let decoded: Vec<Result<T, DecodeError>> = items
        .par_iter()
        .enumerate()
        .map(|(idx, item)| {
            T::decode(item, opts).map_err(|e| e.within(&format!("[{idx}]")).within(field))
        })
        .collect();

    let out = decoded.into_iter().collect::<Result<Vec<_>, _>>()?;
    log::debug!("decoded {} list elements", out.len());
    Ok(out)
}

pub fn encode_list<T>(items: &[T], opts: &EncodeOptions) -> GenericValue
where
    T: Encode + Sync,
{
    GenericValue::List(items.par_iter().map(|item| item.encode(opts)).collect())
}
