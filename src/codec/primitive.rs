//! Shape-checked extraction of primitive fields from host values.
//!
//! Every decoder takes the field name it is reading so failures can name it.
//! The host has no true scalars (a scalar is a length-1 vector) and freely
//! mixes integer and double storage, so the decoders accept those spellings:
//!
//! | decoder            | accepts                                              |
//! |--------------------|------------------------------------------------------|
//! | `decode_scalar`    | scalar, length-1 numeric/int vector                  |
//! | `decode_vector`    | numeric/int vector, scalar                           |
//! | `decode_matrix`    | numeric/int matrix                                   |
//! | `decode_int_matrix`| int matrix, numeric matrix with integral entries     |
//! | `decode_index_seq` | int vector, numeric vector with integral entries, scalar |

use nalgebra::DMatrix;

use crate::error::DecodeError;
use crate::value::{GenericValue, Mapping, Shape};

/// Look up a required key.
pub fn required_field<'a>(mapping: &'a Mapping, field: &str) -> Result<&'a GenericValue, DecodeError> {
    mapping.get(field).ok_or_else(|| DecodeError::missing(field))
}

/// Look up an optional key; an explicit host `NULL` counts as absent.
pub fn decode_optional_field<'a>(mapping: &'a Mapping, field: &str) -> Option<&'a GenericValue> {
    mapping.get(field).filter(|v| !v.is_missing())
}

pub fn expect_mapping<'a>(value: &'a GenericValue, field: &str) -> Result<&'a Mapping, DecodeError> {
    value
        .as_mapping()
        .ok_or_else(|| DecodeError::mismatch(field, Shape::Mapping))
}

pub fn expect_list<'a>(value: &'a GenericValue, field: &str) -> Result<&'a [GenericValue], DecodeError> {
    match value {
        GenericValue::List(items) => Ok(items),
        _ => Err(DecodeError::mismatch(field, Shape::List)),
    }
}

pub fn decode_scalar(value: &GenericValue, field: &str) -> Result<f64, DecodeError> {
    match value {
        GenericValue::Scalar(v) => Ok(*v),
        GenericValue::NumericVector(v) if v.len() == 1 => Ok(v[0]),
        GenericValue::IntVector(v) if v.len() == 1 => Ok(v[0] as f64),
        _ => Err(DecodeError::mismatch(field, Shape::Scalar)),
    }
}

pub fn decode_vector(value: &GenericValue, field: &str) -> Result<Vec<f64>, DecodeError> {
    match value {
        GenericValue::NumericVector(v) => Ok(v.clone()),
        GenericValue::IntVector(v) => Ok(v.iter().map(|&x| x as f64).collect()),
        GenericValue::Scalar(v) => Ok(vec![*v]),
        _ => Err(DecodeError::mismatch(field, Shape::Vector)),
    }
}

pub fn decode_matrix(value: &GenericValue, field: &str) -> Result<DMatrix<f64>, DecodeError> {
    match value {
        GenericValue::NumericMatrix(m) => Ok(m.clone()),
        GenericValue::IntMatrix(m) => Ok(m.map(|x| x as f64)),
        _ => Err(DecodeError::mismatch(field, Shape::Matrix)),
    }
}

pub fn decode_int_matrix(value: &GenericValue, field: &str) -> Result<DMatrix<i64>, DecodeError> {
    match value {
        GenericValue::IntMatrix(m) => Ok(m.clone()),
        GenericValue::NumericMatrix(m) if m.iter().all(|&x| is_integral(x)) => Ok(m.map(|x| x as i64)),
        _ => Err(DecodeError::mismatch(field, Shape::IntMatrix)),
    }
}

/// Decode a sequence of non-negative indices.
///
/// A non-integral entry is a shape error; a negative one is out of range.
pub fn decode_index_seq(value: &GenericValue, field: &str) -> Result<Vec<usize>, DecodeError> {
    let raw: Vec<i64> = match value {
        GenericValue::IntVector(v) => v.clone(),
        GenericValue::NumericVector(v) if v.iter().all(|&x| is_integral(x)) => {
            v.iter().map(|&x| x as i64).collect()
        }
        GenericValue::Scalar(x) if is_integral(*x) => vec![*x as i64],
        _ => return Err(DecodeError::mismatch(field, Shape::IndexSequence)),
    };

    raw.into_iter()
        .enumerate()
        .map(|(i, x)| {
            usize::try_from(x).map_err(|_| DecodeError::out_of_range(format!("{field}[{i}]"), x as f64))
        })
        .collect()
}

fn is_integral(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

pub fn encode_scalar(value: f64) -> GenericValue {
    GenericValue::Scalar(value)
}

pub fn encode_vector(values: &[f64]) -> GenericValue {
    GenericValue::NumericVector(values.to_vec())
}

pub fn encode_matrix(matrix: &DMatrix<f64>) -> GenericValue {
    GenericValue::NumericMatrix(matrix.clone())
}

pub fn encode_index_seq(indices: &[usize]) -> GenericValue {
    GenericValue::IntVector(indices.iter().map(|&i| i as i64).collect())
}
