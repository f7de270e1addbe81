//! JSON interchange form of [`GenericValue`].
//!
//! Host dumps are written as externally tagged JSON:
//!
//! ```text
//! {"scalar": 0.5}
//! {"numeric_matrix": {"nrow": 2, "ncol": 3, "data": [..column-major..]}}
//! {"dates": ["2020-01-06", "2020-01-13T12:00:00"]}
//! {"mapping": {"psi": {"scalar": 0.5}, ...}}
//! "missing"
//! ```
//!
//! JSON has no NaN, so `null` in a numeric slot carries the host's NA (NaN).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nalgebra::DMatrix;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{GenericValue, Mapping};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WireValue {
    Scalar(Option<f64>),
    IntVector(Vec<i64>),
    NumericVector(Vec<Option<f64>>),
    NumericMatrix(WireMatrix<Option<f64>>),
    IntMatrix(WireMatrix<i64>),
    Dates(Vec<String>),
    Mapping(Mapping),
    List(Vec<GenericValue>),
    Missing,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct WireMatrix<T> {
    nrow: usize,
    ncol: usize,
    data: Vec<T>,
}

impl<T> WireMatrix<T> {
    fn from_matrix<S: nalgebra::Scalar>(m: &DMatrix<S>, f: impl Fn(&S) -> T) -> Self {
        Self {
            nrow: m.nrows(),
            ncol: m.ncols(),
            data: m.as_slice().iter().map(f).collect(),
        }
    }

    fn into_matrix<S: nalgebra::Scalar>(self, f: impl Fn(T) -> S) -> Result<DMatrix<S>, String> {
        let expected = self
            .nrow
            .checked_mul(self.ncol)
            .ok_or_else(|| format!("matrix {}x{} is too large", self.nrow, self.ncol))?;
        if self.data.len() != expected {
            return Err(format!(
                "matrix {}x{} needs {expected} elements, got {}",
                self.nrow,
                self.ncol,
                self.data.len()
            ));
        }
        let data = self.data.into_iter().map(f).collect();
        Ok(DMatrix::from_vec(self.nrow, self.ncol, data))
    }
}

fn to_wire_number(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(v) }
}

fn from_wire_number(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

/// Format a host date-time, dropping the time part when it is midnight.
pub fn format_host_datetime(dt: &NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format(DATE_FMT).to_string()
    } else {
        dt.format(DATETIME_FMT).to_string()
    }
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_host_datetime(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FMT) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| format!("invalid host date '{s}': {e}"))
}

impl From<GenericValue> for WireValue {
    fn from(value: GenericValue) -> Self {
        match value {
            GenericValue::Scalar(v) => WireValue::Scalar(to_wire_number(v)),
            GenericValue::IntVector(v) => WireValue::IntVector(v),
            GenericValue::NumericVector(v) => {
                WireValue::NumericVector(v.into_iter().map(to_wire_number).collect())
            }
            GenericValue::NumericMatrix(m) => {
                WireValue::NumericMatrix(WireMatrix::from_matrix(&m, |v| to_wire_number(*v)))
            }
            GenericValue::IntMatrix(m) => WireValue::IntMatrix(WireMatrix::from_matrix(&m, |v| *v)),
            GenericValue::DateSequence(d) => {
                WireValue::Dates(d.iter().map(format_host_datetime).collect())
            }
            GenericValue::Mapping(m) => WireValue::Mapping(m),
            GenericValue::List(l) => WireValue::List(l),
            GenericValue::Missing => WireValue::Missing,
        }
    }
}

impl TryFrom<WireValue> for GenericValue {
    type Error = String;

    fn try_from(value: WireValue) -> Result<Self, Self::Error> {
        Ok(match value {
            WireValue::Scalar(v) => GenericValue::Scalar(from_wire_number(v)),
            WireValue::IntVector(v) => GenericValue::IntVector(v),
            WireValue::NumericVector(v) => {
                GenericValue::NumericVector(v.into_iter().map(from_wire_number).collect())
            }
            WireValue::NumericMatrix(m) => GenericValue::NumericMatrix(m.into_matrix(from_wire_number)?),
            WireValue::IntMatrix(m) => GenericValue::IntMatrix(m.into_matrix(|v| v)?),
            WireValue::Dates(d) => GenericValue::DateSequence(
                d.iter()
                    .map(|s| parse_host_datetime(s))
                    .collect::<Result<_, _>>()?,
            ),
            WireValue::Mapping(m) => GenericValue::Mapping(m),
            WireValue::List(l) => GenericValue::List(l),
            WireValue::Missing => GenericValue::Missing,
        })
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = Mapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to host values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Mapping, A::Error> {
        let mut mapping = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, GenericValue>()? {
            if mapping.contains_key(&key) {
                return Err(serde::de::Error::custom(format!("duplicate field '{key}'")));
            }
            mapping.insert(key, value);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}
