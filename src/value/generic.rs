//! The host's dynamic value model.
//!
//! Every value handed over by the host runtime is one of a small, closed set of
//! shapes. Keeping the set closed means every decode failure is one of a few
//! enumerable cases (see `codec::primitive`).
//!
//! Matrices are column-major, matching the host's storage order (and nalgebra's).

use chrono::NaiveDateTime;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::value::wire::WireValue;

/// A dynamically typed host value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireValue", try_from = "WireValue")]
pub enum GenericValue {
    Scalar(f64),
    IntVector(Vec<i64>),
    NumericVector(Vec<f64>),
    NumericMatrix(DMatrix<f64>),
    IntMatrix(DMatrix<i64>),
    /// Host date-times; only the calendar part is meaningful to this crate.
    DateSequence(Vec<NaiveDateTime>),
    Mapping(Mapping),
    /// An unnamed host list.
    List(Vec<GenericValue>),
    /// The host's `NULL`.
    Missing,
}

impl GenericValue {
    /// Short tag name, for diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            GenericValue::Scalar(_) => "scalar",
            GenericValue::IntVector(_) => "int_vector",
            GenericValue::NumericVector(_) => "numeric_vector",
            GenericValue::NumericMatrix(_) => "numeric_matrix",
            GenericValue::IntMatrix(_) => "int_matrix",
            GenericValue::DateSequence(_) => "dates",
            GenericValue::Mapping(_) => "mapping",
            GenericValue::List(_) => "list",
            GenericValue::Missing => "missing",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            GenericValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, GenericValue::Missing)
    }
}

impl From<f64> for GenericValue {
    fn from(value: f64) -> Self {
        GenericValue::Scalar(value)
    }
}

impl From<Vec<f64>> for GenericValue {
    fn from(value: Vec<f64>) -> Self {
        GenericValue::NumericVector(value)
    }
}

impl From<Vec<i64>> for GenericValue {
    fn from(value: Vec<i64>) -> Self {
        GenericValue::IntVector(value)
    }
}

impl From<DMatrix<f64>> for GenericValue {
    fn from(value: DMatrix<f64>) -> Self {
        GenericValue::NumericMatrix(value)
    }
}

impl From<DMatrix<i64>> for GenericValue {
    fn from(value: DMatrix<i64>) -> Self {
        GenericValue::IntMatrix(value)
    }
}

impl From<Mapping> for GenericValue {
    fn from(value: Mapping) -> Self {
        GenericValue::Mapping(value)
    }
}

/// Shapes a field can be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector,
    IndexSequence,
    Matrix,
    IntMatrix,
    DateSequence,
    Mapping,
    List,
}

impl Shape {
    pub fn label(self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Vector => "numeric vector",
            Shape::IndexSequence => "sequence of non-negative integers",
            Shape::Matrix => "numeric matrix",
            Shape::IntMatrix => "integer matrix",
            Shape::DateSequence => "date sequence",
            Shape::Mapping => "named list",
            Shape::List => "list",
        }
    }
}

/// A named host list.
///
/// Keys are unique: inserting an existing key replaces the value in place.
/// Iteration follows insertion order so encoded output is reproducible, but
/// equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, GenericValue)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert `value` under `key`, returning the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<GenericValue>) -> Option<GenericValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`Mapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<GenericValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&GenericValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<GenericValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenericValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl FromIterator<(String, GenericValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, GenericValue)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}
