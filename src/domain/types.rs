//! Typed structures handed to the simulation engine.
//!
//! These are plain values: built once per decode call, immutable afterwards,
//! owned by whoever asked for them.

use chrono::NaiveDate;
use clap::ValueEnum;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Number of exact-age buckets in a contact survey histogram (ages 0..=89).
pub const AGE_HISTOGRAM_LEN: usize = 90;

/// Inclusive upper edges of the fixed age bands:
/// 0–4, 5–14, 15–24, 25–44, 45–64, 65+.
///
/// Infants share the 0–4 band; there is no separate band for age 0.
pub const AGE_GROUP_UPPER_EDGES: [u32; 5] = [4, 14, 24, 44, 64];

/// Number of age bands produced by [`age_group`].
pub const AGE_GROUP_COUNT: usize = AGE_GROUP_UPPER_EDGES.len() + 1;

/// Conventional `epsilon` length expected by the engine (not enforced).
pub const EPSILON_LEN: usize = 5;

/// Conventional `susceptibility` length expected by the engine (not enforced).
pub const SUSCEPTIBILITY_LEN: usize = 7;

/// Which structure a host value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// Vaccination programme (named list).
    Vaccine,
    /// Contact survey (integer matrix).
    Contacts,
    /// Model parameters (named list).
    Parameters,
    /// A single chain state (named list).
    State,
    /// A list of chain states.
    States,
}

impl StructureKind {
    pub fn display_name(self) -> &'static str {
        match self {
            StructureKind::Vaccine => "vaccine programme",
            StructureKind::Contacts => "contact survey",
            StructureKind::Parameters => "parameter set",
            StructureKind::State => "model state",
            StructureKind::States => "model states",
        }
    }

    /// Whether the structure can be written back to the host.
    pub fn is_encodable(self) -> bool {
        !matches!(self, StructureKind::Contacts)
    }
}

/// Age band index for an age in years: the number of band edges `age` exceeds.
pub fn age_group(age: u32) -> u8 {
    AGE_GROUP_UPPER_EDGES.iter().filter(|&&edge| age > edge).count() as u8
}

/// Human-readable label for an age band index.
pub fn age_group_label(group: u8) -> &'static str {
    match group {
        0 => "0-4",
        1 => "5-14",
        2 => "15-24",
        3 => "25-44",
        4 => "45-64",
        _ => "65+",
    }
}

/// A vaccination programme: per-age efficacy plus a dosing calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccineProgram {
    /// Efficacy per year of age.
    pub efficacy_age: Vec<f64>,
    /// Rows are time steps, columns are age groups.
    pub calendar: DMatrix<f64>,
    /// Calendar dates for the rows of `calendar`, if the host supplied them.
    ///
    /// `None` and `Some(vec![])` both mean "no dates" to the engine; the
    /// distinction only decides whether `dates` is written back on encode.
    pub dates: Option<Vec<NaiveDate>>,
}

impl VaccineProgram {
    /// Calendar dates, empty when none were supplied.
    pub fn dates(&self) -> &[NaiveDate] {
        self.dates.as_deref().unwrap_or(&[])
    }

    pub fn time_steps(&self) -> usize {
        self.calendar.nrows()
    }

    pub fn age_groups(&self) -> usize {
        self.calendar.ncols()
    }
}

/// One surveyed individual and their reported contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respondent {
    /// Row index in the survey matrix.
    pub id: usize,
    pub age: u32,
    pub is_weekend: bool,
    pub age_group: u8,
    /// Reported contacts per contact age bucket, as the host stored them.
    pub contact_counts: Vec<i64>,
}

/// Contact survey (e.g. POLYMOD) with derived aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSurvey {
    pub respondents: Vec<Respondent>,
    /// Respondent count per exact age.
    pub age_histogram: [u32; AGE_HISTOGRAM_LEN],
    pub weekend_respondent_count: usize,
}

impl ContactSurvey {
    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    pub fn weekday_respondent_count(&self) -> usize {
        self.respondents.len() - self.weekend_respondent_count
    }

    /// Respondent count per age band.
    pub fn age_group_totals(&self) -> [usize; AGE_GROUP_COUNT] {
        let mut totals = [0; AGE_GROUP_COUNT];
        for r in &self.respondents {
            totals[r.age_group as usize] += 1;
        }
        totals
    }
}

/// Model parameters sampled by the inference engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub epsilon: Vec<f64>,
    pub psi: f64,
    pub transmissibility: f64,
    pub susceptibility: Vec<f64>,
    pub init_pop: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            epsilon: vec![0.0; EPSILON_LEN],
            psi: 0.0,
            transmissibility: 0.0,
            susceptibility: vec![0.0; SUSCEPTIBILITY_LEN],
            init_pop: 0.0,
        }
    }
}

/// Current state of the model/MCMC chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    pub parameters: ParameterSet,
    pub time_infectious: f64,
    pub time_latent: f64,
    /// Indices into an externally owned [`ContactSurvey`]'s respondents.
    /// Transported only; never dereferenced here.
    pub contact_ids: Vec<usize>,
    /// `None` until the engine has computed it.
    pub likelihood: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bands_follow_fixed_edges() {
        let table = [
            (0, 0),
            (4, 0),
            (5, 1),
            (14, 1),
            (15, 2),
            (24, 2),
            (25, 3),
            (44, 3),
            (45, 4),
            (64, 4),
            (65, 5),
            (89, 5),
        ];
        for (age, group) in table {
            assert_eq!(age_group(age), group, "age {age}");
        }
    }

    #[test]
    fn absent_dates_read_as_empty() {
        let vac = VaccineProgram {
            efficacy_age: vec![0.5],
            calendar: DMatrix::zeros(3, 2),
            dates: None,
        };
        assert!(vac.dates().is_empty());
        assert_eq!((vac.time_steps(), vac.age_groups()), (3, 2));
    }

    #[test]
    fn default_parameters_use_engine_lengths() {
        let p = ParameterSet::default();
        assert_eq!(p.epsilon.len(), EPSILON_LEN);
        assert_eq!(p.susceptibility.len(), SUSCEPTIBILITY_LEN);
    }
}
