//! Domain types consumed by the simulation engine.
//!
//! This module defines:
//!
//! - the vaccination programme (`VaccineProgram`)
//! - contact survey data (`ContactSurvey`, `Respondent`) and the fixed age bands
//! - model parameters and chain state (`ParameterSet`, `ModelState`)

pub mod types;

pub use types::*;
