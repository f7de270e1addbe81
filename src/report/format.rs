//! Plain-text summaries of decoded structures.
//!
//! Formatting lives here so converters stay free of presentation code.

use crate::app::pipeline::Decoded;
use crate::domain::{ContactSurvey, ModelState, ParameterSet, VaccineProgram, age_group_label};

/// Format a summary for any decoded structure.
pub fn format_summary(decoded: &Decoded) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== flubridge - {} ===\n", decoded.kind().display_name()));

    match decoded {
        Decoded::Vaccine(v) => out.push_str(&format_vaccine(v)),
        Decoded::Contacts(c) => out.push_str(&format_contacts(c)),
        Decoded::Parameters(p) => out.push_str(&format_parameters(p)),
        Decoded::State(s) => out.push_str(&format_state(s)),
        Decoded::States(states) => {
            out.push_str(&format!("States: n={}\n", states.len()));
            let computed: Vec<f64> = states.iter().filter_map(|s| s.likelihood).collect();
            out.push_str(&format!("Likelihood computed: {}/{}\n", computed.len(), states.len()));
            if let Some(best) = computed.iter().copied().filter(|v| !v.is_nan()).reduce(f64::max) {
                out.push_str(&format!("Best likelihood: {best:.4}\n"));
            }
        }
    }

    out
}

fn format_vaccine(v: &VaccineProgram) -> String {
    let mut out = String::new();
    out.push_str(&format!("Efficacy: {} ages | {}\n", v.efficacy_age.len(), fmt_range(&v.efficacy_age)));
    out.push_str(&format!("Calendar: {} steps x {} groups\n", v.time_steps(), v.age_groups()));
    let dates = v.dates();
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => out.push_str(&format!("Dates: n={} | {first} .. {last}\n", dates.len())),
        _ if v.dates.is_some() => out.push_str("Dates: (empty)\n"),
        _ => out.push_str("Dates: (none)\n"),
    }
    if !dates.is_empty() && dates.len() != v.time_steps() {
        out.push_str("Warning: date count differs from calendar rows\n");
    }
    out
}

fn format_contacts(c: &ContactSurvey) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Respondents: n={} | weekend={} | weekday={}\n",
        c.len(),
        c.weekend_respondent_count,
        c.weekday_respondent_count()
    ));
    out.push_str("Age groups:\n");
    for (group, total) in c.age_group_totals().iter().enumerate() {
        out.push_str(&format!("  {:<6} {total:>6}\n", age_group_label(group as u8)));
    }
    out
}

fn format_parameters(p: &ParameterSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("- epsilon         : {}\n", fmt_vec(&p.epsilon)));
    out.push_str(&format!("- psi             : {:.6}\n", p.psi));
    out.push_str(&format!("- transmissibility: {:.6}\n", p.transmissibility));
    out.push_str(&format!("- susceptibility  : {}\n", fmt_vec(&p.susceptibility)));
    out.push_str(&format!("- init_pop        : {:.6}\n", p.init_pop));
    out
}

fn format_state(s: &ModelState) -> String {
    let mut out = format_parameters(&s.parameters);
    out.push_str(&format!("- time_infectious : {:.6}\n", s.time_infectious));
    out.push_str(&format!("- time_latent     : {:.6}\n", s.time_latent));
    out.push_str(&format!("- contact_ids     : n={}\n", s.contact_ids.len()));
    match s.likelihood {
        Some(l) => out.push_str(&format!("- likelihood      : {l:.6}\n")),
        None => out.push_str("- likelihood      : (not computed)\n"),
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_range(v: &[f64]) -> String {
    let min = v.iter().copied().reduce(f64::min);
    let max = v.iter().copied().reduce(f64::max);
    match (min, max) {
        (Some(min), Some(max)) => format!("[{min:.4}, {max:.4}]"),
        _ => "[]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::*;

    #[test]
    fn vaccine_summary_distinguishes_absent_and_empty_dates() {
        let mut v = VaccineProgram {
            efficacy_age: vec![0.3, 0.7],
            calendar: DMatrix::zeros(4, 7),
            dates: None,
        };
        let text = format_summary(&Decoded::Vaccine(v.clone()));
        assert!(text.contains("Calendar: 4 steps x 7 groups"));
        assert!(text.contains("Dates: (none)"));
        assert!(text.contains("[0.3000, 0.7000]"));

        v.dates = Some(Vec::new());
        assert!(format_summary(&Decoded::Vaccine(v)).contains("Dates: (empty)"));
    }

    #[test]
    fn state_summary_marks_uncomputed_likelihood() {
        let s = ModelState {
            parameters: ParameterSet::default(),
            time_infectious: 1.0,
            time_latent: 0.5,
            contact_ids: vec![1, 2, 3],
            likelihood: None,
        };
        let text = format_summary(&Decoded::State(s.clone()));
        assert!(text.contains("contact_ids     : n=3"));
        assert!(text.contains("(not computed)"));

        let text = format_summary(&Decoded::States(vec![
            s.clone(),
            ModelState {
                likelihood: Some(-12.5),
                ..s
            },
        ]));
        assert!(text.contains("Likelihood computed: 1/2"));
        assert!(text.contains("Best likelihood: -12.5000"));
    }
}
