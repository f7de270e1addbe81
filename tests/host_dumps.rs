use chrono::NaiveDate;
use flu_bridge::app::pipeline::{Decoded, decode_as};
use flu_bridge::convert::{DecodeOptions, Encode, EncodeOptions, decode, encode};
use flu_bridge::domain::{ContactSurvey, ModelState, StructureKind, VaccineProgram};
use flu_bridge::error::DecodeError;
use flu_bridge::io::{value_from_json_str, value_to_json_string};
use flu_bridge::value::Shape;

const VACCINE_JSON: &str = r#"{
  "mapping": {
    "efficacy": {"numeric_vector": [0.7, 0.7, 0.6]},
    "calendar": {"numeric_matrix": {"nrow": 2, "ncol": 3, "data": [0.1, 0.0, 0.2, 0.0, 0.3, 0.0]}},
    "dates": {"dates": ["2010-10-01T08:00:00", "2010-10-08"]}
  }
}"#;

const STATE_JSON: &str = r#"{
  "mapping": {
    "parameters": {"mapping": {
      "epsilon": {"numeric_vector": [0.01, 0.02, 0.03, 0.04, 0.05]},
      "psi": {"scalar": 0.00005},
      "transmissibility": {"scalar": 0.16},
      "susceptibility": {"numeric_vector": [0.7, 0.7, 0.7, 0.65, 0.65, 0.65, 0.6]},
      "init_pop": {"scalar": -12.0}
    }},
    "time_infectious": {"scalar": 1.1},
    "time_latent": {"scalar": 0.8},
    "contact_ids": {"int_vector": [4, 8, 15, 16, 23, 42]}
  }
}"#;

#[test]
fn vaccine_dump_decodes_with_day_granularity() {
    let value = value_from_json_str(VACCINE_JSON).unwrap();
    let vac: VaccineProgram = decode(&value).unwrap();

    assert_eq!(vac.calendar.nrows(), 2);
    assert_eq!(vac.calendar[(0, 1)], 0.2);
    assert_eq!(vac.calendar[(0, 2)], 0.3);
    assert_eq!(
        vac.dates(),
        &[
            NaiveDate::from_ymd_opt(2010, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2010, 10, 8).unwrap()
        ]
    );

    let text = value_to_json_string(&encode(&vac)).unwrap();
    assert!(text.contains("\"2010-10-01\""));
    assert!(!text.contains("08:00:00"));
}

#[test]
fn contact_scenario_from_json() {
    let json = r#"{"int_matrix": {"nrow": 2, "ncol": 4, "data": [2, 70, 0, 1, 1, 0, 3, 0]}}"#;
    let survey: ContactSurvey = decode(&value_from_json_str(json).unwrap()).unwrap();

    assert_eq!(survey.respondents[0].age, 2);
    assert_eq!(survey.respondents[0].age_group, 0);
    assert_eq!(survey.respondents[0].contact_counts, vec![1, 3]);
    assert_eq!(survey.respondents[1].age, 70);
    assert_eq!(survey.respondents[1].age_group, 5);
    assert!(survey.respondents[1].is_weekend);
    assert_eq!(survey.age_histogram[2], 1);
    assert_eq!(survey.age_histogram[70], 1);
    assert_eq!(survey.weekend_respondent_count, 1);
}

#[test]
fn state_without_likelihood_gains_sentinel_through_json() {
    let value = value_from_json_str(STATE_JSON).unwrap();
    let state: ModelState = decode(&value).unwrap();
    assert_eq!(state.likelihood, None);
    assert_eq!(state.contact_ids, vec![4, 8, 15, 16, 23, 42]);

    let opts = EncodeOptions {
        likelihood_sentinel: -1e9,
    };
    let text = value_to_json_string(&state.encode(&opts)).unwrap();
    let again: ModelState = decode(&value_from_json_str(&text).unwrap()).unwrap();
    assert_eq!(again.likelihood, Some(-1e9));
    assert_eq!(again.parameters, state.parameters);

    let nan_text = value_to_json_string(&encode(&state)).unwrap();
    assert!(nan_text.contains("null"));
    let na: ModelState = decode(&value_from_json_str(&nan_text).unwrap()).unwrap();
    assert_eq!(na, state);
}

#[test]
fn state_list_dispatch() {
    let list = format!(r#"{{"list": [{STATE_JSON}, {STATE_JSON}]}}"#);
    let value = value_from_json_str(&list).unwrap();
    let decoded = decode_as(StructureKind::States, &value, &DecodeOptions::default()).unwrap();
    let Decoded::States(states) = &decoded else {
        panic!("expected states");
    };
    assert_eq!(states.len(), 2);

    let broken = list.replacen("\"time_latent\"", "\"time_latent_days\"", 1);
    let err = decode_as(
        StructureKind::States,
        &value_from_json_str(&broken).unwrap(),
        &DecodeOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, DecodeError::missing("[0].time_latent"));
}

#[test]
fn calendar_scalar_is_rejected_through_json() {
    let json = VACCINE_JSON.replacen(
        r#"{"numeric_matrix": {"nrow": 2, "ncol": 3, "data": [0.1, 0.0, 0.2, 0.0, 0.3, 0.0]}}"#,
        r#"{"scalar": 1.0}"#,
        1,
    );
    let err = decode::<VaccineProgram>(&value_from_json_str(&json).unwrap()).unwrap_err();
    assert_eq!(err, DecodeError::mismatch("calendar", Shape::Matrix));
}
