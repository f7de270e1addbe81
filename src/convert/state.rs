//! Chain state <-> host named list.
//!
//! `likelihood` is optional on decode (absent or NA means "not computed yet",
//! not zero) but always written on encode so the host sees a stable shape; an
//! uncomputed likelihood is written as [`EncodeOptions::likelihood_sentinel`].

use crate::codec::{
    decode_index_seq, decode_optional_field, decode_scalar, encode_index_seq, encode_scalar, expect_mapping,
    required_field,
};
use crate::convert::{Decode, DecodeOptions, Encode, EncodeOptions};
use crate::domain::{ModelState, ParameterSet};
use crate::error::DecodeError;
use crate::value::{GenericValue, Mapping};

const PARAMETERS: &str = "parameters";
const TIME_INFECTIOUS: &str = "time_infectious";
const TIME_LATENT: &str = "time_latent";
const CONTACT_IDS: &str = "contact_ids";
const LIKELIHOOD: &str = "likelihood";

impl Decode for ModelState {
    fn decode(value: &GenericValue, opts: &DecodeOptions) -> Result<Self, DecodeError> {
        let mapping = expect_mapping(value, "")?;

        let parameters = ParameterSet::decode(required_field(mapping, PARAMETERS)?, opts)
            .map_err(|e| e.within(PARAMETERS))?;
        let time_infectious = decode_scalar(required_field(mapping, TIME_INFECTIOUS)?, TIME_INFECTIOUS)?;
        let time_latent = decode_scalar(required_field(mapping, TIME_LATENT)?, TIME_LATENT)?;
        let contact_ids = decode_index_seq(required_field(mapping, CONTACT_IDS)?, CONTACT_IDS)?;
        let likelihood = decode_optional_field(mapping, LIKELIHOOD)
            .map(|v| decode_scalar(v, LIKELIHOOD))
            .transpose()?
            .filter(|v| !v.is_nan());

        Ok(ModelState {
            parameters,
            time_infectious,
            time_latent,
            contact_ids,
            likelihood,
        })
    }
}

impl Encode for ModelState {
    fn encode(&self, opts: &EncodeOptions) -> GenericValue {
        Mapping::with_capacity(5)
            .with(PARAMETERS, self.parameters.encode(opts))
            .with(TIME_INFECTIOUS, encode_scalar(self.time_infectious))
            .with(TIME_LATENT, encode_scalar(self.time_latent))
            .with(CONTACT_IDS, encode_index_seq(&self.contact_ids))
            .with(
                LIKELIHOOD,
                encode_scalar(self.likelihood.unwrap_or(opts.likelihood_sentinel)),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use rand::rngs::StdRng;

    use super::*;
    use crate::convert::{decode, encode};
    use crate::value::Shape;

    fn state(likelihood: Option<f64>) -> ModelState {
        ModelState {
            parameters: ParameterSet {
                epsilon: vec![0.1, 0.2, 0.3, 0.4, 0.5],
                psi: 0.6,
                transmissibility: 0.15,
                susceptibility: vec![0.9; 7],
                init_pop: -5.0,
            },
            time_infectious: 1.4,
            time_latent: 0.8,
            contact_ids: vec![0, 17, 3],
            likelihood,
        }
    }

    #[test]
    fn round_trips_with_likelihood() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut s = state(Some(rng.gen_range(-1e4..0.0)));
            s.contact_ids = (0..rng.gen_range(0..50)).map(|_| rng.gen_range(0..1000)).collect();
            assert_eq!(decode::<ModelState>(&encode(&s)).unwrap(), s);
        }
    }

    #[test]
    fn absent_likelihood_decodes_as_none() {
        let GenericValue::Mapping(mut host) = encode(&state(Some(-10.0))) else {
            panic!("expected a mapping");
        };
        host.remove(LIKELIHOOD);
        let s: ModelState = decode(&host.clone().into()).unwrap();
        assert_eq!(s.likelihood, None);

        host.insert(LIKELIHOOD, GenericValue::Missing);
        let s: ModelState = decode(&host.into()).unwrap();
        assert_eq!(s.likelihood, None);
    }

    #[test]
    fn uncomputed_likelihood_survives_default_round_trip() {
        let s = state(None);
        let once: ModelState = decode(&encode(&s)).unwrap();
        assert_eq!(once, s);
        let twice: ModelState = decode(&encode(&once)).unwrap();
        assert_eq!(twice, s);

        let GenericValue::Mapping(mut host) = encode(&s) else {
            panic!("expected a mapping");
        };
        host.insert(LIKELIHOOD, vec![f64::NAN]);
        assert_eq!(decode::<ModelState>(&host.into()).unwrap().likelihood, None);
    }

    #[test]
    fn absent_likelihood_is_written_as_sentinel() {
        let opts = EncodeOptions {
            likelihood_sentinel: -1e10,
        };
        let encoded = state(None).encode(&opts);
        assert_eq!(
            encoded.as_mapping().unwrap().get(LIKELIHOOD),
            Some(&GenericValue::Scalar(-1e10))
        );

        let default = encode(&state(None));
        let written = default.as_mapping().unwrap().get(LIKELIHOOD);
        assert!(matches!(written, Some(GenericValue::Scalar(v)) if v.is_nan()));
    }

    #[test]
    fn nested_parameter_errors_carry_the_path() {
        let GenericValue::Mapping(mut host) = encode(&state(None)) else {
            panic!("expected a mapping");
        };
        let GenericValue::Mapping(mut params) = host.remove(PARAMETERS).unwrap() else {
            panic!("expected nested parameters");
        };
        params.remove("psi");
        host.insert(PARAMETERS, params);

        let err = decode::<ModelState>(&host.clone().into()).unwrap_err();
        assert_eq!(err, DecodeError::missing("parameters.psi"));

        host.insert(PARAMETERS, 1.0);
        let err = decode::<ModelState>(&host.into()).unwrap_err();
        assert_eq!(err, DecodeError::mismatch("parameters", Shape::Mapping));
    }

    #[test]
    fn required_timing_fields() {
        let GenericValue::Mapping(mut host) = encode(&state(Some(0.0))) else {
            panic!("expected a mapping");
        };
        host.remove(TIME_LATENT);
        let err = decode::<ModelState>(&host.into()).unwrap_err();
        assert_eq!(err, DecodeError::missing("time_latent"));
    }
}
