//! Model parameters <-> host named list.
//!
//! A typed projection only: lengths and ranges are the engine's business.

use crate::codec::{decode_scalar, decode_vector, encode_scalar, encode_vector, expect_mapping, required_field};
use crate::convert::{Decode, DecodeOptions, Encode, EncodeOptions};
use crate::domain::ParameterSet;
use crate::error::DecodeError;
use crate::value::{GenericValue, Mapping};

const EPSILON: &str = "epsilon";
const PSI: &str = "psi";
const TRANSMISSIBILITY: &str = "transmissibility";
const SUSCEPTIBILITY: &str = "susceptibility";
const INIT_POP: &str = "init_pop";

impl Decode for ParameterSet {
    fn decode(value: &GenericValue, _opts: &DecodeOptions) -> Result<Self, DecodeError> {
        let mapping = expect_mapping(value, "")?;
        let vector = |field: &str| decode_vector(required_field(mapping, field)?, field);
        let scalar = |field: &str| decode_scalar(required_field(mapping, field)?, field);

        Ok(ParameterSet {
            epsilon: vector(EPSILON)?,
            psi: scalar(PSI)?,
            transmissibility: scalar(TRANSMISSIBILITY)?,
            susceptibility: vector(SUSCEPTIBILITY)?,
            init_pop: scalar(INIT_POP)?,
        })
    }
}

impl Encode for ParameterSet {
    fn encode(&self, _opts: &EncodeOptions) -> GenericValue {
        Mapping::with_capacity(5)
            .with(EPSILON, encode_vector(&self.epsilon))
            .with(PSI, encode_scalar(self.psi))
            .with(TRANSMISSIBILITY, encode_scalar(self.transmissibility))
            .with(SUSCEPTIBILITY, encode_vector(&self.susceptibility))
            .with(INIT_POP, encode_scalar(self.init_pop))
            .into()
    }
}
