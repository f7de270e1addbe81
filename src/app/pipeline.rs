//! Kind-directed decode/encode used by the CLI.
//!
//! The host normally knows which converter to call; for offline dumps the
//! caller names the kind explicitly and this module dispatches.

use crate::convert::{Decode, DecodeOptions, Encode, EncodeOptions, decode_list, encode_list};
use crate::domain::{ContactSurvey, ModelState, ParameterSet, StructureKind, VaccineProgram};
use crate::error::DecodeError;
use crate::value::GenericValue;

/// A decoded structure of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Vaccine(VaccineProgram),
    Contacts(ContactSurvey),
    Parameters(ParameterSet),
    State(ModelState),
    States(Vec<ModelState>),
}

impl Decoded {
    pub fn kind(&self) -> StructureKind {
        match self {
            Decoded::Vaccine(_) => StructureKind::Vaccine,
            Decoded::Contacts(_) => StructureKind::Contacts,
            Decoded::Parameters(_) => StructureKind::Parameters,
            Decoded::State(_) => StructureKind::State,
            Decoded::States(_) => StructureKind::States,
        }
    }

    /// Encode back to a host value; `None` for input-only kinds.
    pub fn encode(&self, opts: &EncodeOptions) -> Option<GenericValue> {
        match self {
            Decoded::Vaccine(v) => Some(v.encode(opts)),
            Decoded::Contacts(_) => None,
            Decoded::Parameters(p) => Some(p.encode(opts)),
            Decoded::State(s) => Some(s.encode(opts)),
            Decoded::States(s) => Some(encode_list(s, opts)),
        }
    }
}

/// Decode `value` as `kind`.
pub fn decode_as(kind: StructureKind, value: &GenericValue, opts: &DecodeOptions) -> Result<Decoded, DecodeError> {
    log::debug!("decoding {} from a host {}", kind.display_name(), value.tag());
    let decoded = match kind {
        StructureKind::Vaccine => Decoded::Vaccine(VaccineProgram::decode(value, opts)?),
        StructureKind::Contacts => Decoded::Contacts(ContactSurvey::decode(value, opts)?),
        StructureKind::Parameters => Decoded::Parameters(ParameterSet::decode(value, opts)?),
        StructureKind::State => Decoded::State(ModelState::decode(value, opts)?),
        StructureKind::States => Decoded::States(decode_list(value, "", opts)?),
    };
    log::info!("decoded {}", kind.display_name());
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::*;
    use crate::value::Mapping;

    #[test]
    fn contacts_have_no_encoding() {
        let value = GenericValue::IntMatrix(DMatrix::from_row_slice(1, 3, &[10, 0, 2]));
        let decoded = decode_as(StructureKind::Contacts, &value, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded.kind(), StructureKind::Contacts);
        assert!(decoded.encode(&EncodeOptions::default()).is_none());
    }

    #[test]
    fn parameters_dispatch_round_trip() {
        let value: GenericValue = Mapping::new()
            .with("epsilon", vec![0.1; 5])
            .with("psi", 0.5)
            .with("transmissibility", 0.2)
            .with("susceptibility", vec![0.8; 7])
            .with("init_pop", 1.0)
            .into();
        let decoded = decode_as(StructureKind::Parameters, &value, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded.encode(&EncodeOptions::default()), Some(value));
    }

    #[test]
    fn wrong_kind_fails() {
        let value = GenericValue::IntMatrix(DMatrix::from_row_slice(1, 3, &[10, 0, 2]));
        let err = decode_as(StructureKind::State, &value, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }
}
