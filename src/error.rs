use crate::value::Shape;

/// Failure surfaced by the `flubridge` binary.
///
/// Library code reports [`DecodeError`]; the binary folds those (and I/O
/// failures) into an exit code plus a human-readable message.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::new(3, format!("Decode failed: {err}"))
    }
}

/// Why a host value could not be turned into a typed structure.
///
/// `field` is a dotted path (`parameters.psi`, `states[3].likelihood`) so the
/// host can point its user at the offending entry.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A required mapping key is absent.
    MissingField { field: String },
    /// The value's tag does not match the shape the field requires.
    TypeMismatch { field: String, expected: Shape },
    /// Structurally valid, but outside a fixed domain bound.
    OutOfRange { field: String, value: f64 },
    /// Two related fields disagree in length (strict decoding only).
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
}

impl DecodeError {
    pub fn missing(field: impl Into<String>) -> Self {
        DecodeError::MissingField { field: field.into() }
    }

    pub fn mismatch(field: impl Into<String>, expected: Shape) -> Self {
        DecodeError::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    pub fn out_of_range(field: impl Into<String>, value: f64) -> Self {
        DecodeError::OutOfRange {
            field: field.into(),
            value,
        }
    }

    /// Field path the error refers to.
    pub fn field(&self) -> &str {
        match self {
            DecodeError::MissingField { field }
            | DecodeError::TypeMismatch { field, .. }
            | DecodeError::OutOfRange { field, .. }
            | DecodeError::LengthMismatch { field, .. } => field,
        }
    }

    /// Prefix the field path with the enclosing field, e.g. `psi` -> `parameters.psi`.
    ///
    /// An empty path denotes the value being decoded itself.
    pub fn within(mut self, parent: &str) -> Self {
        if parent.is_empty() {
            return self;
        }
        let field = match &mut self {
            DecodeError::MissingField { field }
            | DecodeError::TypeMismatch { field, .. }
            | DecodeError::OutOfRange { field, .. }
            | DecodeError::LengthMismatch { field, .. } => field,
        };
        *field = if field.is_empty() {
            parent.to_string()
        } else if field.starts_with('[') {
            format!("{parent}{field}")
        } else {
            format!("{parent}.{field}")
        };
        self
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field().is_empty() {
            return match self {
                DecodeError::TypeMismatch { expected, .. } => {
                    write!(f, "value is not a {}", expected.label())
                }
                other => write!(f, "{}", other.clone().within("value")),
            };
        }
        match self {
            DecodeError::MissingField { field } => write!(f, "missing required field '{field}'"),
            DecodeError::TypeMismatch { field, expected } => {
                write!(f, "field '{field}' is not a {}", expected.label())
            }
            DecodeError::OutOfRange { field, value } => {
                write!(f, "field '{field}' has out-of-range value {value}")
            }
            DecodeError::LengthMismatch {
                field,
                expected,
                found,
            } => write!(f, "field '{field}' has length {found}, expected {expected}"),
        }
    }
}

impl std::error::Error for DecodeError {}
