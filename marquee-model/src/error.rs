use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidField { field: &'static str, reason: String },
    InvalidFilmNumber(usize),
}

impl ModelError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidField { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
            ModelError::InvalidFilmNumber(n) => {
                write!(f, "invalid film number: {n} (film numbers start at 1)")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
