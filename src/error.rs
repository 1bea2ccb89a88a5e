use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("Unknown mode '{0}' (expected one of: no_vectors, simple_workload)")]
    UnknownMode(String),

    #[error("Missing parameter '{name}' for mode '{mode}'")]
    MissingParameter { mode: &'static str, name: &'static str },

    #[error("Unexpected parameter '{value}' for mode '{mode}' (takes {expected})")]
    UnexpectedParameter { mode: &'static str, value: String, expected: usize },

    #[error("Parameter '{name}' must be a non-negative integer, got '{value}'")]
    Parameter {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Cannot draw {q} lookup ids from an empty table (n = 0)")]
    EmptyLookupDomain { q: usize },

    #[error("Vector dimensionality must be positive")]
    ZeroDimension,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkloadError {
    /// True for every failure caused by the numeric parameters
    /// (missing, extra, unparsable or unusable).
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            WorkloadError::MissingParameter { .. }
                | WorkloadError::UnexpectedParameter { .. }
                | WorkloadError::Parameter { .. }
                | WorkloadError::EmptyLookupDomain { .. }
                | WorkloadError::ZeroDimension
        )
    }
}

pub type WorkloadResult<T> = Result<T, WorkloadError>;
