//! Pool specification errors.
//!
//! Every error here concerns a single resource's configuration and is
//! returned to the immediate caller.

use edgelb_client::EdgeLbError;
use thiserror::Error;

/// Errors that can occur while decoding, defaulting or validating a pool spec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The annotation does not decode as the expected structure
    #[error("failed to decode the value of annotation {key}: {message}")]
    Decode {
        /// Annotation the value was read from
        key: String,
        /// Decoder error
        message: String,
    },

    /// A field fails a documented constraint
    #[error("invalid value {value:?} for field {field}: {reason}")]
    Validation {
        /// Wire path of the field, e.g. `frontends[1].port`
        field: String,
        /// Offending value
        value: String,
        /// Constraint the value breaks
        reason: String,
    },

    /// An update touches an immutable field
    #[error("the value of {field} cannot be changed (previous {previous:?}, current {current:?})")]
    Transition {
        /// Wire name of the immutable field
        field: String,
        /// Value in the stored spec
        previous: String,
        /// Value in the new spec
        current: String,
    },

    /// Every generated pool name collided or the registry kept failing
    #[error("failed to generate a unique pool name after {attempts} attempts")]
    NameGenerationExhausted {
        /// Number of candidates tried
        attempts: u32,
    },

    /// The pool registry failed in a way retrying cannot fix
    #[error("pool registry error: {0}")]
    Registry(#[from] EdgeLbError),

    /// The resolved spec could not be serialized back into the annotation
    #[error("failed to encode pool spec: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// Invalid process configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SpecError {
    pub(crate) fn validation(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        SpecError::Validation {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transition(field: impl Into<String>, previous: &Option<String>, current: &Option<String>) -> Self {
        SpecError::Transition {
            field: field.into(),
            previous: previous.clone().unwrap_or_default(),
            current: current.clone().unwrap_or_default(),
        }
    }

    /// Name of the offending field, for validation and transition errors
    pub fn field(&self) -> Option<&str> {
        match self {
            SpecError::Validation { field, .. } | SpecError::Transition { field, .. } => Some(field),
            _ => None,
        }
    }
}
