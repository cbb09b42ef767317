//! Pool creation strategy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether (and how often) a pool is created for a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum CreationStrategy {
    /// Create the pool if it does not exist
    #[default]
    IfNotPresent,

    /// Never create the pool; it must be provisioned out of band
    Never,

    /// Create the pool once and never re-create it after deletion
    Once,
}

/// Error returned when a string is not a known creation strategy
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid creation strategy {0:?} (expected one of IfNotPresent, Never, Once)")]
pub struct ParseCreationStrategyError(pub String);

impl CreationStrategy {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationStrategy::IfNotPresent => "IfNotPresent",
            CreationStrategy::Never => "Never",
            CreationStrategy::Once => "Once",
        }
    }
}

impl FromStr for CreationStrategy {
    type Err = ParseCreationStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IfNotPresent" => Ok(CreationStrategy::IfNotPresent),
            "Never" => Ok(CreationStrategy::Never),
            "Once" => Ok(CreationStrategy::Once),
            other => Err(ParseCreationStrategyError(other.to_string())),
        }
    }
}

impl fmt::Display for CreationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
