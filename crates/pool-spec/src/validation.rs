//! Field validators shared by the pool specifications.

use crate::constants::{MAX_TCP_PORT, MIN_TCP_PORT};
use crate::error::SpecError;
use regex::Regex;
use std::sync::LazyLock;

/// Edge-LB pool names are DNS-1123 labels.
pub const POOL_NAME_PATTERN: &str = r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$";

static POOL_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POOL_NAME_PATTERN).expect("valid pool name pattern"));

/// Whether `name` is acceptable as an Edge-LB pool name
pub fn is_valid_pool_name(name: &str) -> bool {
    POOL_NAME_REGEX.is_match(name)
}

pub(crate) fn validate_pool_name(field: &str, name: &str) -> Result<(), SpecError> {
    if is_valid_pool_name(name) {
        Ok(())
    } else {
        Err(SpecError::validation(
            field,
            name,
            format!("must match {}", POOL_NAME_PATTERN),
        ))
    }
}

pub(crate) fn validate_port(field: &str, port: i32) -> Result<(), SpecError> {
    if (MIN_TCP_PORT..=MAX_TCP_PORT).contains(&port) {
        Ok(())
    } else {
        Err(SpecError::validation(
            field,
            port,
            format!("must be a valid TCP port ({}-{})", MIN_TCP_PORT, MAX_TCP_PORT),
        ))
    }
}
