//! EdgeLbClient trait for mocking
//!
//! The concrete EdgeLbClient implements this trait; the pool name generator
//! only ever talks to `dyn EdgeLbClientTrait`, so tests can swap in a mock.

use crate::error::EdgeLbError;
use crate::models::Pool;

/// Trait for Edge-LB API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait EdgeLbClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Check that the Edge-LB API is reachable
    async fn ping(&self) -> Result<(), EdgeLbError>;

    /// Look a pool up by name
    ///
    /// Returns `EdgeLbError::NotFound` when no pool with that name exists.
    async fn get_pool(&self, name: &str) -> Result<Pool, EdgeLbError>;
}
