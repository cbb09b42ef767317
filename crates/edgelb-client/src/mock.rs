//! Mock EdgeLbClient for unit testing
//!
//! This module provides a mock implementation of EdgeLbClientTrait that can be used
//! in unit tests without requiring a running Edge-LB instance.

use crate::edgelb_trait::EdgeLbClientTrait;
use crate::error::EdgeLbError;
use crate::models::Pool;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock EdgeLbClient for testing
///
/// Pools are stored in memory. Responses can be scripted with `push_taken`
/// and `push_failure`; each `get_pool` call consumes one scripted response
/// before consulting the store.
#[derive(Clone, Default)]
pub struct MockEdgeLbClient {
    base_url: String,
    pools: Arc<Mutex<HashMap<String, Pool>>>,
    scripted: Arc<Mutex<VecDeque<Scripted>>>,
    lookups: Arc<Mutex<Vec<String>>>,
    latency: Arc<Mutex<Option<Duration>>>,
}

enum Scripted {
    Taken,
    Failure(EdgeLbError),
}

impl MockEdgeLbClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Add a pool to the mock store (for test setup)
    pub fn add_pool(&self, pool: Pool) {
        self.pools.lock().unwrap().insert(pool.name.clone(), pool);
    }

    /// Make the next `get_pool` call report a pool, whatever name is asked for
    pub fn push_taken(&self) {
        self.scripted.lock().unwrap().push_back(Scripted::Taken);
    }

    /// Queue an error to be returned by the next `get_pool` call
    pub fn push_failure(&self, error: EdgeLbError) {
        self.scripted.lock().unwrap().push_back(Scripted::Failure(error));
    }

    /// Delay every `get_pool` response (to exercise caller timeouts)
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Names passed to `get_pool`, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EdgeLbClientTrait for MockEdgeLbClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ping(&self) -> Result<(), EdgeLbError> {
        Ok(())
    }

    async fn get_pool(&self, name: &str) -> Result<Pool, EdgeLbError> {
        self.lookups.lock().unwrap().push(name.to_string());

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let scripted = self.scripted.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Taken) => return Ok(Pool::new(name, "slave_public")),
            Some(Scripted::Failure(error)) => return Err(error),
            None => {}
        }

        self.pools
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| EdgeLbError::NotFound(format!("Pool {} not found", name)))
    }
}
