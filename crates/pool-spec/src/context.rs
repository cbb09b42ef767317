//! Per-call context for defaulting and pool name generation.
//!
//! Cluster identity and the pool registry are passed explicitly instead of
//! living in process-wide state, so every function that may generate a name
//! takes a `&SpecContext`.

use crate::constants::DEFAULT_POOL_GROUP;
use edgelb_client::EdgeLbClientTrait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Bounds applied to pool name generation.
#[derive(Debug, Clone, PartialEq)]
pub struct NameGenerationPolicy {
    /// Maximum number of candidate names to try
    pub max_attempts: u32,
    /// Timeout applied to each registry lookup
    pub lookup_timeout: Duration,
    /// Initial delay after a transient registry failure
    pub initial_backoff: Duration,
    /// Maximum delay after a transient registry failure
    pub max_backoff: Duration,
}

impl Default for NameGenerationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            lookup_timeout: Duration::from_secs(5),
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Everything defaulting needs to know about the surrounding deployment.
#[derive(Clone)]
pub struct SpecContext {
    cluster_name: String,
    pool_group: Option<String>,
    registry: Option<Arc<dyn EdgeLbClientTrait>>,
    name_policy: NameGenerationPolicy,
}

impl SpecContext {
    /// Context for the given cluster, grouped under the default Edge-LB pool
    /// group and without a registry.
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            pool_group: Some(DEFAULT_POOL_GROUP.to_string()),
            registry: None,
            name_policy: NameGenerationPolicy::default(),
        }
    }

    /// Set (or clear) the pool group
    pub fn with_pool_group(mut self, pool_group: Option<String>) -> Self {
        self.pool_group = pool_group.filter(|g| !g.is_empty());
        self
    }

    /// Check generated names against a pool registry
    pub fn with_registry(mut self, registry: Arc<dyn EdgeLbClientTrait>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the name generation bounds
    pub fn with_name_policy(mut self, name_policy: NameGenerationPolicy) -> Self {
        self.name_policy = name_policy;
        self
    }

    /// Cluster the pools belong to
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Edge-LB group pools are installed under, if any
    pub fn pool_group(&self) -> Option<&str> {
        self.pool_group.as_deref()
    }

    /// Pool registry used to detect name collisions
    pub fn registry(&self) -> Option<&dyn EdgeLbClientTrait> {
        self.registry.as_deref()
    }

    /// Bounds applied to name generation
    pub fn name_policy(&self) -> &NameGenerationPolicy {
        &self.name_policy
    }
}

impl fmt::Debug for SpecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecContext")
            .field("cluster_name", &self.cluster_name)
            .field("pool_group", &self.pool_group)
            .field("registry", &self.registry.as_ref().map(|r| r.base_url().to_string()))
            .field("name_policy", &self.name_policy)
            .finish()
    }
}
