//! Edge-LB API models
//!
//! These models match the Edge-LB v2 pool API.
//! Only the fields the pool specification core reads are modelled strictly;
//! everything else is kept as raw JSON.

use serde::{Deserialize, Serialize};

/// Pool model returned by `GET /v2/pools/{name}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Pool name
    pub name: String,
    /// Edge-LB group the pool is installed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Mesos role
    #[serde(default)]
    pub role: String,
    /// CPUs per instance
    #[serde(default)]
    pub cpus: f64,
    /// Memory in MB
    #[serde(default)]
    pub mem: i32,
    /// Number of load balancer instances
    #[serde(default)]
    pub count: i32,
    /// Marathon-style placement constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    /// Virtual networks the pool joins; empty means the host network
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_networks: Vec<VirtualNetwork>,
    /// Cloud provider configuration, opaque to this client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<serde_json::Value>,
}

/// Virtual network a pool is attached to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VirtualNetwork {
    /// Network name
    pub name: String,
}

impl Pool {
    /// Create a minimal pool description (used by mocks and tests)
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            role: role.into(),
            cpus: 0.1,
            mem: 128,
            count: 1,
            constraints: None,
            virtual_networks: Vec::new(),
            cloud_provider: None,
        }
    }
}
