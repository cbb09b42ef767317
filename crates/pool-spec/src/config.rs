//! Process configuration loaded from environment variables.

use crate::constants::DEFAULT_POOL_GROUP;
use crate::context::{NameGenerationPolicy, SpecContext};
use crate::error::SpecError;
use edgelb_client::EdgeLbClient;
use std::env;
use std::sync::Arc;
use tracing::info;

/// Settings the embedding process supplies to the pool spec core.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `CLUSTER_NAME` (required)
    pub cluster_name: String,
    /// `EDGELB_POOL_GROUP`; an empty value disables grouping
    pub pool_group: Option<String>,
    /// `EDGELB_URL`; generated names are only checked for collisions when set
    pub edgelb_url: Option<String>,
    /// `EDGELB_TOKEN`
    pub edgelb_token: Option<String>,
    /// `EDGELB_NAME_MAX_ATTEMPTS`
    pub name_max_attempts: u32,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, SpecError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SpecError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cluster_name = lookup("CLUSTER_NAME")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SpecError::InvalidConfig("CLUSTER_NAME environment variable is required".to_string()))?;

        let pool_group = match lookup("EDGELB_POOL_GROUP") {
            Some(group) if group.is_empty() => None,
            Some(group) => Some(group),
            None => Some(DEFAULT_POOL_GROUP.to_string()),
        };

        let name_max_attempts = match lookup("EDGELB_NAME_MAX_ATTEMPTS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(SpecError::InvalidConfig(format!(
                        "EDGELB_NAME_MAX_ATTEMPTS must be a positive integer, got {:?}",
                        raw
                    )));
                }
            },
            None => NameGenerationPolicy::default().max_attempts,
        };

        Ok(Self {
            cluster_name,
            pool_group,
            edgelb_url: lookup("EDGELB_URL").filter(|v| !v.is_empty()),
            edgelb_token: lookup("EDGELB_TOKEN").filter(|v| !v.is_empty()),
            name_max_attempts,
        })
    }

    /// Build the spec context, connecting to Edge-LB when a URL is configured.
    pub fn into_context(self) -> Result<SpecContext, SpecError> {
        info!("Configuration:");
        info!("  Cluster name: {}", self.cluster_name);
        info!("  Pool group: {}", self.pool_group.as_deref().unwrap_or("none"));
        info!("  Edge-LB URL: {}", self.edgelb_url.as_deref().unwrap_or("not configured"));

        let policy = NameGenerationPolicy {
            max_attempts: self.name_max_attempts,
            ..Default::default()
        };
        let mut ctx = SpecContext::new(self.cluster_name)
            .with_pool_group(self.pool_group)
            .with_name_policy(policy);

        if let Some(url) = self.edgelb_url {
            let client = EdgeLbClient::new(url, self.edgelb_token)?;
            ctx = ctx.with_registry(Arc::new(client));
        }

        Ok(ctx)
    }
}
