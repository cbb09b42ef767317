//! Edge-LB API client
//!
//! Implements the Edge-LB REST API client for pool lookups.
//! Based on the Edge-LB API structure: /ping and /v2/pools/{name}

use crate::edgelb_trait::EdgeLbClientTrait;
use crate::error::EdgeLbError;
use crate::models::Pool;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Edge-LB API client
pub struct EdgeLbClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl EdgeLbClient {
    /// Create a new Edge-LB client
    ///
    /// # Arguments
    /// * `base_url` - Edge-LB API root (e.g., "https://leader.mesos/service/edgelb")
    /// * `token` - Optional DC/OS authentication token
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, EdgeLbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(EdgeLbError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let request = self.client.get(url).header("Accept", "application/json");
        match &self.token {
            Some(token) => request.header("Authorization", format!("token={}", token)),
            None => request,
        }
    }

    /// Check that the Edge-LB API is reachable and the token is accepted
    pub async fn ping(&self) -> Result<(), EdgeLbError> {
        let response = self.get("/ping").send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(EdgeLbError::Authentication(format!("{} - {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EdgeLbError::Api {
                status: status.as_u16(),
                message: format!("ping failed: {}", body),
            });
        }

        debug!("Edge-LB API is reachable");
        Ok(())
    }

    /// Get a pool by name
    ///
    /// # Returns
    /// * `Ok(Pool)` - The pool exists
    /// * `Err(EdgeLbError::NotFound)` - No pool with that name exists
    /// * `Err(EdgeLbError)` - Any other failure
    pub async fn get_pool(&self, name: &str) -> Result<Pool, EdgeLbError> {
        if name.is_empty() {
            return Err(EdgeLbError::InvalidRequest("pool name must not be empty".to_string()));
        }

        let path = format!("/v2/pools/{}", urlencoding::encode(name));
        let response = self.get(&path).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EdgeLbError::NotFound(format!("Pool {} not found", name)));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(EdgeLbError::Authentication(format!("{} - {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EdgeLbError::Api {
                status: status.as_u16(),
                message: format!("Failed to get pool {}: {}", name, body),
            });
        }

        let body = response.text().await?;
        let pool: Pool = serde_json::from_str(&body)?;
        Ok(pool)
    }
}

#[async_trait::async_trait]
impl EdgeLbClientTrait for EdgeLbClient {
    fn base_url(&self) -> &str {
        EdgeLbClient::base_url(self)
    }

    async fn ping(&self) -> Result<(), EdgeLbError> {
        EdgeLbClient::ping(self).await
    }

    async fn get_pool(&self, name: &str) -> Result<Pool, EdgeLbError> {
        EdgeLbClient::get_pool(self, name).await
    }
}
