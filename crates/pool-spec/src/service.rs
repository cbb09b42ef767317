//! Pool specification for Service resources.

use crate::base::BaseSpec;
use crate::context::SpecContext;
use crate::error::SpecError;
use crate::validation::validate_port;
use k8s_openapi::api::core::v1::Service;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Pool configuration for a Service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Fields shared with every pool spec
    #[serde(flatten)]
    pub base: BaseSpec,

    /// One frontend per Service port, in the Service's port order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frontends: Vec<ServiceFrontend>,
}

/// Maps a Service port to the port the pool exposes it on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceFrontend {
    /// Port of the Service
    pub service_port: i32,

    /// Defaults to `service_port`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

impl ServiceFrontend {
    /// Frontend exposing `service_port` on `port`
    pub fn new(service_port: i32, port: i32) -> Self {
        Self {
            service_port,
            port: Some(port),
        }
    }

    /// Frontend port, falling back to the service port when unset
    pub fn port(&self) -> i32 {
        self.port.unwrap_or(self.service_port)
    }
}

fn service_ports(service: &Service) -> Vec<i32> {
    service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_ref())
        .map(|ports| ports.iter().map(|p| p.port).collect())
        .unwrap_or_default()
}

impl ServiceSpec {
    /// Fill unset fields and rebuild the frontends from the Service's ports.
    ///
    /// Frontends for ports the Service no longer exposes are dropped. For each
    /// remaining port the first override naming it keeps its custom port.
    pub async fn set_defaults(&mut self, service: &Service, ctx: &SpecContext) -> Result<(), SpecError> {
        self.base.set_defaults(ctx).await?;

        let frontends: Vec<ServiceFrontend> = service_ports(service)
            .into_iter()
            .map(|service_port| {
                let port = self
                    .frontends
                    .iter()
                    .find(|f| f.service_port == service_port)
                    .and_then(|f| f.port)
                    .unwrap_or(service_port);
                ServiceFrontend::new(service_port, port)
            })
            .collect();

        let dropped = self
            .frontends
            .iter()
            .filter(|f| !frontends.iter().any(|kept| kept.service_port == f.service_port))
            .count();
        if dropped > 0 {
            debug!(dropped, "Dropping frontends for ports the Service no longer exposes");
        }

        self.frontends = frontends;
        Ok(())
    }

    /// Check the spec against every constraint, without defaulting.
    ///
    /// Frontends are checked in list order and the first violation is
    /// returned: service port range, frontend port range, then whether either
    /// port was already used by an earlier frontend.
    pub fn check(&self) -> Result<(), SpecError> {
        self.base.check()?;

        let mut service_ports = HashSet::new();
        let mut ports = HashSet::new();
        for (i, frontend) in self.frontends.iter().enumerate() {
            let service_port_field = format!("frontends[{}].servicePort", i);
            let port_field = format!("frontends[{}].port", i);

            validate_port(&service_port_field, frontend.service_port)?;
            validate_port(&port_field, frontend.port())?;

            if !service_ports.insert(frontend.service_port) {
                return Err(SpecError::validation(
                    service_port_field,
                    frontend.service_port,
                    "duplicate service port",
                ));
            }
            if !ports.insert(frontend.port()) {
                return Err(SpecError::validation(port_field, frontend.port(), "duplicate frontend port"));
            }
        }

        Ok(())
    }

    /// Default the spec for `service`, then check it.
    pub async fn validate(&mut self, service: &Service, ctx: &SpecContext) -> Result<(), SpecError> {
        self.set_defaults(service, ctx).await?;
        self.check()
    }

    /// Check that moving from `previous` to `self` only touches mutable fields.
    pub fn validate_transition(&self, previous: &ServiceSpec) -> Result<(), SpecError> {
        self.base.validate_transition(&previous.base)
    }
}
