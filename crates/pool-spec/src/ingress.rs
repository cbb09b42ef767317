//! Pool specification for Ingress resources.

use crate::base::BaseSpec;
use crate::constants::{DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};
use crate::context::SpecContext;
use crate::error::SpecError;
use crate::validation::validate_port;
use k8s_openapi::api::networking::v1::Ingress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Pool configuration for an Ingress.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// Fields shared with every pool spec
    #[serde(flatten)]
    pub base: BaseSpec,

    /// HTTP and HTTPS frontends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontends: Option<IngressFrontends>,
}

/// Frontends of an Ingress pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IngressFrontends {
    /// Always present after defaulting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<IngressHttpFrontend>,

    /// Only present when the Ingress carries TLS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<IngressHttpsFrontend>,
}

/// Plain-text frontend of an Ingress pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IngressHttpFrontend {
    /// One of `enabled`, `disabled` or `redirect` (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Defaults to 80
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

/// TLS frontend of an Ingress pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IngressHttpsFrontend {
    /// Defaults to 443
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

/// What the HTTP frontend does with plain-text traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMode {
    /// Serve the Ingress over HTTP
    #[default]
    Enabled,
    /// Do not expose an HTTP frontend
    Disabled,
    /// Redirect HTTP requests to the HTTPS frontend
    Redirect,
}

impl HttpMode {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMode::Enabled => "enabled",
            HttpMode::Disabled => "disabled",
            HttpMode::Redirect => "redirect",
        }
    }
}

impl FromStr for HttpMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enabled" => Ok(HttpMode::Enabled),
            "disabled" => Ok(HttpMode::Disabled),
            "redirect" => Ok(HttpMode::Redirect),
            _ => Err(format!("unknown HTTP mode {:?}", s)),
        }
    }
}

impl fmt::Display for HttpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the Ingress carries TLS configuration
pub fn ingress_has_tls(ingress: &Ingress) -> bool {
    ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.tls.as_ref())
        .is_some_and(|tls| !tls.is_empty())
}

impl IngressSpec {
    /// Resolved HTTP mode; unset, empty and unparsable modes read as `enabled`
    pub fn http_mode(&self) -> HttpMode {
        self.frontends
            .as_ref()
            .and_then(|f| f.http.as_ref())
            .and_then(|http| http.mode.as_deref())
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default()
    }

    /// Fill unset fields, deriving the HTTPS frontend from the Ingress' TLS configuration.
    pub async fn set_defaults(&mut self, ingress: &Ingress, ctx: &SpecContext) -> Result<(), SpecError> {
        self.base.set_defaults(ctx).await?;

        let frontends = self.frontends.get_or_insert_with(IngressFrontends::default);

        let http = frontends.http.get_or_insert_with(IngressHttpFrontend::default);
        if http.mode.as_deref().is_none_or(str::is_empty) {
            http.mode = Some(HttpMode::Enabled.as_str().to_string());
        }
        http.port.get_or_insert(DEFAULT_HTTP_PORT);

        if ingress_has_tls(ingress) {
            let https = frontends.https.get_or_insert_with(IngressHttpsFrontend::default);
            https.port.get_or_insert(DEFAULT_HTTPS_PORT);
        } else if frontends.https.take().is_some() {
            debug!("Dropping HTTPS frontend because the Ingress has no TLS configuration");
        }

        Ok(())
    }

    /// Check the spec against every constraint, without defaulting.
    pub fn check(&self) -> Result<(), SpecError> {
        self.base.check()?;

        let frontends = self.frontends.clone().unwrap_or_default();
        let http = frontends.http.unwrap_or_default();

        validate_port("frontends.http.port", http.port.unwrap_or(DEFAULT_HTTP_PORT))?;
        if let Some(mode) = http.mode.as_deref().filter(|m| !m.is_empty()) {
            if let Err(reason) = mode.parse::<HttpMode>() {
                return Err(SpecError::validation(
                    "frontends.http.mode",
                    mode,
                    format!("{} (expected one of enabled, disabled, redirect)", reason),
                ));
            }
        }

        if let Some(https) = frontends.https {
            validate_port("frontends.https.port", https.port.unwrap_or(DEFAULT_HTTPS_PORT))?;
        }

        Ok(())
    }

    /// Default the spec for `ingress`, then check it.
    pub async fn validate(&mut self, ingress: &Ingress, ctx: &SpecContext) -> Result<(), SpecError> {
        self.set_defaults(ingress, ctx).await?;
        self.check()
    }

    /// Check that moving from `previous` to `self` only touches mutable fields.
    pub fn validate_transition(&self, previous: &IngressSpec) -> Result<(), SpecError> {
        self.base.validate_transition(&previous.base)
    }
}
