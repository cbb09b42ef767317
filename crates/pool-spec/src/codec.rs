//! Reading and writing pool specifications stored in resource annotations.
//!
//! Decoding happens in two stages. The `decode_*` functions perform a strict
//! structural decode of the annotation value and reject unknown fields. The
//! `get_*` functions read the annotation off a resource, decode it, then
//! default and validate the result against that resource.
//!
//! Unknown fields are checked explicitly at the top level because `BaseSpec`
//! is flattened into the resource-specific specs, which serde cannot combine
//! with `deny_unknown_fields`. Nested objects deny unknown fields themselves.

use crate::base::{resource_spec_fields, BaseSpec, BASE_SPEC_FIELDS};
use crate::constants::EDGELB_POOL_CONFIG_ANNOTATION;
use crate::context::SpecContext;
use crate::error::SpecError;
use crate::ingress::IngressSpec;
use crate::service::ServiceSpec;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::Ingress;
use kube::ResourceExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

fn decode_error(message: impl ToString) -> SpecError {
    SpecError::Decode {
        key: EDGELB_POOL_CONFIG_ANNOTATION.to_string(),
        message: message.to_string(),
    }
}

fn decode_strict<T: DeserializeOwned + Default>(raw: &str, known_fields: &[&str]) -> Result<T, SpecError> {
    if raw.trim().is_empty() {
        return Ok(T::default());
    }

    let value: Value = serde_yaml::from_str(raw).map_err(decode_error)?;
    let mapping = match &value {
        Value::Null => return Ok(T::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(decode_error("expected a mapping of pool configuration fields")),
    };

    for key in mapping.keys() {
        match key.as_str() {
            Some(field) if known_fields.contains(&field) => {}
            Some(field) => {
                return Err(decode_error(format!(
                    "unknown field `{}`, expected one of {}",
                    field,
                    known_fields.join(", ")
                )));
            }
            None => return Err(decode_error(format!("field names must be strings, found {:?}", key))),
        }
    }

    serde_yaml::from_value(value).map_err(decode_error)
}

/// Strictly decode the shared pool fields.
pub fn decode_base_spec(raw: &str) -> Result<BaseSpec, SpecError> {
    decode_strict(raw, BASE_SPEC_FIELDS)
}

/// Strictly decode an Ingress pool spec. Blank input decodes to an empty spec.
pub fn decode_ingress_spec(raw: &str) -> Result<IngressSpec, SpecError> {
    decode_strict(raw, &resource_spec_fields())
}

/// Strictly decode a Service pool spec. Blank input decodes to an empty spec.
pub fn decode_service_spec(raw: &str) -> Result<ServiceSpec, SpecError> {
    decode_strict(raw, &resource_spec_fields())
}

fn annotation<K: ResourceExt>(resource: &K) -> Option<&str> {
    resource
        .annotations()
        .get(EDGELB_POOL_CONFIG_ANNOTATION)
        .map(String::as_str)
}

/// Resolve the pool spec of an Ingress: decode its annotation, then default
/// and validate it.
pub async fn get_ingress_spec(ingress: &Ingress, ctx: &SpecContext) -> Result<IngressSpec, SpecError> {
    let mut spec = decode_ingress_spec(annotation(ingress).unwrap_or_default())?;
    spec.validate(ingress, ctx).await?;
    debug!(
        ingress = %ingress.name_any(),
        namespace = %ingress.namespace().unwrap_or_default(),
        pool = spec.base.name().unwrap_or_default(),
        "Resolved Ingress pool spec"
    );
    Ok(spec)
}

/// Resolve the pool spec of a Service: decode its annotation, then default
/// and validate it.
pub async fn get_service_spec(service: &Service, ctx: &SpecContext) -> Result<ServiceSpec, SpecError> {
    let mut spec = decode_service_spec(annotation(service).unwrap_or_default())?;
    spec.validate(service, ctx).await?;
    debug!(
        service = %service.name_any(),
        namespace = %service.namespace().unwrap_or_default(),
        pool = spec.base.name().unwrap_or_default(),
        "Resolved Service pool spec"
    );
    Ok(spec)
}

/// Stored Ingress pool spec, as written by a previous `set_ingress_spec`.
///
/// Nothing is defaulted. Returns `None` when the annotation is absent or blank.
pub fn previous_ingress_spec(ingress: &Ingress) -> Result<Option<IngressSpec>, SpecError> {
    match annotation(ingress) {
        Some(raw) if !raw.trim().is_empty() => decode_ingress_spec(raw).map(Some),
        _ => Ok(None),
    }
}

/// Stored Service pool spec, as written by a previous `set_service_spec`.
///
/// Nothing is defaulted. Returns `None` when the annotation is absent or blank.
pub fn previous_service_spec(service: &Service) -> Result<Option<ServiceSpec>, SpecError> {
    match annotation(service) {
        Some(raw) if !raw.trim().is_empty() => decode_service_spec(raw).map(Some),
        _ => Ok(None),
    }
}

fn set_annotation<K: ResourceExt, S: Serialize>(resource: &mut K, spec: &S) -> Result<(), SpecError> {
    let raw = serde_yaml::to_string(spec)?;
    resource
        .annotations_mut()
        .insert(EDGELB_POOL_CONFIG_ANNOTATION.to_string(), raw);
    Ok(())
}

/// Store the resolved spec in the Ingress' pool configuration annotation.
pub fn set_ingress_spec(ingress: &mut Ingress, spec: &IngressSpec) -> Result<(), SpecError> {
    set_annotation(ingress, spec)
}

/// Store the resolved spec in the Service's pool configuration annotation.
pub fn set_service_spec(service: &mut Service, spec: &ServiceSpec) -> Result<(), SpecError> {
    set_annotation(service, spec)
}
