//! Edge-LB pool specifications
//!
//! Translates the pool configuration annotation of Kubernetes `Ingress` and
//! `Service` resources into a defaulted, validated Edge-LB pool spec:
//! - Defaulting of unset fields, including pool name generation
//! - Validation of field values and their combinations
//! - Transition checks between the stored and the current spec
//!
//! # Example
//!
//! ```no_run
//! use k8s_openapi::api::networking::v1::Ingress;
//! use pool_spec::{get_ingress_spec, previous_ingress_spec, set_ingress_spec, Config};
//!
//! # async fn example(mut ingress: Ingress) -> Result<(), pool_spec::SpecError> {
//! let ctx = Config::from_env()?.into_context()?;
//!
//! let spec = get_ingress_spec(&ingress, &ctx).await?;
//! if let Some(previous) = previous_ingress_spec(&ingress)? {
//!     spec.validate_transition(&previous)?;
//! }
//! set_ingress_spec(&mut ingress, &spec)?;
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod base;
pub mod cloud_provider;
pub mod codec;
pub mod config;
pub mod constants;
pub mod context;
pub mod creation_strategy;
pub mod error;
pub mod ingress;
pub mod names;
pub mod service;
pub mod strings;
pub mod validation;

pub use base::BaseSpec;
pub use cloud_provider::CloudProvider;
pub use codec::{
    decode_base_spec, decode_ingress_spec, decode_service_spec, get_ingress_spec, get_service_spec,
    previous_ingress_spec, previous_service_spec, set_ingress_spec, set_service_spec,
};
pub use config::Config;
pub use context::{NameGenerationPolicy, SpecContext};
pub use creation_strategy::CreationStrategy;
pub use error::SpecError;
pub use ingress::{HttpMode, IngressFrontends, IngressHttpFrontend, IngressHttpsFrontend, IngressSpec};
pub use names::generate_pool_name;
pub use service::{ServiceFrontend, ServiceSpec};
