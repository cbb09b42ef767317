//! Fields and rules shared by Ingress and Service pool specifications.

use crate::cloud_provider::CloudProvider;
use crate::constants::*;
use crate::context::SpecContext;
use crate::creation_strategy::CreationStrategy;
use crate::error::SpecError;
use crate::names::generate_pool_name;
use crate::validation::validate_pool_name;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Wire names of the `BaseSpec` fields, used for strict decoding.
pub(crate) const BASE_SPEC_FIELDS: &[&str] = &[
    "cloudProviderConfiguration",
    "cpus",
    "memory",
    "name",
    "network",
    "role",
    "size",
    "creationStrategy",
];

/// Wire names of the top-level fields of `IngressSpec` and `ServiceSpec`.
pub(crate) fn resource_spec_fields() -> Vec<&'static str> {
    let mut fields = BASE_SPEC_FIELDS.to_vec();
    fields.push("frontends");
    fields
}

/// Pool configuration common to every kind of resource.
///
/// Every field is optional on input; `set_defaults` fills all of them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseSpec {
    /// Raw Edge-LB cloud provider configuration (JSON). Empty means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider_configuration: Option<String>,

    /// CPUs requested by each pool instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<f64>,

    /// Memory (MB) requested by each pool instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<i32>,

    /// Name of the pool. Immutable once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Virtual network the pool joins, or the host network. Immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Mesos role the pool runs under. Immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Number of pool instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,

    /// Whether the pool is created for this resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_strategy: Option<CreationStrategy>,
}

fn has_cloud_prefix(name: &str) -> bool {
    name.strip_prefix(CLOUD_PROVIDER_POOL_NAME_PREFIX)
        .is_some_and(|rest| rest.starts_with(NAME_COMPONENT_SEPARATOR))
}

impl BaseSpec {
    /// Whether a non-empty cloud provider configuration is present
    pub fn has_cloud_provider_configuration(&self) -> bool {
        self.cloud_provider_configuration.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Pool name, if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Network, falling back to the default when unset
    pub fn network(&self) -> &str {
        self.network.as_deref().unwrap_or(DEFAULT_POOL_NETWORK)
    }

    /// Role, falling back to the default when unset
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_POOL_ROLE)
    }

    /// Creation strategy, falling back to the default when unset
    pub fn creation_strategy(&self) -> CreationStrategy {
        self.creation_strategy.unwrap_or_default()
    }

    /// Fill every unset field with its default.
    ///
    /// When a cloud provider configuration is present, the name is replaced
    /// by a generated `cloud--` name unless it already carries that prefix, and
    /// the network is forced to the host network. Applying this twice yields
    /// the same spec as applying it once.
    pub async fn set_defaults(&mut self, ctx: &SpecContext) -> Result<(), SpecError> {
        self.cloud_provider_configuration.get_or_insert_with(String::new);
        self.cpus.get_or_insert(DEFAULT_POOL_CPUS);
        self.memory.get_or_insert(DEFAULT_POOL_MEMORY);
        self.size.get_or_insert(DEFAULT_POOL_SIZE);
        self.role.get_or_insert_with(|| DEFAULT_POOL_ROLE.to_string());
        self.network.get_or_insert_with(|| DEFAULT_POOL_NETWORK.to_string());
        self.creation_strategy.get_or_insert_with(CreationStrategy::default);

        let cloud = self.has_cloud_provider_configuration();
        let needs_name = match self.name.as_deref() {
            None => true,
            Some(name) => cloud && !has_cloud_prefix(name),
        };

        if needs_name {
            let prefix = if cloud { CLOUD_PROVIDER_POOL_NAME_PREFIX } else { "" };
            let name = generate_pool_name(prefix, ctx).await?;
            match self.name.replace(name) {
                Some(previous) => info!(
                    previous = %previous,
                    name = self.name.as_deref().unwrap_or_default(),
                    "Replacing pool name because a cloud provider configuration is present"
                ),
                None => debug!(name = self.name.as_deref().unwrap_or_default(), "Defaulted pool name"),
            }
        }

        if cloud && self.network.as_deref() != Some(HOST_NETWORK) {
            info!(
                network = self.network.as_deref().unwrap_or_default(),
                "Forcing the host network because a cloud provider configuration is present"
            );
            self.network = Some(HOST_NETWORK.to_string());
        }

        Ok(())
    }

    /// Check the spec against every constraint, without defaulting.
    ///
    /// Checks run in a fixed order and the first violation is returned.
    pub fn check(&self) -> Result<(), SpecError> {
        let name = self.name.as_deref().unwrap_or_default();
        validate_pool_name("name", name)?;

        let cpus = self.cpus.unwrap_or(DEFAULT_POOL_CPUS);
        if cpus.is_nan() || cpus < 0.0 {
            return Err(SpecError::validation("cpus", cpus, "must be non-negative"));
        }
        let memory = self.memory.unwrap_or(DEFAULT_POOL_MEMORY);
        if memory < 0 {
            return Err(SpecError::validation("memory", memory, "must be non-negative"));
        }
        let size = self.size.unwrap_or(DEFAULT_POOL_SIZE);
        if size <= 0 {
            return Err(SpecError::validation("size", size, "must be positive"));
        }

        let network = self.network();
        if self.has_cloud_provider_configuration() {
            let raw = self.cloud_provider_configuration.as_deref().unwrap_or_default();
            if let Err(e) = CloudProvider::parse(raw) {
                return Err(SpecError::validation(
                    "cloudProviderConfiguration",
                    raw,
                    format!("must be a valid cloud provider configuration: {}", e),
                ));
            }
            if !has_cloud_prefix(name) {
                return Err(SpecError::validation(
                    "name",
                    name,
                    format!(
                        "must start with {:?} when a cloud provider configuration is specified",
                        format!("{}{}", CLOUD_PROVIDER_POOL_NAME_PREFIX, NAME_COMPONENT_SEPARATOR)
                    ),
                ));
            }
            if network != HOST_NETWORK {
                return Err(SpecError::validation(
                    "network",
                    network,
                    "must be the host network when a cloud provider configuration is specified",
                ));
            }
        } else if self.role() == ROLE_PUBLIC {
            if network != HOST_NETWORK {
                return Err(SpecError::validation(
                    "network",
                    network,
                    format!("must be the host network when role is {}", ROLE_PUBLIC),
                ));
            }
        } else if network == HOST_NETWORK {
            return Err(SpecError::validation(
                "network",
                network,
                format!("must name a virtual network when role is not {}", ROLE_PUBLIC),
            ));
        }

        Ok(())
    }

    /// Default the spec, then check it.
    pub async fn validate(&mut self, ctx: &SpecContext) -> Result<(), SpecError> {
        self.set_defaults(ctx).await?;
        self.check()
    }

    /// Check that moving from `previous` to `self` only touches mutable fields.
    ///
    /// Introducing a cloud provider configuration always provisions a new pool
    /// and is allowed. Removing one is not. Otherwise `name`, `role` and
    /// `network` are fixed at creation time.
    pub fn validate_transition(&self, previous: &BaseSpec) -> Result<(), SpecError> {
        let had_cloud = previous.has_cloud_provider_configuration();
        let has_cloud = self.has_cloud_provider_configuration();

        if !had_cloud && has_cloud {
            return Ok(());
        }
        if had_cloud && !has_cloud {
            return Err(SpecError::transition(
                "cloudProviderConfiguration",
                &previous.cloud_provider_configuration,
                &self.cloud_provider_configuration,
            ));
        }

        if self.name != previous.name {
            return Err(SpecError::transition("name", &previous.name, &self.name));
        }
        if self.role() != previous.role() {
            return Err(SpecError::transition(
                "role",
                &Some(previous.role().to_string()),
                &Some(self.role().to_string()),
            ));
        }
        if self.network() != previous.network() {
            return Err(SpecError::transition(
                "network",
                &Some(previous.network().to_string()),
                &Some(self.network().to_string()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AWS_NLB: &str = r#"{"aws":{"elbs":[{"type":"NLB","listeners":[{"port":80,"linkFrontend":"http"}]}]}}"#;

    fn ctx() -> SpecContext {
        SpecContext::new("dev/kubernetes01")
    }

    fn named(name: &str) -> BaseSpec {
        BaseSpec {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_set_defaults_fills_every_field() {
        let mut spec = BaseSpec::default();
        spec.set_defaults(&ctx()).await.unwrap();

        assert_eq!(spec.cloud_provider_configuration.as_deref(), Some(""));
        assert_eq!(spec.cpus, Some(DEFAULT_POOL_CPUS));
        assert_eq!(spec.memory, Some(DEFAULT_POOL_MEMORY));
        assert_eq!(spec.size, Some(DEFAULT_POOL_SIZE));
        assert_eq!(spec.role.as_deref(), Some(ROLE_PUBLIC));
        assert_eq!(spec.network.as_deref(), Some(HOST_NETWORK));
        assert_eq!(spec.creation_strategy, Some(CreationStrategy::IfNotPresent));
        assert!(spec.name().unwrap().starts_with("dev--kubernetes01--"));
    }

    #[tokio::test]
    async fn test_set_defaults_keeps_explicit_values() {
        let mut spec = BaseSpec {
            cpus: Some(2.0),
            memory: Some(1024),
            size: Some(3),
            role: Some("*".to_string()),
            network: Some("dcos".to_string()),
            creation_strategy: Some(CreationStrategy::Once),
            ..named("my-pool")
        };
        let expected = BaseSpec {
            cloud_provider_configuration: Some(String::new()),
            ..spec.clone()
        };
        spec.set_defaults(&ctx()).await.unwrap();
        assert_eq!(spec, expected);
    }

    #[tokio::test]
    async fn test_set_defaults_is_idempotent() {
        let ctx = ctx();
        for mut spec in [
            BaseSpec::default(),
            named("my-pool"),
            BaseSpec {
                cloud_provider_configuration: Some(AWS_NLB.to_string()),
                network: Some("dcos".to_string()),
                ..named("my-pool")
            },
        ] {
            spec.set_defaults(&ctx).await.unwrap();
            let once = spec.clone();
            spec.set_defaults(&ctx).await.unwrap();
            assert_eq!(spec, once);
        }
    }

    #[tokio::test]
    async fn test_defaulted_spec_is_valid() {
        let mut spec = BaseSpec::default();
        spec.validate(&ctx()).await.unwrap();
    }

    #[tokio::test]
    async fn test_cloud_configuration_overrides_name_and_network() {
        let mut spec = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            network: Some("dcos".to_string()),
            ..named("my-pool")
        };
        spec.validate(&ctx()).await.unwrap();

        assert!(spec.name().unwrap().starts_with("cloud--dev--kubernetes01--"));
        assert_eq!(spec.network(), HOST_NETWORK);
    }

    #[tokio::test]
    async fn test_cloud_prefixed_name_is_kept() {
        let mut spec = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            ..named("cloud--my-pool")
        };
        spec.validate(&ctx()).await.unwrap();
        assert_eq!(spec.name(), Some("cloud--my-pool"));
    }

    #[test]
    fn test_check_rejects_invalid_name() {
        let err = named("My_Pool").check().unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(err.to_string().contains("My_Pool"));

        let err = BaseSpec::default().check().unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_check_rejects_invalid_resources() {
        let spec = BaseSpec { cpus: Some(-0.5), ..named("pool") };
        assert_eq!(spec.check().unwrap_err().field(), Some("cpus"));

        let spec = BaseSpec { memory: Some(-1), ..named("pool") };
        assert_eq!(spec.check().unwrap_err().field(), Some("memory"));

        let spec = BaseSpec { size: Some(0), ..named("pool") };
        assert_eq!(spec.check().unwrap_err().field(), Some("size"));

        let spec = BaseSpec { cpus: Some(0.0), memory: Some(0), size: Some(1), ..named("pool") };
        spec.check().unwrap();
    }

    #[tokio::test]
    async fn test_public_role_requires_host_network() {
        let mut spec = BaseSpec {
            role: Some(ROLE_PUBLIC.to_string()),
            network: Some("dcos".to_string()),
            ..named("pool")
        };
        let err = spec.validate(&ctx()).await.unwrap_err();
        assert_eq!(err.field(), Some("network"));

        spec.cloud_provider_configuration = Some(AWS_NLB.to_string());
        spec.validate(&ctx()).await.unwrap();
        assert_eq!(spec.network(), HOST_NETWORK);
    }

    #[test]
    fn test_private_role_requires_virtual_network() {
        let spec = BaseSpec {
            role: Some("*".to_string()),
            network: Some(HOST_NETWORK.to_string()),
            ..named("pool")
        };
        assert_eq!(spec.check().unwrap_err().field(), Some("network"));

        let spec = BaseSpec {
            role: Some("*".to_string()),
            network: Some("dcos".to_string()),
            ..named("pool")
        };
        spec.check().unwrap();
    }

    #[test]
    fn test_check_cloud_configuration_rules() {
        let spec = BaseSpec {
            cloud_provider_configuration: Some("{not json".to_string()),
            ..named("cloud--pool")
        };
        assert_eq!(spec.check().unwrap_err().field(), Some("cloudProviderConfiguration"));

        let spec = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            ..named("pool")
        };
        assert_eq!(spec.check().unwrap_err().field(), Some("name"));

        let spec = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            network: Some("dcos".to_string()),
            ..named("cloud--pool")
        };
        assert_eq!(spec.check().unwrap_err().field(), Some("network"));

        // a private role is fine for cloud-backed pools
        let spec = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            role: Some("*".to_string()),
            ..named("cloud--pool")
        };
        spec.check().unwrap();
    }

    #[test]
    fn test_resource_spec_fields_extend_base_fields() {
        let fields = resource_spec_fields();
        assert_eq!(fields.len(), BASE_SPEC_FIELDS.len() + 1);
        assert!(BASE_SPEC_FIELDS.iter().all(|f| fields.contains(f)));
        assert!(fields.contains(&"frontends"));
    }

    #[test]
    fn test_cloud_prefix_requires_separator() {
        assert!(has_cloud_prefix("cloud--pool"));
        assert!(!has_cloud_prefix("cloudy-pool"));
        assert!(!has_cloud_prefix("pool"));
    }

    #[test]
    fn test_transition_rejects_immutable_changes() {
        let previous = named("a");

        let err = named("b").validate_transition(&previous).unwrap_err();
        assert!(matches!(err, SpecError::Transition { ref field, .. } if field == "name"));

        let current = BaseSpec { role: Some("*".to_string()), ..named("a") };
        assert_eq!(current.validate_transition(&previous).unwrap_err().field(), Some("role"));

        let current = BaseSpec { network: Some("dcos".to_string()), ..named("a") };
        assert_eq!(current.validate_transition(&previous).unwrap_err().field(), Some("network"));

        let current = BaseSpec { cpus: Some(4.0), size: Some(5), ..named("a") };
        current.validate_transition(&previous).unwrap();
    }

    #[test]
    fn test_transition_introducing_cloud_configuration_is_allowed() {
        let previous = BaseSpec { cloud_provider_configuration: Some(String::new()), ..named("a") };
        let current = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            network: Some("dcos".to_string()),
            ..named("b")
        };
        current.validate_transition(&previous).unwrap();
    }

    #[test]
    fn test_transition_removing_cloud_configuration_is_rejected() {
        let previous = BaseSpec {
            cloud_provider_configuration: Some(AWS_NLB.to_string()),
            ..named("cloud--a")
        };
        let current = BaseSpec { cloud_provider_configuration: Some(String::new()), ..named("cloud--a") };
        assert_eq!(
            current.validate_transition(&previous).unwrap_err().field(),
            Some("cloudProviderConfiguration")
        );
    }
}
