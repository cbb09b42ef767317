//! Well-known names and default values shared by all pool specifications.

/// Annotation holding the pool configuration of an Ingress or Service.
pub const EDGELB_POOL_CONFIG_ANNOTATION: &str = "kubernetes.dcos.io/edgelb-pool-config";

/// Name of the DC/OS host network. Pools on the host network carry no
/// virtual network name at all.
pub const HOST_NETWORK: &str = "";

/// Mesos role of public agents.
pub const ROLE_PUBLIC: &str = "slave_public";

/// Prefix reserved for pools that provision a cloud load balancer.
pub const CLOUD_PROVIDER_POOL_NAME_PREFIX: &str = "cloud";

/// Separator placed between pool name components.
pub const NAME_COMPONENT_SEPARATOR: &str = "--";

/// Maximum length of an Edge-LB pool name.
pub const POOL_NAME_MAX_LENGTH: usize = 63;

/// Length of the random suffix of generated pool names.
pub const POOL_NAME_SUFFIX_LENGTH: usize = 5;

/// Edge-LB group under which pool frameworks are installed.
pub const DEFAULT_POOL_GROUP: &str = "dcos-edgelb/pools";

/// CPUs per pool instance when unset.
pub const DEFAULT_POOL_CPUS: f64 = 0.1;
/// Memory (MB) per pool instance when unset.
pub const DEFAULT_POOL_MEMORY: i32 = 128;
/// Number of pool instances when unset.
pub const DEFAULT_POOL_SIZE: i32 = 1;
/// Pools run on public agents unless told otherwise.
pub const DEFAULT_POOL_ROLE: &str = ROLE_PUBLIC;
/// Pools join the host network unless told otherwise.
pub const DEFAULT_POOL_NETWORK: &str = HOST_NETWORK;

/// Port of the Ingress HTTP frontend when unset.
pub const DEFAULT_HTTP_PORT: i32 = 80;
/// Port of the Ingress HTTPS frontend when unset.
pub const DEFAULT_HTTPS_PORT: i32 = 443;

/// Lowest valid frontend or service port.
pub const MIN_TCP_PORT: i32 = 1;
/// Highest valid frontend or service port.
pub const MAX_TCP_PORT: i32 = 65535;
