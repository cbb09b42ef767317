//! Pool name generation.
//!
//! Generated names have the shape `<prefix>--<cluster>--<suffix>`, where the
//! cluster segment is the sanitized cluster name truncated so that the whole
//! name (plus the pool group it is installed under) fits Edge-LB's limits, and
//! the suffix is random. When a registry is configured, candidates are checked
//! against it and regenerated until one is free or the attempt budget runs out.

use crate::backoff::FibonacciBackoff;
use crate::constants::{NAME_COMPONENT_SEPARATOR, POOL_NAME_MAX_LENGTH, POOL_NAME_SUFFIX_LENGTH};
use crate::context::SpecContext;
use crate::error::SpecError;
use crate::strings::sanitize_name_component;
use rand::Rng;
use tracing::{debug, error, warn};

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..POOL_NAME_SUFFIX_LENGTH)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Build a single candidate pool name without consulting any registry.
///
/// The result is at most 63 characters long and always a valid pool name,
/// whatever `prefix` and `cluster_name` contain.
pub fn candidate_pool_name<R: Rng + ?Sized>(
    prefix: &str,
    cluster_name: &str,
    pool_group: Option<&str>,
    rng: &mut R,
) -> String {
    let suffix = format!("{}{}", NAME_COMPONENT_SEPARATOR, random_suffix(rng));

    let mut prefix = sanitize_name_component(prefix);
    if !prefix.is_empty() {
        prefix.push_str(NAME_COMPONENT_SEPARATOR);
    }
    // sanitized strings are ASCII, byte truncation is safe
    prefix.truncate(POOL_NAME_MAX_LENGTH - suffix.len());

    let group_overhead = pool_group.map_or(0, |group| group.len() + 1);
    let max_cluster_length =
        POOL_NAME_MAX_LENGTH.saturating_sub(prefix.len() + suffix.len() + group_overhead);

    let mut cluster = sanitize_name_component(cluster_name);
    cluster.truncate(max_cluster_length);

    let name = format!("{}{}{}", prefix, cluster, suffix);
    name.trim_start_matches('-').to_string()
}

/// Generate a pool name that is not in use.
///
/// Without a registry the first candidate is returned. Otherwise each
/// candidate is looked up under the policy's timeout:
/// - not found: the candidate is returned
/// - pool exists: a new candidate is tried immediately
/// - transient error or timeout: a new candidate is tried after a jittered backoff
/// - any other error: returned as `SpecError::Registry`
///
/// After `max_attempts` candidates, `SpecError::NameGenerationExhausted` is returned.
pub async fn generate_pool_name(prefix: &str, ctx: &SpecContext) -> Result<String, SpecError> {
    let Some(registry) = ctx.registry() else {
        let name = candidate_pool_name(prefix, ctx.cluster_name(), ctx.pool_group(), &mut rand::thread_rng());
        debug!(name = %name, "Generated pool name");
        return Ok(name);
    };

    let policy = ctx.name_policy();
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = FibonacciBackoff::new(policy.initial_backoff, policy.max_backoff);

    for attempt in 1..=max_attempts {
        let candidate = candidate_pool_name(prefix, ctx.cluster_name(), ctx.pool_group(), &mut rand::thread_rng());

        let transient = match tokio::time::timeout(policy.lookup_timeout, registry.get_pool(&candidate)).await {
            Ok(Err(e)) if e.is_not_found() => {
                debug!(name = %candidate, attempt, "Generated pool name is available");
                return Ok(candidate);
            }
            Ok(Ok(_)) => {
                debug!(name = %candidate, attempt, "Pool name already in use, generating another");
                false
            }
            Ok(Err(e)) if e.is_transient() => {
                warn!(name = %candidate, attempt, error = %e, "Pool registry lookup failed, will retry");
                true
            }
            Ok(Err(e)) => {
                error!(name = %candidate, attempt, error = %e, "Pool registry lookup failed permanently");
                return Err(SpecError::Registry(e));
            }
            Err(_) => {
                warn!(
                    name = %candidate,
                    attempt,
                    timeout_ms = policy.lookup_timeout.as_millis(),
                    "Pool registry lookup timed out, will retry"
                );
                true
            }
        };

        if transient && attempt < max_attempts {
            tokio::time::sleep(backoff.next_jittered()).await;
        }
    }

    error!(attempts = max_attempts, "Could not generate an unused pool name");
    Err(SpecError::NameGenerationExhausted { attempts: max_attempts })
}
