// Copyright (c) 2025 - Cowboy AI, Inc.
//! Capacity Summarizer

use tracing::debug;

use crate::domain::{CapacityRecord, FailureDomain};
use crate::errors::{CorrelationError, CorrelationResult};
use crate::inventory::VSphereInventoryProvider;

/// Project raw cluster figures onto a failure domain
pub fn summarize(name: &str, cpu_cores: u32, memory_bytes: u64) -> CapacityRecord {
    CapacityRecord {
        name: name.to_string(),
        vcpu_count: cpu_cores,
        total_memory_bytes: memory_bytes,
    }
}

/// Query the failure domain's cluster and summarize it
///
/// A failed capacity query is returned as-is; it is never retried.
pub async fn summarize_failure_domain<V>(
    vsphere: &V,
    endpoint: &str,
    failure_domain: &FailureDomain,
) -> CorrelationResult<CapacityRecord>
where
    V: VSphereInventoryProvider + ?Sized,
{
    let cluster = &failure_domain.topology.compute_cluster;
    let capacity = vsphere
        .get_cluster_capacity(endpoint, cluster)
        .await
        .map_err(|e| {
            CorrelationError::upstream(
                "GetClusterCapacity",
                &format!("{} ({})", failure_domain.name, cluster),
                e,
            )
        })?;

    debug!(
        "Failure domain {}: {} cores, {} bytes",
        failure_domain.name, capacity.cpu_cores, capacity.memory_bytes
    );
    Ok(summarize(
        &failure_domain.name,
        capacity.cpu_cores,
        capacity.memory_bytes,
    ))
}
