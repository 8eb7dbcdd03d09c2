// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute capacity derived per failure domain

use serde::{Deserialize, Serialize};

use super::FailureDomain;

const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Raw compute capacity of a failure domain's cluster
///
/// Memory stays in bytes; [`CapacityRecord::memory_gib`] is the only
/// conversion and is meant for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRecord {
    pub name: String,
    #[serde(rename = "vCpuCount")]
    pub vcpu_count: u32,
    pub total_memory_bytes: u64,
}

impl CapacityRecord {
    /// Whole GiB, truncated
    pub fn memory_gib(&self) -> u64 {
        self.total_memory_bytes / BYTES_PER_GIB
    }
}

/// Capacity-manager pool view of a failure domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityPool {
    pub name: String,
    pub failure_domain: FailureDomain,
    pub v_cpus: u32,
    #[serde(rename = "memoryGiB")]
    pub memory_gib: u64,
    pub storage: u64,
    pub exclude: bool,
}

impl CapacityPool {
    pub fn from_record(failure_domain: &FailureDomain, record: &CapacityRecord) -> Self {
        Self {
            name: failure_domain.name.clone(),
            failure_domain: failure_domain.clone(),
            v_cpus: record.vcpu_count,
            memory_gib: record.memory_gib(),
            storage: 0,
            exclude: false,
        }
    }
}
