// Copyright (c) 2025 - Cowboy AI, Inc.
//! vSphere topology entities: endpoints and failure domains

use serde::{Deserialize, Serialize};

/// A vCenter endpoint with the inventory paths of its datacenters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub server: String,
    pub datacenters: Vec<String>,
}

/// Datacenter as enumerated on an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub name: String,
    /// Inventory path, e.g. `/IBMCloud`
    pub path: String,
}

/// Where a failure domain lives inside the vCenter inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainTopology {
    pub datacenter: String,
    /// Cluster inventory path, e.g. `/IBMCloud/host/vcs-mdcnc-workload-1`
    pub compute_cluster: String,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub datastore: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// Named topology unit grouping a compute cluster for availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomain {
    pub name: String,
    pub region: String,
    pub zone: String,
    pub server: String,
    pub topology: FailureDomainTopology,
}
