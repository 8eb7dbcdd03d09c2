// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory collaborators
//!
//! The correlation engine never talks to vCenter, IBM Cloud or DNS directly.
//! It goes through the traits defined here, so the same orchestration runs
//! against live APIs, an exported [`InventorySnapshot`], or test fakes.
//!
//! ```text
//! VSphereInventoryProvider ──┐
//!                            ├──> CorrelationOrchestrator ──> MergedEnvironmentConfig
//! CloudInventoryProvider ────┤
//! HostResolver ──────────────┘
//! ```

pub mod resolver;
pub mod snapshot;

#[cfg(feature = "softlayer")]
pub mod softlayer;

pub use resolver::{StaticResolver, SystemResolver};
pub use snapshot::InventorySnapshot;

#[cfg(feature = "softlayer")]
pub use softlayer::{SoftLayerClient, SoftLayerConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use thiserror::Error;

use crate::domain::{Datacenter, FailureDomain, NetworkSegment, PhysicalLocation, ProviderSubnet};

/// Errors raised by inventory collaborators
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Credentials rejected or target unknown
    #[error("Authentication failed for {target}: {reason}")]
    Authentication { target: String, reason: String },

    /// Query issued before credentials were added
    #[error("No session for {0}")]
    NotAuthenticated(String),

    /// Requested object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for collaborator calls
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Raw capacity figures of a compute cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCapacity {
    pub cpu_cores: u32,
    pub memory_bytes: u64,
}

/// Virtualization platform inventory
#[async_trait]
pub trait VSphereInventoryProvider: Send + Sync {
    /// Open a session on `endpoint`
    async fn add_credentials(
        &mut self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> InventoryResult<()>;

    /// Failure domains configured on the endpoint
    async fn get_failure_domains(&self, endpoint: &str) -> InventoryResult<Vec<FailureDomain>>;

    /// Total CPU cores and memory of the cluster at `cluster_path`
    async fn get_cluster_capacity(
        &self,
        endpoint: &str,
        cluster_path: &str,
    ) -> InventoryResult<ClusterCapacity>;

    async fn get_datacenters(&self, endpoint: &str) -> InventoryResult<Vec<Datacenter>>;

    /// Distributed port groups whose name contains `name_filter`
    async fn get_distributed_port_groups(
        &self,
        endpoint: &str,
        name_filter: &str,
    ) -> InventoryResult<Vec<NetworkSegment>>;

    /// Hostname the endpoint reports for itself
    async fn get_endpoint_identity_hostname(&self, endpoint: &str) -> InventoryResult<String>;
}

/// Cloud provider physical and network inventory
#[async_trait]
pub trait CloudInventoryProvider: Send + Sync {
    async fn add_credentials(
        &mut self,
        account: &str,
        username: &str,
        api_token: &str,
    ) -> InventoryResult<()>;

    /// Physical location containing any of `addresses`
    ///
    /// An address the account does not know yields an unresolved location,
    /// not an error.
    async fn resolve_physical_location(
        &self,
        account: &str,
        addresses: &[IpAddr],
    ) -> InventoryResult<PhysicalLocation>;

    /// VLAN subnet records for a datacenter pod
    async fn get_vlan_subnets(
        &self,
        account: &str,
        datacenter_name: &str,
        pod_name: &str,
    ) -> InventoryResult<Vec<ProviderSubnet>>;
}

/// Name to address resolution
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

#[async_trait]
impl<T: HostResolver + ?Sized> HostResolver for Box<T> {
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        (**self).lookup(host).await
    }
}
