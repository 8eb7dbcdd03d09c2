// Copyright (c) 2025 - Cowboy AI, Inc.
//! Exported inventory snapshot
//!
//! A JSON document capturing what the vCenter endpoints and cloud accounts
//! would report. It implements both provider traits so a run can be replayed
//! offline:
//!
//! ```json
//! {
//!   "vcenters": {
//!     "vc1.example.com": {
//!       "hostname": "vc1.example.com",
//!       "failureDomains": [],
//!       "clusters": { "/dc/host/cluster-1": { "cpuCores": 32, "memoryBytes": 137438953472 } },
//!       "datacenters": [{ "name": "dc", "path": "/dc" }],
//!       "portGroups": [{ "name": "ci-vlan-1204", "vlanId": 1204 }]
//!     }
//!   },
//!   "accounts": {
//!     "primary": {
//!       "locations": [{ "addresses": ["10.0.0.5"], "datacenterName": "dal10", "podName": "dal10.pod01" }],
//!       "vlans": [{ "datacenterName": "dal10", "podName": "dal10.pod01", "vlanNumber": 1204, "blocks": [] }]
//!     }
//!   },
//!   "hosts": { "vc1.example.com": ["10.0.0.5"] }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;

use super::{
    ClusterCapacity, CloudInventoryProvider, InventoryError, InventoryResult,
    VSphereInventoryProvider,
};
use crate::domain::{
    Datacenter, FailureDomain, NetworkSegment, PhysicalLocation, ProviderSubnet, SubnetBlock,
};

/// Everything one vCenter reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VCenterSnapshot {
    pub hostname: String,
    #[serde(default)]
    pub failure_domains: Vec<FailureDomain>,
    #[serde(default)]
    pub clusters: BTreeMap<String, ClusterCapacity>,
    #[serde(default)]
    pub datacenters: Vec<Datacenter>,
    #[serde(default)]
    pub port_groups: Vec<NetworkSegment>,
}

/// Addresses known to live in one datacenter pod
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub addresses: Vec<IpAddr>,
    #[serde(default)]
    pub datacenter_name: Option<String>,
    #[serde(default)]
    pub pod_name: Option<String>,
}

/// A provider VLAN and where it lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanSnapshot {
    pub datacenter_name: String,
    pub pod_name: String,
    pub vlan_number: i64,
    #[serde(default)]
    pub blocks: Vec<SubnetBlock>,
}

/// Everything one cloud account reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default)]
    pub locations: Vec<LocationSnapshot>,
    #[serde(default)]
    pub vlans: Vec<VlanSnapshot>,
}

/// Offline inventory implementing both provider traits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    #[serde(default)]
    pub vcenters: BTreeMap<String, VCenterSnapshot>,
    #[serde(default)]
    pub accounts: BTreeMap<String, AccountSnapshot>,
    /// Host table used instead of DNS when non-empty
    #[serde(default)]
    pub hosts: BTreeMap<String, Vec<IpAddr>>,
    #[serde(skip)]
    sessions: BTreeSet<String>,
}

impl InventorySnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> InventoryResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| InventoryError::Transport(format!("{}: {}", path.display(), e)))?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> InventoryResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| InventoryError::Decode(e.to_string()))
    }

    pub fn with_vcenter(mut self, server: impl Into<String>, vcenter: VCenterSnapshot) -> Self {
        self.vcenters.insert(server.into(), vcenter);
        self
    }

    pub fn with_account(mut self, account: impl Into<String>, snapshot: AccountSnapshot) -> Self {
        self.accounts.insert(account.into(), snapshot);
        self
    }

    fn session_key(kind: &str, target: &str) -> String {
        format!("{}:{}", kind, target)
    }

    fn open_session(&mut self, kind: &str, target: &str, known: bool) -> InventoryResult<()> {
        if !known {
            return Err(InventoryError::Authentication {
                target: target.to_string(),
                reason: "not present in inventory snapshot".to_string(),
            });
        }
        self.sessions.insert(Self::session_key(kind, target));
        debug!("Opened snapshot session for {} {}", kind, target);
        Ok(())
    }

    fn vcenter(&self, endpoint: &str) -> InventoryResult<&VCenterSnapshot> {
        if !self.sessions.contains(&Self::session_key("vcenter", endpoint)) {
            return Err(InventoryError::NotAuthenticated(endpoint.to_string()));
        }
        self.vcenters
            .get(endpoint)
            .ok_or_else(|| InventoryError::NotFound(endpoint.to_string()))
    }

    fn account(&self, account: &str) -> InventoryResult<&AccountSnapshot> {
        if !self.sessions.contains(&Self::session_key("account", account)) {
            return Err(InventoryError::NotAuthenticated(account.to_string()));
        }
        self.accounts
            .get(account)
            .ok_or_else(|| InventoryError::NotFound(account.to_string()))
    }
}

#[async_trait]
impl VSphereInventoryProvider for InventorySnapshot {
    async fn add_credentials(
        &mut self,
        endpoint: &str,
        _username: &str,
        _password: &str,
    ) -> InventoryResult<()> {
        let known = self.vcenters.contains_key(endpoint);
        self.open_session("vcenter", endpoint, known)
    }

    async fn get_failure_domains(&self, endpoint: &str) -> InventoryResult<Vec<FailureDomain>> {
        Ok(self.vcenter(endpoint)?.failure_domains.clone())
    }

    async fn get_cluster_capacity(
        &self,
        endpoint: &str,
        cluster_path: &str,
    ) -> InventoryResult<ClusterCapacity> {
        self.vcenter(endpoint)?
            .clusters
            .get(cluster_path)
            .copied()
            .ok_or_else(|| InventoryError::NotFound(format!("cluster {}", cluster_path)))
    }

    async fn get_datacenters(&self, endpoint: &str) -> InventoryResult<Vec<Datacenter>> {
        Ok(self.vcenter(endpoint)?.datacenters.clone())
    }

    async fn get_distributed_port_groups(
        &self,
        endpoint: &str,
        name_filter: &str,
    ) -> InventoryResult<Vec<NetworkSegment>> {
        Ok(self
            .vcenter(endpoint)?
            .port_groups
            .iter()
            .filter(|pg| pg.name.contains(name_filter))
            .cloned()
            .collect())
    }

    async fn get_endpoint_identity_hostname(&self, endpoint: &str) -> InventoryResult<String> {
        Ok(self.vcenter(endpoint)?.hostname.clone())
    }
}

#[async_trait]
impl CloudInventoryProvider for InventorySnapshot {
    async fn add_credentials(
        &mut self,
        account: &str,
        _username: &str,
        _api_token: &str,
    ) -> InventoryResult<()> {
        let known = self.accounts.contains_key(account);
        self.open_session("account", account, known)
    }

    async fn resolve_physical_location(
        &self,
        account: &str,
        addresses: &[IpAddr],
    ) -> InventoryResult<PhysicalLocation> {
        let location = self
            .account(account)?
            .locations
            .iter()
            .find(|loc| loc.addresses.iter().any(|a| addresses.contains(a)))
            .map(|loc| PhysicalLocation {
                datacenter_name: loc.datacenter_name.clone(),
                pod_name: loc.pod_name.clone(),
            })
            .unwrap_or_default();
        Ok(location)
    }

    async fn get_vlan_subnets(
        &self,
        account: &str,
        datacenter_name: &str,
        pod_name: &str,
    ) -> InventoryResult<Vec<ProviderSubnet>> {
        Ok(self
            .account(account)?
            .vlans
            .iter()
            .filter(|v| v.datacenter_name == datacenter_name && v.pod_name == pod_name)
            .map(|v| ProviderSubnet {
                vlan_number: v.vlan_number,
                blocks: v.blocks.clone(),
            })
            .collect())
    }
}
