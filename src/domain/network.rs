// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects for both sides of the correlation
//!
//! The virtualization side contributes [`NetworkSegment`]s (distributed port
//! groups keyed by VLAN id). The provider side contributes [`ProviderSubnet`]s
//! scoped to a [`PhysicalLocation`]. A [`MatchedNetwork`] exists only where
//! the two agree on a VLAN id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv6Addr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(i64),

    #[error("Subnet for VLAN {vlan} is missing {field}")]
    MissingSubnetField { vlan: u16, field: &'static str },
}

/// VLAN ID value object
///
/// Represents a VLAN ID (IEEE 802.1Q) with validation.
/// Invariants:
/// - Valid VLAN ID range (1-4094)
/// - VLAN 0 and 4095 are reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VlanId(u16);

impl VlanId {
    /// Minimum valid VLAN ID
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID
    pub const MAX: u16 = 4094;

    /// Create a new VLAN ID with validation
    pub fn new(id: u16) -> Result<Self, NetworkError> {
        if !(Self::MIN..=Self::MAX).contains(&id) {
            return Err(NetworkError::InvalidVlanId(id.into()));
        }

        Ok(Self(id))
    }

    /// Get the VLAN ID value
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = NetworkError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for VlanId {
    type Error = NetworkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| NetworkError::InvalidVlanId(value))
            .and_then(Self::new)
    }
}

/// Distributed port group as reported by the virtualization platform
///
/// The VLAN id is kept raw: trunk and untagged port groups report ids outside
/// 1-4094 and are only rejected when indexed for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSegment {
    pub name: String,
    pub vlan_id: u16,
}

impl NetworkSegment {
    pub fn new(name: impl Into<String>, vlan_id: u16) -> Self {
        Self {
            name: name.into(),
            vlan_id,
        }
    }
}

/// Provider addressing of where an endpoint physically resides
///
/// Either field may be absent; only a location with both a datacenter and a
/// pod can be used to look up VLAN subnets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}

impl PhysicalLocation {
    pub fn new(datacenter_name: impl Into<String>, pod_name: impl Into<String>) -> Self {
        Self {
            datacenter_name: Some(datacenter_name.into()),
            pod_name: Some(pod_name.into()),
        }
    }

    /// A location nobody could resolve
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// True when a non-empty datacenter name is known
    pub fn has_datacenter(&self) -> bool {
        self.datacenter_name.as_deref().is_some_and(|dc| !dc.is_empty())
    }

    /// True when both the datacenter and the pod are known
    pub fn is_resolved(&self) -> bool {
        self.has_datacenter() && self.pod_name.as_deref().is_some_and(|pod| !pod.is_empty())
    }
}

impl fmt::Display for PhysicalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.datacenter_name.as_deref().unwrap_or("?"),
            self.pod_name.as_deref().unwrap_or("?")
        )
    }
}

/// One subnet block attached to a provider VLAN
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetBlock {
    #[serde(default)]
    pub network_identifier: Option<String>,
    #[serde(default)]
    pub cidr: Option<u8>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub ip_address_count: Option<u32>,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    #[serde(default)]
    pub subnet_type: Option<String>,
    #[serde(default)]
    pub pod_name: Option<String>,
    #[serde(default)]
    pub datacenter_name: Option<String>,
}

impl SubnetBlock {
    /// `networkIdentifier/cidr`, e.g. `10.38.192.0/25`
    pub fn machine_network_cidr(&self, vlan: u16) -> Result<String, NetworkError> {
        let network = self
            .network_identifier
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(NetworkError::MissingSubnetField {
                vlan,
                field: "network identifier",
            })?;
        let cidr = self.cidr.ok_or(NetworkError::MissingSubnetField {
            vlan,
            field: "CIDR length",
        })?;

        Ok(format!("{}/{}", network, cidr))
    }
}

/// Provider-side VLAN record with its subnet blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSubnet {
    pub vlan_number: i64,
    #[serde(default)]
    pub blocks: Vec<SubnetBlock>,
}

/// Deterministic IPv6 addressing derived for a matched VLAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryAddressing {
    /// `{prefix}:{vlan}::1/64`
    pub ipv6_prefix: String,
    pub ipv6_cidr_length: u8,
    pub ipv6_gateway: Ipv6Addr,
    pub ipv6_start_address: Ipv6Addr,
}

/// A port group joined to the provider subnet carrying the same VLAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedNetwork {
    pub name: String,
    pub port_group_name: String,
    pub vlan_id: VlanId,
    pub server: String,
    pub pod_name: Option<String>,
    pub datacenter_name: Option<String>,
    pub cidr: u8,
    pub gateway: Option<String>,
    pub ip_address_count: Option<u32>,
    pub netmask: Option<String>,
    pub subnet_type: Option<String>,
    pub machine_network_cidr: String,
    pub ip_addresses: Vec<String>,
    #[serde(flatten)]
    pub ipv6: SecondaryAddressing,
}
