// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Value objects and entities shared by both inventories and by the
//! correlation engine.
//!
//! # Virtualization side
//!
//! - [`Endpoint`] - vCenter server with its datacenter paths
//! - [`FailureDomain`] - named topology unit pointing at a compute cluster
//! - [`NetworkSegment`] - distributed port group with its VLAN id
//!
//! # Provider side
//!
//! - [`PhysicalLocation`] - datacenter + pod
//! - [`ProviderSubnet`] - VLAN record with [`SubnetBlock`]s
//!
//! # Derived
//!
//! - [`CapacityRecord`] / [`CapacityPool`] - per failure domain capacity
//! - [`MatchedNetwork`] - port group joined to its provider subnet
//! - [`MergedEnvironmentConfig`] - the run's output, with [`Diagnostic`]s

pub mod capacity;
pub mod diagnostics;
pub mod environment;
pub mod network;
pub mod topology;

pub use capacity::{CapacityPool, CapacityRecord};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use environment::{MergedEnvironmentConfig, SCHEMA_VERSION};
pub use network::{
    MatchedNetwork, NetworkError, NetworkSegment, PhysicalLocation, ProviderSubnet,
    SecondaryAddressing, SubnetBlock, VlanId,
};
pub use topology::{Datacenter, Endpoint, FailureDomain, FailureDomainTopology};
