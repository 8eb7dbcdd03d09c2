// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Correlation Engine
//!
//! Reconciles the vSphere view of an environment with the cloud provider's
//! view of where it physically sits and which subnets it may use.
//!
//! # Components
//!
//! - [`capacity`] - per failure domain CPU/memory summary
//! - [`location`] - endpoint name → datacenter/pod
//! - [`vlan`] - port groups ⋈ provider VLANs, scoped per endpoint
//! - [`ipv6`] - deterministic IPv6 /64, gateway and start address per VLAN
//! - [`orchestrator`] - drives the above over every endpoint
//!
//! Only the orchestrator performs I/O, and only through the
//! [`inventory`](crate::inventory) traits.

pub mod capacity;
pub mod ipv6;
pub mod location;
pub mod orchestrator;
pub mod vlan;

pub use capacity::{summarize, summarize_failure_domain};
pub use ipv6::{synthesize, SynthesisError, GATEWAY_OFFSET, START_OFFSET};
pub use location::{check_identity, resolve_location, LocationResolution};
pub use orchestrator::{CorrelationOrchestrator, CorrelationSettings};
pub use vlan::{index_segments, match_vlans, MatchOutcome, SegmentKey, VlanMatch};
