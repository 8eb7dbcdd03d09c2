// Copyright (c) 2025 - Cowboy AI, Inc.
//! Structured record of degraded-but-continuing conditions

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of non-fatal condition fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Endpoint has no failure domains configured
    NoFailureDomains,
    /// vCenter identity hostname differs from the configured server name
    HostnameMismatch,
    /// No account could place the endpoint's address
    LocationUnresolved,
    /// Datacenter known but no pod assigned
    PodUnassigned,
    /// Provider VLAN carries more than one subnet block
    AmbiguousSubnet,
    /// Two port groups on one endpoint share a VLAN id
    DuplicateVlan,
    /// Provider lists the same VLAN number more than once in a pod
    DuplicateProviderVlan,
    /// Port group VLAN id outside 1-4094
    InvalidSegmentVlan,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::NoFailureDomains => "no_failure_domains",
            DiagnosticKind::HostnameMismatch => "hostname_mismatch",
            DiagnosticKind::LocationUnresolved => "location_unresolved",
            DiagnosticKind::PodUnassigned => "pod_unassigned",
            DiagnosticKind::AmbiguousSubnet => "ambiguous_subnet",
            DiagnosticKind::DuplicateVlan => "duplicate_vlan",
            DiagnosticKind::DuplicateProviderVlan => "duplicate_provider_vlan",
            DiagnosticKind::InvalidSegmentVlan => "invalid_segment_vlan",
        };
        write!(f, "{}", s)
    }
}

/// A warning attached to the run result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(endpoint: &str, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.to_string()),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint {
            Some(endpoint) => write!(f, "[{}] {}: {}", self.kind, endpoint, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}
