// Copyright (c) 2025 - Cowboy AI, Inc.
//! The merged configuration produced by one correlation run

use serde::{Deserialize, Serialize};

use super::{
    CapacityPool, CapacityRecord, Diagnostic, DiagnosticKind, Endpoint, FailureDomain,
    MatchedNetwork,
};

/// Version tag written into every artifact
pub const SCHEMA_VERSION: &str = "v1";

/// Aggregated result across every processed endpoint
///
/// Collections preserve endpoint iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEnvironmentConfig {
    pub schema_version: String,
    pub vcenters: Vec<Endpoint>,
    pub failure_domains: Vec<FailureDomain>,
    pub capacity: Vec<CapacityRecord>,
    pub pools: Vec<CapacityPool>,
    pub networks: Vec<MatchedNetwork>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for MergedEnvironmentConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            vcenters: Vec::new(),
            failure_domains: Vec::new(),
            capacity: Vec::new(),
            pools: Vec::new(),
            networks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl MergedEnvironmentConfig {
    /// No warnings fired during the run
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics of one kind
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Matched networks belonging to one endpoint
    pub fn networks_for<'a>(&'a self, server: &'a str) -> impl Iterator<Item = &'a MatchedNetwork> {
        self.networks.iter().filter(move |n| n.server == server)
    }
}
