// Copyright (c) 2025 - Cowboy AI, Inc.
//! Run configuration

use std::path::PathBuf;

use crate::correlation::CorrelationSettings;

/// Everything a `generate` run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// vCenter credential file
    pub vcenter_credentials: PathBuf,

    /// Cloud account credential file
    pub cloud_credentials: PathBuf,

    /// Where the merged configuration is written
    pub output: PathBuf,

    /// Leading IPv6 groups for synthesized addressing
    pub ipv6_prefix: String,

    /// Port group name filter (substring, empty matches all)
    pub port_group_filter: String,

    /// Inventory snapshot replayed instead of live inventories
    pub inventory: Option<PathBuf>,
}

impl GenerateConfig {
    pub fn new(ipv6_prefix: impl Into<String>) -> Self {
        Self {
            vcenter_credentials: PathBuf::from("vcenter.json"),
            cloud_credentials: PathBuf::from("ibmcloud.json"),
            output: PathBuf::from("output.json"),
            ipv6_prefix: ipv6_prefix.into(),
            port_group_filter: String::new(),
            inventory: None,
        }
    }

    pub fn settings(&self) -> CorrelationSettings {
        CorrelationSettings::new(self.ipv6_prefix.clone())
            .with_port_group_filter(self.port_group_filter.clone())
    }
}
