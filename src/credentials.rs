// Copyright (c) 2025 - Cowboy AI, Inc.
//! Credential files for vCenter endpoints and cloud accounts
//!
//! Both files are JSON objects keyed by endpoint or account name. They are
//! read into [`BTreeMap`]s so every run visits endpoints and accounts in the
//! same order.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::errors::{CorrelationError, CorrelationResult};

/// vCenter login, keyed by server name
#[derive(Clone, Deserialize)]
pub struct VCenterCredential {
    pub username: String,
    pub password: String,
}

/// Cloud account login, keyed by account name
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudCredential {
    pub username: String,
    pub api_token: String,
}

impl fmt::Debug for VCenterCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VCenterCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for CloudCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCredential")
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

pub type VCenterCredentials = BTreeMap<String, VCenterCredential>;
pub type CloudCredentials = BTreeMap<String, CloudCredential>;

fn load<T>(path: &Path) -> CorrelationResult<BTreeMap<String, T>>
where
    T: for<'de> Deserialize<'de>,
{
    let bytes = std::fs::read(path)
        .map_err(|e| CorrelationError::Credential(format!("{}: {}", path.display(), e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CorrelationError::Credential(format!("{}: {}", path.display(), e)))
}

/// Read the vCenter credential file
pub fn load_vcenter_credentials(path: impl AsRef<Path>) -> CorrelationResult<VCenterCredentials> {
    load(path.as_ref())
}

/// Read the cloud account credential file
pub fn load_cloud_credentials(path: impl AsRef<Path>) -> CorrelationResult<CloudCredentials> {
    load(path.as_ref())
}
