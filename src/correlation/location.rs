// Copyright (c) 2025 - Cowboy AI, Inc.
//! Location Resolver
//!
//! Places a vCenter endpoint inside the provider's datacenter/pod scheme:
//!
//! 1. DNS resolve the endpoint name (failure aborts the run)
//! 2. Ask each account, in order, which location holds those addresses
//! 3. First account reporting a datacenter wins
//!
//! An endpoint nobody can place, or one placed in a datacenter without a pod,
//! comes back unresolved so the caller can skip VLAN matching for it.

use std::net::IpAddr;
use tracing::{debug, warn};

use crate::domain::{Diagnostic, DiagnosticKind, PhysicalLocation};
use crate::errors::{CorrelationError, CorrelationResult};
use crate::inventory::{CloudInventoryProvider, HostResolver, VSphereInventoryProvider};

/// Outcome of placing one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationResolution {
    pub addresses: Vec<IpAddr>,
    pub location: PhysicalLocation,
    /// Account that reported the datacenter
    pub account: Option<String>,
}

impl LocationResolution {
    /// Continuation flag: VLAN matching may proceed
    pub fn is_resolved(&self) -> bool {
        self.account.is_some() && self.location.is_resolved()
    }

    fn first_address(&self) -> String {
        self.addresses
            .first()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "<none>".to_string())
    }

    /// Warning describing why matching is skipped, if it is
    pub fn diagnostic(&self, endpoint: &str) -> Option<Diagnostic> {
        if self.is_resolved() {
            return None;
        }

        if self.location.has_datacenter() {
            Some(Diagnostic::new(
                endpoint,
                DiagnosticKind::PodUnassigned,
                format!(
                    "unable to retrieve network subnets for datacenter {} (no pod) using IP address {}",
                    self.location.datacenter_name.as_deref().unwrap_or_default(),
                    self.first_address()
                ),
            ))
        } else {
            Some(Diagnostic::new(
                endpoint,
                DiagnosticKind::LocationUnresolved,
                format!(
                    "unable to find physical location using IP address {}",
                    self.first_address()
                ),
            ))
        }
    }
}

/// Resolve the physical location of `endpoint`
pub async fn resolve_location<C, R>(
    endpoint: &str,
    accounts: &[String],
    cloud: &C,
    resolver: &R,
) -> CorrelationResult<LocationResolution>
where
    C: CloudInventoryProvider + ?Sized,
    R: HostResolver + ?Sized,
{
    let addresses = resolver
        .lookup(endpoint)
        .await
        .map_err(|e| CorrelationError::Resolution(format!("{}: {}", endpoint, e)))?;

    for account in accounts {
        let location = cloud
            .resolve_physical_location(account, &addresses)
            .await
            .map_err(|e| CorrelationError::upstream("ResolvePhysicalLocation", account, e))?;

        if location.has_datacenter() {
            debug!("Account {} places {} in {}", account, endpoint, location);
            return Ok(LocationResolution {
                addresses,
                location,
                account: Some(account.clone()),
            });
        }
    }

    Ok(LocationResolution {
        addresses,
        location: PhysicalLocation::unresolved(),
        account: None,
    })
}

/// Compare the endpoint's self-reported hostname with its configured name
///
/// A mismatch is only a warning; the identity query failing is not.
pub async fn check_identity<V>(vsphere: &V, endpoint: &str) -> CorrelationResult<Option<Diagnostic>>
where
    V: VSphereInventoryProvider + ?Sized,
{
    let hostname = vsphere
        .get_endpoint_identity_hostname(endpoint)
        .await
        .map_err(|e| CorrelationError::upstream("GetEndpointIdentityHostname", endpoint, e))?;

    if hostname == endpoint {
        return Ok(None);
    }

    warn!("vCenter URL does not match {} != {}", endpoint, hostname);
    Ok(Some(Diagnostic::new(
        endpoint,
        DiagnosticKind::HostnameMismatch,
        format!("vCenter reports hostname {}", hostname),
    )))
}
