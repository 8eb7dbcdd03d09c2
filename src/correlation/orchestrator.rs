// Copyright (c) 2025 - Cowboy AI, Inc.
//! Correlation Orchestrator
//!
//! Drives every endpoint through the correlation pipeline, one at a time:
//!
//! ```text
//! authenticate
//!     ↓
//! failure domains ──none──> warn, next endpoint
//!     ↓
//! capacity per failure domain (fatal on error)
//!     ↓
//! datacenters ─> identity check ─> resolve location ──unresolved──> warn, next endpoint
//!                                        ↓
//!                           port groups ⋈ provider VLANs
//!                                        ↓
//!                              IPv6 per match ─> accumulate
//! ```
//!
//! Endpoints and accounts are visited in sorted order, so the artifact is
//! reproducible across runs.

use tracing::{debug, info, warn};

use super::capacity::summarize_failure_domain;
use super::ipv6::synthesize;
use super::location::{check_identity, resolve_location};
use super::vlan::match_vlans;
use crate::credentials::{CloudCredentials, VCenterCredentials};
use crate::domain::{CapacityPool, Diagnostic, DiagnosticKind, Endpoint, MergedEnvironmentConfig};
use crate::errors::{CorrelationError, CorrelationResult};
use crate::inventory::{CloudInventoryProvider, HostResolver, VSphereInventoryProvider};

/// Knobs for a correlation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationSettings {
    /// Leading IPv6 groups, e.g. `fd65:a1a8:60ad`
    pub ipv6_prefix: String,
    /// Only port groups whose name contains this are considered
    pub port_group_filter: String,
}

impl CorrelationSettings {
    pub fn new(ipv6_prefix: impl Into<String>) -> Self {
        Self {
            ipv6_prefix: ipv6_prefix.into(),
            port_group_filter: String::new(),
        }
    }

    pub fn with_port_group_filter(mut self, filter: impl Into<String>) -> Self {
        self.port_group_filter = filter.into();
        self
    }
}

/// Runs the correlation across all endpoints and accounts
pub struct CorrelationOrchestrator<V, C, R> {
    vsphere: V,
    cloud: C,
    resolver: R,
    settings: CorrelationSettings,
}

impl<V, C, R> CorrelationOrchestrator<V, C, R>
where
    V: VSphereInventoryProvider,
    C: CloudInventoryProvider,
    R: HostResolver,
{
    pub fn new(vsphere: V, cloud: C, resolver: R, settings: CorrelationSettings) -> Self {
        Self {
            vsphere,
            cloud,
            resolver,
            settings,
        }
    }

    /// Correlate every endpoint in `vcenters` against every account in `accounts`
    pub async fn run(
        &mut self,
        vcenters: &VCenterCredentials,
        accounts: &CloudCredentials,
    ) -> CorrelationResult<MergedEnvironmentConfig> {
        let mut env = MergedEnvironmentConfig::default();

        for (account, credential) in accounts {
            self.cloud
                .add_credentials(account, &credential.username, &credential.api_token)
                .await
                .map_err(|e| CorrelationError::upstream("AddCredentials", account, e))?;
        }
        let account_names: Vec<String> = accounts.keys().cloned().collect();

        for (server, credential) in vcenters {
            info!("Correlating vCenter {}", server);
            self.vsphere
                .add_credentials(server, &credential.username, &credential.password)
                .await
                .map_err(|e| CorrelationError::upstream("AddCredentials", server, e))?;

            self.correlate_endpoint(server, &account_names, &mut env).await?;
        }

        info!(
            "Correlation finished: {} vCenters, {} failure domains, {} networks, {} warnings",
            env.vcenters.len(),
            env.failure_domains.len(),
            env.networks.len(),
            env.diagnostics.len()
        );
        Ok(env)
    }

    async fn correlate_endpoint(
        &self,
        server: &str,
        accounts: &[String],
        env: &mut MergedEnvironmentConfig,
    ) -> CorrelationResult<()> {
        let failure_domains = match self.vsphere.get_failure_domains(server).await {
            Ok(fds) if !fds.is_empty() => fds,
            Ok(_) => {
                record(
                    env,
                    Diagnostic::new(
                        server,
                        DiagnosticKind::NoFailureDomains,
                        "no failure domains found",
                    ),
                );
                return Ok(());
            }
            Err(e) => {
                record(
                    env,
                    Diagnostic::new(
                        server,
                        DiagnosticKind::NoFailureDomains,
                        format!("no failure domains found: {}", e),
                    ),
                );
                return Ok(());
            }
        };

        for fd in &failure_domains {
            let capacity = summarize_failure_domain(&self.vsphere, server, fd).await?;
            env.pools.push(CapacityPool::from_record(fd, &capacity));
            env.capacity.push(capacity);
        }
        env.failure_domains.extend(failure_domains);

        let datacenters = self
            .vsphere
            .get_datacenters(server)
            .await
            .map_err(|e| CorrelationError::upstream("GetDatacenters", server, e))?;
        env.vcenters.push(Endpoint {
            server: server.to_string(),
            datacenters: datacenters.into_iter().map(|dc| dc.path).collect(),
        });

        if let Some(diagnostic) = check_identity(&self.vsphere, server).await? {
            env.diagnostics.push(diagnostic);
        }

        let resolution = resolve_location(server, accounts, &self.cloud, &self.resolver).await?;
        if let Some(diagnostic) = resolution.diagnostic(server) {
            record(env, diagnostic);
            return Ok(());
        }
        let (Some(account), Some(datacenter), Some(pod)) = (
            resolution.account.as_deref(),
            resolution.location.datacenter_name.as_deref(),
            resolution.location.pod_name.as_deref(),
        ) else {
            return Ok(());
        };

        let segments = self
            .vsphere
            .get_distributed_port_groups(server, &self.settings.port_group_filter)
            .await
            .map_err(|e| CorrelationError::upstream("GetDistributedPortGroups", server, e))?;

        let subnets = self
            .cloud
            .get_vlan_subnets(account, datacenter, pod)
            .await
            .map_err(|e| {
                CorrelationError::upstream("GetVlanSubnets", &format!("{}/{}", datacenter, pod), e)
            })?;

        let outcome = match_vlans(server, &segments, &resolution.location, &subnets)?;
        for diagnostic in outcome.diagnostics {
            record(env, diagnostic);
        }

        for vlan_match in outcome.matches {
            let addressing = synthesize(&self.settings.ipv6_prefix, vlan_match.vlan)?;
            debug!(
                "Matched {} on VLAN {} -> {} / {}",
                vlan_match.segment.name,
                vlan_match.vlan,
                vlan_match.machine_network_cidr,
                addressing.ipv6_prefix
            );
            env.networks.push(vlan_match.into_network(addressing));
        }

        Ok(())
    }
}

fn record(env: &mut MergedEnvironmentConfig, diagnostic: Diagnostic) {
    warn!("{}", diagnostic);
    env.diagnostics.push(diagnostic);
}
