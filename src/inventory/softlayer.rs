// Copyright (c) 2025 - Cowboy AI, Inc.

//! IBM Cloud classic infrastructure (SoftLayer) inventory adapter
//!
//! Implements [`CloudInventoryProvider`] over the SoftLayer REST API:
//!
//! ```text
//! ResolvePhysicalLocation = GET /SoftLayer_Network_Subnet_IpAddress/getByIpAddress/{ip}
//! GetVlanSubnets          = GET /SoftLayer_Account/getNetworkVlans (filtered by datacenter)
//! ```
//!
//! Each account authenticates with HTTP basic auth (`username:apiToken`), so
//! one client carries one credential pair per account.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, info};

use super::{CloudInventoryProvider, InventoryError, InventoryResult};
use crate::domain::{PhysicalLocation, ProviderSubnet, SubnetBlock};

const LOCATION_MASK: &str = "mask[subnet[podName,datacenter[name]]]";
const VLAN_MASK: &str = "mask[vlanNumber,subnets[networkIdentifier,cidr,gateway,netmask,\
ipAddressCount,subnetType,podName,datacenter[name],ipAddresses[ipAddress]]]";

/// Configuration for SoftLayer connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftLayerConfig {
    /// REST endpoint
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for SoftLayerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.softlayer.com/rest/v3.1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
struct AccountCredentials {
    username: String,
    api_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlDatacenter {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlIpAddress {
    ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlSubnet {
    network_identifier: Option<String>,
    cidr: Option<u8>,
    gateway: Option<String>,
    netmask: Option<String>,
    ip_address_count: Option<u32>,
    subnet_type: Option<String>,
    pod_name: Option<String>,
    datacenter: Option<SlDatacenter>,
    #[serde(default)]
    ip_addresses: Vec<SlIpAddress>,
}

#[derive(Debug, Deserialize)]
struct SlAddressRecord {
    subnet: Option<SlSubnet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlVlan {
    vlan_number: i64,
    #[serde(default)]
    subnets: Vec<SlSubnet>,
}

impl From<SlSubnet> for SubnetBlock {
    fn from(subnet: SlSubnet) -> Self {
        Self {
            network_identifier: subnet.network_identifier,
            cidr: subnet.cidr,
            gateway: subnet.gateway,
            netmask: subnet.netmask,
            ip_address_count: subnet.ip_address_count,
            ip_addresses: subnet
                .ip_addresses
                .into_iter()
                .filter_map(|a| a.ip_address)
                .collect(),
            subnet_type: subnet.subnet_type,
            pod_name: subnet.pod_name,
            datacenter_name: subnet.datacenter.and_then(|dc| dc.name),
        }
    }
}

/// Live SoftLayer inventory client
pub struct SoftLayerClient {
    config: SoftLayerConfig,
    client: Client,
    accounts: BTreeMap<String, AccountCredentials>,
}

impl SoftLayerClient {
    /// Create a new SoftLayer client
    pub fn new(config: SoftLayerConfig) -> InventoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InventoryError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            accounts: BTreeMap::new(),
        })
    }

    fn credentials(&self, account: &str) -> InventoryResult<&AccountCredentials> {
        self.accounts
            .get(account)
            .ok_or_else(|| InventoryError::NotAuthenticated(account.to_string()))
    }

    async fn get_json<T>(
        &self,
        account: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> InventoryResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let creds = self.credentials(account)?;
        let url = format!("{}/{}", self.config.base_url, path);
        let response = self
            .client
            .get(&url)
            .basic_auth(&creds.username, Some(&creds.api_token))
            .query(query)
            .send()
            .await
            .map_err(|e| InventoryError::Transport(format!("SoftLayer API error: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(InventoryError::Authentication {
                    target: account.to_string(),
                    reason: format!("SoftLayer returned {}", response.status()),
                })
            }
            status if status.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| InventoryError::Transport(e.to_string()))?;
                if body.trim().is_empty() || body.trim() == "null" {
                    return Ok(None);
                }
                serde_json::from_str(&body)
                    .map(Some)
                    .map_err(|e| InventoryError::Decode(e.to_string()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(InventoryError::Transport(format!(
                    "SoftLayer API returned {}: {}",
                    status, body
                )))
            }
        }
    }
}

#[async_trait]
impl CloudInventoryProvider for SoftLayerClient {
    async fn add_credentials(
        &mut self,
        account: &str,
        username: &str,
        api_token: &str,
    ) -> InventoryResult<()> {
        if username.is_empty() || api_token.is_empty() {
            return Err(InventoryError::Authentication {
                target: account.to_string(),
                reason: "username and API token are required".to_string(),
            });
        }

        info!("Registering SoftLayer account {}", account);
        self.accounts.insert(
            account.to_string(),
            AccountCredentials {
                username: username.to_string(),
                api_token: api_token.to_string(),
            },
        );
        Ok(())
    }

    async fn resolve_physical_location(
        &self,
        account: &str,
        addresses: &[IpAddr],
    ) -> InventoryResult<PhysicalLocation> {
        for address in addresses {
            let path = format!("SoftLayer_Network_Subnet_IpAddress/getByIpAddress/{}.json", address);
            let record: Option<SlAddressRecord> = self
                .get_json(account, &path, &[("objectMask", LOCATION_MASK.to_string())])
                .await?;

            if let Some(subnet) = record.and_then(|r| r.subnet) {
                let datacenter_name = subnet.datacenter.and_then(|dc| dc.name);
                if datacenter_name.is_some() {
                    debug!("Account {} places {} in {:?}", account, address, datacenter_name);
                    return Ok(PhysicalLocation {
                        datacenter_name,
                        pod_name: subnet.pod_name,
                    });
                }
            }
        }

        Ok(PhysicalLocation::unresolved())
    }

    async fn get_vlan_subnets(
        &self,
        account: &str,
        datacenter_name: &str,
        pod_name: &str,
    ) -> InventoryResult<Vec<ProviderSubnet>> {
        let filter = serde_json::json!({
            "networkVlans": {
                "primaryRouter": { "datacenter": { "name": { "operation": datacenter_name } } }
            }
        });
        let vlans: Vec<SlVlan> = self
            .get_json(
                account,
                "SoftLayer_Account/getNetworkVlans.json",
                &[
                    ("objectMask", VLAN_MASK.to_string()),
                    ("objectFilter", filter.to_string()),
                ],
            )
            .await?
            .unwrap_or_default();

        let subnets: Vec<ProviderSubnet> = vlans
            .into_iter()
            .filter(|vlan| {
                vlan.subnets
                    .iter()
                    .any(|s| s.pod_name.as_deref() == Some(pod_name))
            })
            .map(|vlan| ProviderSubnet {
                vlan_number: vlan.vlan_number,
                blocks: vlan.subnets.into_iter().map(SubnetBlock::from).collect(),
            })
            .collect();

        debug!(
            "Account {} has {} VLANs in {}/{}",
            account,
            subnets.len(),
            datacenter_name,
            pod_name
        );
        Ok(subnets)
    }
}
