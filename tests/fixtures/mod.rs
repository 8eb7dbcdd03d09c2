// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for vsphere-capacity-data
//!
//! Deterministic inventories for orchestrator tests. Every address, VLAN and
//! capacity figure is a fixed constant.
//!
//! Layout:
//! - `vc1.example.com` sits in dal10/dal10.pod01 and shares VLANs 1204 and
//!   1205 with the provider (1205 carries two subnet blocks)
//! - `vc2.example.com` resolves to an address no account knows

#![allow(dead_code)]

use std::net::IpAddr;

use vsphere_capacity_data::credentials::{
    CloudCredential, CloudCredentials, VCenterCredential, VCenterCredentials,
};
use vsphere_capacity_data::domain::{
    Datacenter, FailureDomain, FailureDomainTopology, NetworkSegment, SubnetBlock,
};
use vsphere_capacity_data::inventory::snapshot::{
    AccountSnapshot, LocationSnapshot, VCenterSnapshot, VlanSnapshot,
};
use vsphere_capacity_data::inventory::{ClusterCapacity, InventorySnapshot, StaticResolver};

pub const VC1: &str = "vc1.example.com";
pub const VC2: &str = "vc2.example.com";
pub const ACCOUNT: &str = "primary";

pub const VC1_ADDRESS: &str = "10.0.0.5";
pub const VC2_ADDRESS: &str = "10.1.0.5";

pub const DATACENTER: &str = "dal10";
pub const POD: &str = "dal10.pod01";

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("Invalid IP in test fixture")
}

pub fn failure_domain(name: &str, server: &str, cluster: &str) -> FailureDomain {
    FailureDomain {
        name: name.to_string(),
        region: "us-south".to_string(),
        zone: format!("{}-zone", name),
        server: server.to_string(),
        topology: FailureDomainTopology {
            datacenter: "IBMCloud".to_string(),
            compute_cluster: cluster.to_string(),
            networks: vec!["ci-vlan-1204".to_string()],
            datastore: "/IBMCloud/datastore/vsanDatastore".to_string(),
            resource_pool: None,
            folder: None,
        },
    }
}

/// A vCenter with one failure domain on `cluster` and the given port groups
pub fn vcenter(
    server: &str,
    fd_name: &str,
    capacity: ClusterCapacity,
    port_groups: Vec<NetworkSegment>,
) -> VCenterSnapshot {
    let cluster = format!("/IBMCloud/host/{}-cluster", fd_name);
    let mut snapshot = VCenterSnapshot {
        hostname: server.to_string(),
        failure_domains: vec![failure_domain(fd_name, server, &cluster)],
        datacenters: vec![Datacenter {
            name: "IBMCloud".to_string(),
            path: "/IBMCloud".to_string(),
        }],
        port_groups,
        ..Default::default()
    };
    snapshot.clusters.insert(cluster, capacity);
    snapshot
}

pub fn block(network: &str, cidr: u8, pod: &str) -> SubnetBlock {
    SubnetBlock {
        network_identifier: Some(network.to_string()),
        cidr: Some(cidr),
        gateway: Some(format!("{}1", network.trim_end_matches('0'))),
        netmask: Some("255.255.255.128".to_string()),
        ip_address_count: Some(128),
        ip_addresses: vec![network.to_string()],
        subnet_type: Some("SECONDARY_ON_VLAN".to_string()),
        pod_name: Some(pod.to_string()),
        datacenter_name: Some(DATACENTER.to_string()),
    }
}

pub fn vlan(pod: &str, number: i64, blocks: Vec<SubnetBlock>) -> VlanSnapshot {
    VlanSnapshot {
        datacenter_name: DATACENTER.to_string(),
        pod_name: pod.to_string(),
        vlan_number: number,
        blocks,
    }
}

pub fn location(addresses: &[&str], datacenter: Option<&str>, pod: Option<&str>) -> LocationSnapshot {
    LocationSnapshot {
        addresses: addresses.iter().map(|a| ip(a)).collect(),
        datacenter_name: datacenter.map(str::to_string),
        pod_name: pod.map(str::to_string),
    }
}

/// Provider account placing VC1 in dal10.pod01
pub fn primary_account() -> AccountSnapshot {
    AccountSnapshot {
        locations: vec![location(&[VC1_ADDRESS], Some(DATACENTER), Some(POD))],
        vlans: vec![
            vlan(POD, 1204, vec![block("10.38.192.0", 25, POD)]),
            vlan(
                POD,
                1205,
                vec![block("10.38.193.0", 25, POD), block("10.38.194.0", 26, POD)],
            ),
            vlan(POD, 1400, vec![block("10.38.195.0", 25, POD)]),
        ],
    }
}

/// Two endpoints: VC1 resolvable with two shared VLANs, VC2 unresolvable
pub fn two_endpoint_inventory() -> InventorySnapshot {
    InventorySnapshot::default()
        .with_vcenter(
            VC1,
            vcenter(
                VC1,
                "fd-dal10-a",
                ClusterCapacity {
                    cpu_cores: 32,
                    memory_bytes: 128 * GIB,
                },
                vec![
                    NetworkSegment::new("ci-vlan-1204", 1204),
                    NetworkSegment::new("ci-vlan-1205", 1205),
                    NetworkSegment::new("ci-vlan-1300", 1300),
                ],
            ),
        )
        .with_vcenter(
            VC2,
            vcenter(
                VC2,
                "fd-wdc04-a",
                ClusterCapacity {
                    cpu_cores: 48,
                    memory_bytes: 256 * GIB,
                },
                vec![NetworkSegment::new("ci-vlan-1204", 1204)],
            ),
        )
        .with_account(ACCOUNT, primary_account())
}

pub fn resolver() -> StaticResolver {
    StaticResolver::default()
        .with_host(VC1, vec![ip(VC1_ADDRESS)])
        .with_host(VC2, vec![ip(VC2_ADDRESS)])
}

pub fn vcenter_credentials(servers: &[&str]) -> VCenterCredentials {
    servers
        .iter()
        .map(|s| {
            (
                s.to_string(),
                VCenterCredential {
                    username: "administrator@vsphere.local".to_string(),
                    password: "password".to_string(),
                },
            )
        })
        .collect()
}

pub fn cloud_credentials(accounts: &[&str]) -> CloudCredentials {
    accounts
        .iter()
        .map(|a| {
            (
                a.to_string(),
                CloudCredential {
                    username: format!("{}-user", a),
                    api_token: "token".to_string(),
                },
            )
        })
        .collect()
}
