// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS resolution for endpoint names

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::net::IpAddr;
use tracing::debug;

use super::HostResolver;

/// Drop repeated addresses, keeping first-seen order
fn unique_addresses(addresses: impl Iterator<Item = IpAddr>) -> Vec<IpAddr> {
    let mut seen = BTreeSet::new();
    addresses.filter(|addr| seen.insert(*addr)).collect()
}

/// Resolver backed by the system's name service
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let resolved = tokio::net::lookup_host((host, 0)).await?;
        let addresses = unique_addresses(resolved.map(|sock| sock.ip()));

        if addresses.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses for {}", host),
            ));
        }

        debug!("Resolved {} to {:?}", host, addresses);
        Ok(addresses)
    }
}

/// Fixed host table, for offline snapshots and tests
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: BTreeMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new(hosts: BTreeMap<String, Vec<IpAddr>>) -> Self {
        Self { hosts }
    }

    pub fn with_host(mut self, host: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        self.hosts.insert(host.into(), addresses);
        self
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        match self.hosts.get(host) {
            Some(addresses) if !addresses.is_empty() => Ok(addresses.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses for {}", host),
            )),
        }
    }
}
