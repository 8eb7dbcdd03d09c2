// Copyright (c) 2025 - Cowboy AI, Inc.
//! Secondary Address Synthesizer
//!
//! Every matched VLAN gets a /64 carved from a site prefix:
//!
//! ```text
//! prefix "fd00:1", VLAN 100
//!   network  fd00:1:100::1/64
//!   gateway  fd00:1:100::2   (base + 2)
//!   start    fd00:1:100::4   (base + 4)
//! ```
//!
//! The VLAN number is spliced in as its decimal digits, so it reads the same
//! in the address as on the switch.

use ipnetwork::Ipv6Network;
use std::net::Ipv6Addr;
use thiserror::Error;

use crate::domain::{SecondaryAddressing, VlanId};

/// Gateway offset from the network base
pub const GATEWAY_OFFSET: u128 = 2;

/// First allocatable address offset from the network base
pub const START_OFFSET: u128 = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("IPv6 prefix does not form a network: {0}")]
    InvalidPrefix(String),

    #[error("Offset {offset} falls outside {network}")]
    OutOfNetwork { network: String, offset: u128 },
}

/// Derive the IPv6 block, gateway and start address for `vlan`
pub fn synthesize(prefix: &str, vlan: VlanId) -> Result<SecondaryAddressing, SynthesisError> {
    let template = format!("{}:{}::1/64", prefix, vlan);
    let network: Ipv6Network = template
        .parse()
        .map_err(|e| SynthesisError::InvalidPrefix(format!("{} ({})", template, e)))?;

    Ok(SecondaryAddressing {
        ipv6_prefix: network.to_string(),
        ipv6_cidr_length: u128::from(network.mask()).count_ones() as u8,
        ipv6_gateway: nth_address(&network, GATEWAY_OFFSET)?,
        ipv6_start_address: nth_address(&network, START_OFFSET)?,
    })
}

fn nth_address(network: &Ipv6Network, offset: u128) -> Result<Ipv6Addr, SynthesisError> {
    u128::from(network.network())
        .checked_add(offset)
        .map(Ipv6Addr::from)
        .filter(|addr| network.contains(*addr))
        .ok_or_else(|| SynthesisError::OutOfNetwork {
            network: network.to_string(),
            offset,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn vlan(id: u16) -> VlanId {
        VlanId::new(id).unwrap()
    }

    #[test]
    fn test_reference_vlan() {
        let addressing = synthesize("fd00:1", vlan(100)).unwrap();
        assert_eq!(addressing.ipv6_prefix, "fd00:1:100::1/64");
        assert_eq!(addressing.ipv6_cidr_length, 64);
        assert_eq!(addressing.ipv6_gateway, "fd00:1:100::2".parse::<Ipv6Addr>().unwrap());
        assert_eq!(
            addressing.ipv6_start_address,
            "fd00:1:100::4".parse::<Ipv6Addr>().unwrap()
        );
    }

    #[test]
    fn test_deterministic() {
        let first = synthesize("fd00:1", vlan(100)).unwrap();
        for _ in 0..10 {
            assert_eq!(synthesize("fd00:1", vlan(100)).unwrap(), first);
        }
    }

    #[test_case("fd65:a1a8:60ad", 1204, "fd65:a1a8:60ad:1204::2", "fd65:a1a8:60ad:1204::4" ; "site prefix")]
    #[test_case("fd00", 1, "fd00:1::2", "fd00:1::4" ; "lowest vlan")]
    #[test_case("fd00:1", 4094, "fd00:1:4094::2", "fd00:1:4094::4" ; "highest vlan")]
    fn test_gateway_and_start(prefix: &str, id: u16, gateway: &str, start: &str) {
        let addressing = synthesize(prefix, vlan(id)).unwrap();
        assert_eq!(addressing.ipv6_gateway.to_string(), gateway);
        assert_eq!(addressing.ipv6_start_address.to_string(), start);
        assert_eq!(addressing.ipv6_cidr_length, 64);
    }

    #[test_case("not-an-ip" ; "garbage")]
    #[test_case("" ; "empty")]
    #[test_case("fd00::1" ; "already compressed")]
    #[test_case("fd00:1:2:3:4:5:6" ; "too many groups")]
    #[test_case("10.0.0" ; "ipv4")]
    fn test_invalid_prefix(prefix: &str) {
        let err = synthesize(prefix, vlan(100)).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidPrefix(_)));
    }
}
