// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for IPv6 synthesis

use proptest::prelude::*;

use vsphere_capacity_data::correlation::{synthesize, GATEWAY_OFFSET, START_OFFSET};
use vsphere_capacity_data::domain::VlanId;

fn vlan_id() -> impl Strategy<Value = VlanId> {
    (VlanId::MIN..=VlanId::MAX).prop_map(|id| VlanId::new(id).unwrap())
}

/// One to three leading hextets, e.g. `fd00:1a`
fn prefix() -> impl Strategy<Value = String> {
    prop::collection::vec(0u16..=0xffff, 1..=3).prop_map(|groups| {
        groups
            .iter()
            .map(|g| format!("{:x}", g))
            .collect::<Vec<_>>()
            .join(":")
    })
}

proptest! {
    /// Property: synthesis is deterministic
    #[test]
    fn prop_synthesis_deterministic(p in prefix(), vlan in vlan_id()) {
        let first = synthesize(&p, vlan).unwrap();
        let second = synthesize(&p, vlan).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: gateway and start sit at fixed offsets inside a /64
    #[test]
    fn prop_fixed_offsets(p in prefix(), vlan in vlan_id()) {
        let addressing = synthesize(&p, vlan).unwrap();
        let gateway = u128::from(addressing.ipv6_gateway);
        let start = u128::from(addressing.ipv6_start_address);
        let base = gateway - GATEWAY_OFFSET;

        prop_assert_eq!(addressing.ipv6_cidr_length, 64);
        prop_assert_eq!(base & u128::from(u64::MAX), 0);
        prop_assert_eq!(start - base, START_OFFSET);
        let expected_prefix = format!("{}:{}::1/64", p, vlan);
        prop_assert_eq!(addressing.ipv6_prefix.parse::<ipnetwork::Ipv6Network>().unwrap(),
            expected_prefix.parse::<ipnetwork::Ipv6Network>().unwrap());
    }
}
