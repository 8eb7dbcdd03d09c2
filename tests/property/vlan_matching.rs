// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the VLAN join
//!
//! For arbitrary port group and provider VLAN sets:
//! - every VLAN id on both sides yields exactly one match
//! - a VLAN id on only one side yields none
//!
//! The provider side may list a VLAN number more than once.

use proptest::prelude::*;
use std::collections::BTreeSet;

use vsphere_capacity_data::correlation::match_vlans;
use vsphere_capacity_data::domain::{NetworkSegment, PhysicalLocation, ProviderSubnet, SubnetBlock};

// ============================================================================
// Strategies
// ============================================================================

/// Distinct VLAN ids in a small range so the two sides overlap often
fn vlan_set() -> impl Strategy<Value = BTreeSet<u16>> {
    prop::collection::btree_set(1u16..64, 0..24)
}

/// Provider VLAN numbers, repeats allowed
fn provider_vlans() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..64, 0..32)
}

fn segments(ids: &BTreeSet<u16>) -> Vec<NetworkSegment> {
    ids.iter()
        .map(|id| NetworkSegment::new(format!("pg-{}", id), *id))
        .collect()
}

fn subnets<'a>(ids: impl IntoIterator<Item = &'a u16>) -> Vec<ProviderSubnet> {
    ids.into_iter()
        .map(|id| ProviderSubnet {
            vlan_number: i64::from(*id),
            blocks: vec![SubnetBlock {
                network_identifier: Some(format!("10.0.{}.0", id)),
                cidr: Some(24),
                ..Default::default()
            }],
        })
        .collect()
}

fn location() -> PhysicalLocation {
    PhysicalLocation::new("dal10", "dal10.pod01")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: exactly one match per VLAN id on both sides, none otherwise
    #[test]
    fn prop_one_match_per_shared_vlan(local in vlan_set(), remote in provider_vlans()) {
        let outcome = match_vlans("vc1", &segments(&local), &location(), &subnets(&remote))
            .expect("well-formed subnets must match");

        let remote_ids: BTreeSet<u16> = remote.iter().copied().collect();
        let expected: BTreeSet<u16> = local.intersection(&remote_ids).copied().collect();
        let matched: Vec<u16> = outcome.matches.iter().map(|m| m.vlan.value()).collect();
        let distinct: BTreeSet<u16> = matched.iter().copied().collect();

        prop_assert_eq!(matched.len(), distinct.len());
        prop_assert_eq!(distinct, expected);
    }

    /// Property: distinct VLANs on both sides raise no warnings
    #[test]
    fn prop_distinct_vlans_are_clean(local in vlan_set(), remote in vlan_set()) {
        let outcome = match_vlans("vc1", &segments(&local), &location(), &subnets(&remote))
            .expect("well-formed subnets must match");

        let matched: Vec<u16> = outcome.matches.iter().map(|m| m.vlan.value()).collect();
        let expected: Vec<u16> = local.intersection(&remote).copied().collect();

        prop_assert_eq!(matched, expected);
        prop_assert!(outcome.diagnostics.is_empty());
    }

    /// Property: every match pairs a port group with its own VLAN's subnet
    #[test]
    fn prop_match_pairs_same_vlan(local in vlan_set(), remote in provider_vlans()) {
        let outcome = match_vlans("vc1", &segments(&local), &location(), &subnets(&remote))
            .expect("well-formed subnets must match");

        for m in &outcome.matches {
            prop_assert_eq!(m.segment.vlan_id, m.vlan.value());
            prop_assert_eq!(
                m.machine_network_cidr.clone(),
                format!("10.0.{}.0/24", m.vlan.value())
            );
            prop_assert_eq!(m.endpoint.as_str(), "vc1");
        }
    }

    /// Property: swapping nothing but the endpoint name never changes the join
    #[test]
    fn prop_join_independent_of_endpoint_name(ids in vlan_set()) {
        let a = match_vlans("vc1", &segments(&ids), &location(), &subnets(&ids)).unwrap();
        let b = match_vlans("vc2", &segments(&ids), &location(), &subnets(&ids)).unwrap();

        prop_assert_eq!(a.matches.len(), ids.len());
        prop_assert_eq!(b.matches.len(), ids.len());
    }
}
