// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN Matcher
//!
//! Joins an endpoint's port groups with the provider VLANs of the pod the
//! endpoint was placed in. The join is a pure function: warnings come back as
//! [`Diagnostic`]s next to the matches instead of being logged here.
//!
//! ```text
//! port groups ──index by (endpoint, vlan)──┐
//!                                          ├──> VlanMatch (hits only)
//! provider VLANs ──look up each vlanNumber──┘
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    Diagnostic, DiagnosticKind, MatchedNetwork, NetworkSegment, PhysicalLocation, ProviderSubnet,
    SecondaryAddressing, SubnetBlock, VlanId,
};
use crate::errors::{CorrelationError, CorrelationResult};

/// Segment lookup key; VLAN ids only compete within one endpoint
pub type SegmentKey = (String, VlanId);

/// A port group and the provider subnet block carrying the same VLAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanMatch {
    pub endpoint: String,
    pub vlan: VlanId,
    pub segment: NetworkSegment,
    pub block: SubnetBlock,
    pub location: PhysicalLocation,
    pub machine_network_cidr: String,
    pub cidr: u8,
}

impl VlanMatch {
    /// Attach the synthesized IPv6 addressing
    pub fn into_network(self, ipv6: SecondaryAddressing) -> MatchedNetwork {
        let block = self.block;
        MatchedNetwork {
            name: self.segment.name.clone(),
            port_group_name: self.segment.name,
            vlan_id: self.vlan,
            server: self.endpoint,
            pod_name: block.pod_name.or(self.location.pod_name),
            datacenter_name: block.datacenter_name.or(self.location.datacenter_name),
            cidr: self.cidr,
            gateway: block.gateway,
            ip_address_count: block.ip_address_count,
            netmask: block.netmask,
            subnet_type: block.subnet_type,
            machine_network_cidr: self.machine_network_cidr,
            ip_addresses: block.ip_addresses,
            ipv6,
        }
    }
}

/// Matches plus the warnings raised while producing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matches: Vec<VlanMatch>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Index port groups by `(endpoint, vlan)`
///
/// A repeated VLAN id keeps the last port group seen. Port groups whose VLAN
/// id is outside 1-4094 (trunks, untagged) cannot be matched and are dropped.
pub fn index_segments(
    endpoint: &str,
    segments: &[NetworkSegment],
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<SegmentKey, NetworkSegment> {
    let mut index = BTreeMap::new();

    for segment in segments {
        let vlan = match VlanId::new(segment.vlan_id) {
            Ok(vlan) => vlan,
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    endpoint,
                    DiagnosticKind::InvalidSegmentVlan,
                    format!("port group {}: {}", segment.name, e),
                ));
                continue;
            }
        };

        if let Some(previous) = index.insert((endpoint.to_string(), vlan), segment.clone()) {
            diagnostics.push(Diagnostic::new(
                endpoint,
                DiagnosticKind::DuplicateVlan,
                format!(
                    "VLAN {} used by port groups {} and {}; keeping {}",
                    vlan, previous.name, segment.name, segment.name
                ),
            ));
        }
    }

    index
}

/// Join `segments` with `subnets` on VLAN id, scoped to `endpoint`
///
/// Each VLAN id yields at most one match: the first provider record wins.
///
/// Fails when a hit's first subnet block lacks the network identifier or
/// CIDR length: the machine network CIDR cannot be formed without them.
pub fn match_vlans(
    endpoint: &str,
    segments: &[NetworkSegment],
    location: &PhysicalLocation,
    subnets: &[ProviderSubnet],
) -> CorrelationResult<MatchOutcome> {
    let mut outcome = MatchOutcome::default();
    let index = index_segments(endpoint, segments, &mut outcome.diagnostics);
    let mut emitted: BTreeSet<SegmentKey> = BTreeSet::new();

    for subnet in subnets {
        // Provider VLANs outside 1-4094 cannot collide with an indexed segment
        let Ok(vlan) = VlanId::try_from(subnet.vlan_number) else {
            continue;
        };
        let key = (endpoint.to_string(), vlan);
        let Some(segment) = index.get(&key) else {
            continue;
        };

        // One match per VLAN; later provider records with the same number are dropped
        if !emitted.insert(key) {
            outcome.diagnostics.push(Diagnostic::new(
                endpoint,
                DiagnosticKind::DuplicateProviderVlan,
                format!(
                    "VLAN {} listed more than once in {}, keeping the first record",
                    vlan, location
                ),
            ));
            continue;
        }

        let block = subnet.blocks.first().ok_or_else(|| {
            CorrelationError::DataIntegrity(format!(
                "VLAN {} in {} has no subnet blocks",
                vlan, location
            ))
        })?;

        if subnet.blocks.len() > 1 {
            outcome.diagnostics.push(Diagnostic::new(
                endpoint,
                DiagnosticKind::AmbiguousSubnet,
                format!(
                    "VLAN {} has {} subnet blocks, using only the first entry",
                    vlan,
                    subnet.blocks.len()
                ),
            ));
        }

        let machine_network_cidr = block.machine_network_cidr(vlan.value())?;
        let cidr = block.cidr.ok_or_else(|| {
            CorrelationError::DataIntegrity(format!("VLAN {} is missing CIDR length", vlan))
        })?;

        outcome.matches.push(VlanMatch {
            endpoint: endpoint.to_string(),
            vlan,
            segment: segment.clone(),
            block: block.clone(),
            location: location.clone(),
            machine_network_cidr,
            cidr,
        });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VC: &str = "vc1.example.com";

    fn block(network: &str, cidr: u8) -> SubnetBlock {
        SubnetBlock {
            network_identifier: Some(network.to_string()),
            cidr: Some(cidr),
            gateway: Some("10.38.192.1".to_string()),
            ..Default::default()
        }
    }

    fn subnet(vlan: i64, blocks: Vec<SubnetBlock>) -> ProviderSubnet {
        ProviderSubnet {
            vlan_number: vlan,
            blocks,
        }
    }

    fn location() -> PhysicalLocation {
        PhysicalLocation::new("dal10", "dal10.pod01")
    }

    #[test]
    fn test_matches_only_shared_vlans() {
        let segments = vec![
            NetworkSegment::new("ci-vlan-1204", 1204),
            NetworkSegment::new("ci-vlan-1205", 1205),
        ];
        let subnets = vec![
            subnet(1204, vec![block("10.38.192.0", 25)]),
            subnet(1300, vec![block("10.38.200.0", 25)]),
        ];

        let outcome = match_vlans(VC, &segments, &location(), &subnets).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].segment.name, "ci-vlan-1204");
        assert_eq!(outcome.matches[0].machine_network_cidr, "10.38.192.0/25");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_multiple_blocks_use_first_and_warn() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let subnets = vec![subnet(
            1204,
            vec![block("10.38.192.0", 25), block("10.38.193.0", 26)],
        )];

        let outcome = match_vlans(VC, &segments, &location(), &subnets).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].machine_network_cidr, "10.38.192.0/25");
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::AmbiguousSubnet);
    }

    #[test]
    fn test_missing_cidr_is_fatal() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let mut broken = block("10.38.192.0", 25);
        broken.cidr = None;

        let err = match_vlans(VC, &segments, &location(), &[subnet(1204, vec![broken])])
            .unwrap_err();
        assert!(matches!(err, CorrelationError::DataIntegrity(_)));
    }

    #[test]
    fn test_missing_network_identifier_is_fatal() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let mut broken = block("10.38.192.0", 25);
        broken.network_identifier = None;

        let err = match_vlans(VC, &segments, &location(), &[subnet(1204, vec![broken])])
            .unwrap_err();
        assert!(matches!(err, CorrelationError::DataIntegrity(_)));
    }

    #[test]
    fn test_broken_unmatched_subnet_is_ignored() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let subnets = vec![subnet(999, vec![SubnetBlock::default()]), subnet(1204, vec![])];

        let err = match_vlans(VC, &segments, &location(), &subnets).unwrap_err();
        // only the matched VLAN's empty block list trips the check
        assert!(err.to_string().contains("1204"));
    }

    #[test]
    fn test_duplicate_vlan_last_write_wins() {
        let segments = vec![
            NetworkSegment::new("old-1204", 1204),
            NetworkSegment::new("new-1204", 1204),
        ];
        let subnets = vec![subnet(1204, vec![block("10.38.192.0", 25)])];

        let outcome = match_vlans(VC, &segments, &location(), &subnets).unwrap();
        assert_eq!(outcome.matches[0].segment.name, "new-1204");
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::DuplicateVlan);
    }

    #[test]
    fn test_repeated_provider_vlan_keeps_first_record() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let mut broken = block("10.0.3.0", 24);
        broken.cidr = None;
        let subnets = vec![
            subnet(1204, vec![block("10.0.1.0", 24)]),
            subnet(1204, vec![block("10.0.2.0", 24)]),
            subnet(1204, vec![broken]),
        ];

        let outcome = match_vlans(VC, &segments, &location(), &subnets).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].machine_network_cidr, "10.0.1.0/24");
        assert_eq!(outcome.diagnostics.len(), 2);
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::DuplicateProviderVlan));
    }

    #[test]
    fn test_untagged_segment_is_skipped() {
        let mut diagnostics = Vec::new();
        let index = index_segments(
            VC,
            &[NetworkSegment::new("trunk", 0), NetworkSegment::new("ci", 10)],
            &mut diagnostics,
        );
        assert_eq!(index.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidSegmentVlan);
    }

    #[test]
    fn test_into_network_prefers_block_location() {
        let segments = vec![NetworkSegment::new("ci-vlan-1204", 1204)];
        let mut b = block("10.38.192.0", 25);
        b.pod_name = Some("dal10.pod03".to_string());
        let outcome =
            match_vlans(VC, &segments, &location(), &[subnet(1204, vec![b])]).unwrap();

        let addressing = crate::correlation::synthesize("fd00:1", VlanId::new(1204).unwrap())
            .unwrap();
        let network = outcome.matches[0].clone().into_network(addressing);
        assert_eq!(network.pod_name.as_deref(), Some("dal10.pod03"));
        assert_eq!(network.datacenter_name.as_deref(), Some("dal10"));
        assert_eq!(network.server, VC);
        assert_eq!(network.vlan_id.value(), 1204);
        assert_eq!(network.ipv6.ipv6_prefix, "fd00:1:1204::1/64");
    }
}
