// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::DnsError;
use async_trait::async_trait;
use std::fmt;
use std::net::Ipv4Addr;
use tracing::debug;
use wirewall_common::{ClientSet, TunnelConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
	A(Ipv4Addr),
	Ptr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
	pub name: String,
	pub ttl: u32,
	pub data: RecordData,
}

/// One line of an RFC 2136 update script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsInstruction {
	Zone(String),
	Add(DnsRecord),
	Send,
}

impl fmt::Display for DnsInstruction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Zone(zone) => write!(f, "zone {zone}"),
			Self::Add(DnsRecord {
				name,
				ttl,
				data: RecordData::A(address),
			}) => write!(f, "update add {name} {ttl} A {address}"),
			Self::Add(DnsRecord {
				name,
				ttl,
				data: RecordData::Ptr(target),
			}) => write!(f, "update add {name} {ttl} PTR {target}"),
			Self::Send => f.write_str("send"),
		}
	}
}

/// All changes for one zone, applied as a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsBatch {
	pub zone: String,
	pub instructions: Vec<DnsInstruction>,
}

impl DnsBatch {
	pub fn new(zone: impl Into<String>, records: impl IntoIterator<Item = DnsRecord>) -> Self {
		let zone = zone.into();
		let mut instructions = vec![DnsInstruction::Zone(zone.clone())];
		instructions.extend(records.into_iter().map(DnsInstruction::Add));
		instructions.push(DnsInstruction::Send);
		Self { zone, instructions }
	}

	pub fn records(&self) -> impl Iterator<Item = &DnsRecord> {
		self.instructions.iter().filter_map(|i| match i {
			DnsInstruction::Add(record) => Some(record),
			_ => None,
		})
	}

	/// Renders the batch as `nsupdate` input.
	pub fn to_script(&self) -> String {
		let mut script = String::new();
		for instruction in &self.instructions {
			script.push_str(&instruction.to_string());
			script.push('\n');
		}
		script
	}
}

/// Submits DNS batches to a zone's primary server.
#[async_trait]
pub trait DnsUpdater: Send + Sync {
	/// Applies every instruction of `batch` in one transaction.
	async fn submit(&self, batch: &DnsBatch) -> Result<(), DnsError>;
}

fn in_zone(name: &str, zone: &str) -> bool {
	let name = name.trim_end_matches('.').to_ascii_lowercase();
	let zone = zone.trim_end_matches('.').to_ascii_lowercase();
	name == zone || name.ends_with(&format!(".{zone}"))
}

/// Builds the DNS batches for `clients`: none without a zone, otherwise the
/// forward batch followed by the reverse batch if a reverse zone is set.
pub fn plan_dns(config: &TunnelConfig, clients: &ClientSet) -> Vec<DnsBatch> {
	let Some(zone) = config.zone.as_deref() else {
		return Vec::new();
	};

	let forward = DnsBatch::new(
		zone,
		clients.iter().map(|client| DnsRecord {
			name: client.fqdn(zone),
			ttl: config.ttl,
			data: RecordData::A(client.address),
		}),
	);
	let mut batches = vec![forward];

	if let Some(reverse_zone) = config.reverse_zone.as_deref() {
		let records: Vec<_> = clients
			.iter()
			.filter(|client| {
				let inside = in_zone(&client.reverse_name(), reverse_zone);
				if !inside {
					debug!(client = %client.name, %reverse_zone, "address outside reverse zone, no PTR");
				}
				inside
			})
			.map(|client| DnsRecord {
				name: format!("{}.", client.reverse_name()),
				ttl: config.ttl,
				data: RecordData::Ptr(client.fqdn(zone)),
			})
			.collect();
		batches.push(DnsBatch::new(reverse_zone, records));
	}

	batches
}

#[cfg(test)]
mod tests {
	use super::*;
	use wirewall_common::{ClientRecord, WgKey};

	fn client(name: &str, address: &str) -> ClientRecord {
		ClientRecord::new(name, address.parse().unwrap(), WgKey::from_bytes([1u8; 32]))
	}

	#[test]
	fn no_zone_means_no_batches() {
		let clients = ClientSet::new(vec![client("alice", "10.0.0.2")]);
		assert!(plan_dns(&TunnelConfig::new("wg0"), &clients).is_empty());
	}

	#[test]
	fn forward_batch_is_zone_adds_send() {
		let config = TunnelConfig::new("wg0").with_zone("vpn.example.");
		let clients = ClientSet::new(vec![client("alice", "10.0.0.2")]);

		let batches = plan_dns(&config, &clients);
		assert_eq!(batches.len(), 1);
		assert_eq!(
			batches[0].instructions,
			vec![
				DnsInstruction::Zone("vpn.example.".to_string()),
				DnsInstruction::Add(DnsRecord {
					name: "alice.vpn.example.".to_string(),
					ttl: 3600,
					data: RecordData::A(Ipv4Addr::new(10, 0, 0, 2)),
				}),
				DnsInstruction::Send,
			]
		);
		assert_eq!(
			batches[0].to_script(),
			"zone vpn.example.\nupdate add alice.vpn.example. 3600 A 10.0.0.2\nsend\n"
		);
	}

	#[test]
	fn empty_client_set_still_sends_zone() {
		let config = TunnelConfig::new("wg0").with_zone("vpn.example.");
		let batches = plan_dns(&config, &ClientSet::default());
		assert_eq!(batches[0].to_script(), "zone vpn.example.\nsend\n");
		assert_eq!(batches[0].records().count(), 0);
	}

	#[test]
	fn reverse_batch_only_holds_in_zone_addresses() {
		let config = TunnelConfig::new("wg0")
			.with_zone("vpn.example.")
			.with_reverse_zone("0.0.10.in-addr.arpa.");
		let clients = ClientSet::new(vec![
			client("alice", "10.0.0.2"),
			client("mallory", "192.168.1.9"),
		]);

		let batches = plan_dns(&config, &clients);
		assert_eq!(batches.len(), 2);
		assert_eq!(batches[0].records().count(), 2);

		let reverse = &batches[1];
		assert_eq!(reverse.zone, "0.0.10.in-addr.arpa.");
		assert_eq!(
			reverse.to_script(),
			"zone 0.0.10.in-addr.arpa.\nupdate add 2.0.0.10.in-addr.arpa. 3600 PTR alice.vpn.example.\nsend\n"
		);
	}

	#[test]
	fn in_zone_ignores_trailing_dot_and_case() {
		assert!(in_zone("2.0.0.10.in-addr.arpa", "0.0.10.IN-ADDR.ARPA."));
		assert!(!in_zone("2.0.0.110.in-addr.arpa", "10.in-addr.arpa"));
	}
}
