// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::keys::{PresharedKey, WgKey};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// Reverse-lookup owner name for an address, e.g. `2.0.0.10.in-addr.arpa`.
pub fn reverse_name(address: Ipv4Addr) -> String {
	let [a, b, c, d] = address.octets();
	format!("{d}.{c}.{b}.{a}.in-addr.arpa")
}

/// One VPN client, loaded from `<name>.conf` in the clients directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
	pub name: String,
	pub address: Ipv4Addr,
	pub public_key: WgKey,
	pub preshared_key: Option<PresharedKey>,
}

impl ClientRecord {
	pub fn new(name: impl Into<String>, address: Ipv4Addr, public_key: WgKey) -> Self {
		Self {
			name: name.into(),
			address,
			public_key,
			preshared_key: None,
		}
	}

	pub fn with_preshared_key(mut self, key: PresharedKey) -> Self {
		self.preshared_key = Some(key);
		self
	}

	/// Host name of this client inside `zone`.
	pub fn fqdn(&self, zone: &str) -> String {
		format!("{}.{}", self.name, zone)
	}

	pub fn reverse_name(&self) -> String {
		reverse_name(self.address)
	}

	/// The single-host network this client may use on the tunnel.
	pub fn allowed_ip(&self) -> Ipv4Net {
		Ipv4Net::from(self.address)
	}
}

/// The complete set of clients, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSet(Vec<ClientRecord>);

impl ClientSet {
	pub fn new(mut clients: Vec<ClientRecord>) -> Self {
		clients.sort_by(|a, b| a.name.cmp(&b.name));
		Self(clients)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ClientRecord> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<'a> IntoIterator for &'a ClientSet {
	type Item = &'a ClientRecord;
	type IntoIter = std::slice::Iter<'a, ClientRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn client(name: &str, address: &str) -> ClientRecord {
		ClientRecord::new(
			name,
			address.parse().unwrap(),
			WgKey::from_bytes([7u8; 32]),
		)
	}

	#[test]
	fn fqdn_appends_zone() {
		let alice = client("alice", "10.0.0.2");
		assert_eq!(alice.fqdn("vpn.example."), "alice.vpn.example.");
	}

	#[test]
	fn reverse_name_reverses_octets() {
		let alice = client("alice", "10.0.0.2");
		assert_eq!(alice.reverse_name(), "2.0.0.10.in-addr.arpa");
	}

	#[test]
	fn allowed_ip_is_host_route() {
		let alice = client("alice", "10.0.0.2");
		assert_eq!(alice.allowed_ip().to_string(), "10.0.0.2/32");
	}

	#[test]
	fn client_set_is_sorted_by_name() {
		let set = ClientSet::new(vec![
			client("carol", "10.0.0.4"),
			client("alice", "10.0.0.2"),
			client("bob", "10.0.0.3"),
		]);
		let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, ["alice", "bob", "carol"]);
		let addresses: Vec<_> = set.iter().map(|c| c.address).collect();
		assert_eq!(addresses[1], Ipv4Addr::new(10, 0, 0, 3));
	}

	proptest! {
		#[test]
		fn prop_reverse_name_mirrors_octets(octets in prop::array::uniform4(any::<u8>())) {
			let name = reverse_name(Ipv4Addr::from(octets));
			let labels: Vec<&str> = name.split('.').collect();
			prop_assert_eq!(labels.len(), 6);
			prop_assert_eq!(&labels[4..], &["in-addr", "arpa"]);
			for (i, label) in labels[..4].iter().enumerate() {
				prop_assert_eq!(label.parse::<u8>().unwrap(), octets[3 - i]);
			}
		}
	}
}
