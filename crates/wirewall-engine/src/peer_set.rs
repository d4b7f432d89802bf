// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ipnet::Ipv4Net;
use wirewall_common::{ClientRecord, ClientSet, PresharedKey, TunnelConfig, WgKey};

/// Desired state of one peer on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerDescriptor {
	pub public_key: WgKey,
	pub preshared_key: Option<PresharedKey>,
	pub allowed_ips: Vec<Ipv4Net>,
	/// Replace the peer's allowed IPs instead of adding to them.
	pub replace_allowed_ips: bool,
}

impl From<&ClientRecord> for PeerDescriptor {
	fn from(client: &ClientRecord) -> Self {
		Self {
			public_key: client.public_key,
			preshared_key: client.preshared_key.clone(),
			allowed_ips: vec![client.allowed_ip()],
			replace_allowed_ips: true,
		}
	}
}

/// Complete peer set for one WireGuard device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSetRequest {
	pub interface: String,
	/// Remove every peer not listed in `peers`.
	pub replace_peers: bool,
	pub peers: Vec<PeerDescriptor>,
}

pub fn plan_peer_set(config: &TunnelConfig, clients: &ClientSet) -> PeerSetRequest {
	PeerSetRequest {
		interface: config.interface.clone(),
		replace_peers: true,
		peers: clients.iter().map(PeerDescriptor::from).collect(),
	}
}
