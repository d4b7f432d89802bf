// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// TTL used for published records when the config does not set one.
pub const DEFAULT_TTL: u32 = 3600;

/// Tunnel-level settings from `wirewall.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelConfig {
	/// WireGuard device to configure, e.g. `wg0`.
	pub interface: String,
	/// Forward zone for client `A` records. DNS sync is off when absent.
	pub zone: Option<String>,
	/// Reverse zone for client `PTR` records. Requires `zone`.
	pub reverse_zone: Option<String>,
	pub ttl: u32,
}

impl TunnelConfig {
	pub fn new(interface: impl Into<String>) -> Self {
		Self {
			interface: interface.into(),
			zone: None,
			reverse_zone: None,
			ttl: DEFAULT_TTL,
		}
	}

	pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
		self.zone = Some(zone.into());
		self
	}

	pub fn with_reverse_zone(mut self, zone: impl Into<String>) -> Self {
		self.reverse_zone = Some(zone.into());
		self
	}

	pub fn dns_enabled(&self) -> bool {
		self.zone.is_some()
	}
}
