// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::TunnelError;
use crate::peer_set::PeerSetRequest;
use async_trait::async_trait;
use std::net::IpAddr;
use tracing::{debug, instrument};
use wireguard_control::{Backend, DeviceUpdate, InterfaceName, Key, PeerConfigBuilder};

/// Applies peer sets to a WireGuard device.
#[async_trait]
pub trait TunnelControl: Send + Sync {
	/// Applies `request` to `request.interface`, replacing the device's peers.
	async fn apply_peer_set(&self, request: &PeerSetRequest) -> Result<(), TunnelError>;
}

/// [`TunnelControl`] backed by the kernel WireGuard module over netlink.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelTunnel;

impl KernelTunnel {
	pub fn new() -> Self {
		Self
	}
}

fn build_update(request: &PeerSetRequest) -> DeviceUpdate {
	let mut update = DeviceUpdate::new();
	if request.replace_peers {
		update = update.replace_peers();
	}

	for peer in &request.peers {
		let mut builder = PeerConfigBuilder::new(&Key(*peer.public_key.as_bytes()));
		if peer.replace_allowed_ips {
			builder = builder.replace_allowed_ips();
		}
		for net in &peer.allowed_ips {
			builder = builder.add_allowed_ip(IpAddr::V4(net.addr()), net.prefix_len());
		}
		if let Some(psk) = &peer.preshared_key {
			builder = builder.set_preshared_key(Key(*psk.expose_bytes()));
		}
		update = update.add_peer(builder);
	}

	update
}

#[async_trait]
impl TunnelControl for KernelTunnel {
	#[instrument(skip_all, fields(interface = %request.interface, peers = request.peers.len()))]
	async fn apply_peer_set(&self, request: &PeerSetRequest) -> Result<(), TunnelError> {
		let interface = request
			.interface
			.parse::<InterfaceName>()
			.map_err(|e| TunnelError::InvalidInterface {
				interface: request.interface.clone(),
				reason: e.to_string(),
			})?;
		let update = build_update(request);

		debug!("applying peer set");

		tokio::task::spawn_blocking(move || update.apply(&interface, Backend::Kernel))
			.await?
			.map_err(TunnelError::Apply)?;

		debug!("peer set applied");
		Ok(())
	}
}
