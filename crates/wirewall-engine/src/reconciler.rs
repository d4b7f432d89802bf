// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::dns::{plan_dns, DnsUpdater};
use crate::error::ReconcileError;
use crate::peer_set::plan_peer_set;
use crate::tunnel::TunnelControl;
use std::sync::Arc;
use tracing::{info, instrument};
use wirewall_common::{ClientSet, TunnelConfig};

/// What a successful reconciliation pushed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
	pub peers: usize,
	pub zones: usize,
	pub records: usize,
}

/// Pushes the desired tunnel and DNS state to the external capabilities.
#[derive(Clone)]
pub struct Reconciler {
	tunnel: Arc<dyn TunnelControl>,
	dns: Arc<dyn DnsUpdater>,
}

impl Reconciler {
	pub fn new(tunnel: Arc<dyn TunnelControl>, dns: Arc<dyn DnsUpdater>) -> Self {
		Self { tunnel, dns }
	}

	/// Applies the peer set, then the DNS batches.
	///
	/// Stops at the first failure without undoing earlier steps. DNS is never
	/// touched if the tunnel step fails or no zone is configured.
	#[instrument(skip_all, fields(interface = %config.interface, clients = clients.len()))]
	pub async fn reconcile(
		&self,
		config: &TunnelConfig,
		clients: &ClientSet,
	) -> Result<ReconcileReport, ReconcileError> {
		let request = plan_peer_set(config, clients);
		self
			.tunnel
			.apply_peer_set(&request)
			.await
			.map_err(|source| ReconcileError::TunnelApply {
				interface: config.interface.clone(),
				source,
			})?;
		info!(peers = request.peers.len(), "peer set applied");

		let mut report = ReconcileReport {
			peers: request.peers.len(),
			..ReconcileReport::default()
		};

		for batch in plan_dns(config, clients) {
			self
				.dns
				.submit(&batch)
				.await
				.map_err(|source| ReconcileError::DnsApply {
					zone: batch.zone.clone(),
					source,
				})?;
			let records = batch.records().count();
			info!(zone = %batch.zone, records, "zone updated");
			report.zones += 1;
			report.records += records;
		}

		Ok(report)
	}
}

impl std::fmt::Debug for Reconciler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Reconciler").finish_non_exhaustive()
	}
}
