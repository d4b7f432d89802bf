// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::DaemonError;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use wirewall_common::{ClientSet, TunnelConfig};
use wirewall_config::{ConfigPaths, LoadedConfig};
use wirewall_engine::{ReconcileReport, Reconciler};

/// The configuration the daemon currently enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonState {
	pub config: TunnelConfig,
	pub clients: ClientSet,
}

impl From<LoadedConfig> for DaemonState {
	fn from(loaded: LoadedConfig) -> Self {
		Self {
			config: loaded.config,
			clients: loaded.clients,
		}
	}
}

/// Owns the daemon state and serializes every operation on it.
///
/// A value only exists once the startup load and reconciliation succeeded,
/// so `configure` always has a state to push.
pub struct WireWallDaemon {
	paths: ConfigPaths,
	reconciler: Reconciler,
	state: Mutex<DaemonState>,
}

impl WireWallDaemon {
	/// Loads the configuration and reconciles it once.
	#[instrument(skip_all, fields(config = %paths.config_file.display()))]
	pub async fn start(paths: ConfigPaths, reconciler: Reconciler) -> Result<Self, DaemonError> {
		let state = DaemonState::from(wirewall_config::load(&paths).await?);
		let report = reconciler.reconcile(&state.config, &state.clients).await?;
		info!(
			peers = report.peers,
			zones = report.zones,
			"initial reconciliation complete"
		);

		Ok(Self {
			paths,
			reconciler,
			state: Mutex::new(state),
		})
	}

	/// Re-applies the state held in memory without touching the filesystem.
	#[instrument(skip(self))]
	pub async fn configure(&self) -> Result<ReconcileReport, DaemonError> {
		let state = self.state.lock().await;
		let report = self
			.reconciler
			.reconcile(&state.config, &state.clients)
			.await?;
		info!(peers = report.peers, zones = report.zones, "configure complete");
		Ok(report)
	}

	/// Reloads the configuration from disk and applies it.
	///
	/// The held state is replaced only when both the config file and the
	/// clients directory load cleanly; otherwise it is kept and nothing is
	/// applied.
	#[instrument(skip(self))]
	pub async fn reload(&self) -> Result<ReconcileReport, DaemonError> {
		let mut state = self.state.lock().await;

		let loaded = match wirewall_config::load(&self.paths).await {
			Ok(loaded) => loaded,
			Err(e) => {
				warn!(error = %e, "reload failed, keeping current configuration");
				return Err(e.into());
			}
		};
		*state = DaemonState::from(loaded);

		let report = self
			.reconciler
			.reconcile(&state.config, &state.clients)
			.await?;
		info!(peers = report.peers, zones = report.zones, "reload complete");
		Ok(report)
	}

	/// Copy of the current state. Waits for any running operation.
	pub async fn snapshot(&self) -> DaemonState {
		self.state.lock().await.clone()
	}
}

impl std::fmt::Debug for WireWallDaemon {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WireWallDaemon")
			.field("paths", &self.paths)
			.finish_non_exhaustive()
	}
}
