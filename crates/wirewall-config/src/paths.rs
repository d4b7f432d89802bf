// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::clients::load_clients;
use crate::error::Result;
use crate::tunnel::load_tunnel_config;
use std::path::PathBuf;
use tracing::{info, instrument};
use wirewall_common::{ClientSet, TunnelConfig};

pub const DEFAULT_CONFIG_FILE: &str = "/etc/wirewall/wirewall.conf";
pub const DEFAULT_CLIENTS_DIR: &str = "/etc/wirewall/clients";

/// Where the daemon reads its configuration from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
	/// Tunnel config file: /etc/wirewall/wirewall.conf
	pub config_file: PathBuf,
	/// Client definitions: /etc/wirewall/clients/
	pub clients_dir: PathBuf,
}

impl ConfigPaths {
	pub fn new(config_file: impl Into<PathBuf>, clients_dir: impl Into<PathBuf>) -> Self {
		Self {
			config_file: config_file.into(),
			clients_dir: clients_dir.into(),
		}
	}
}

impl Default for ConfigPaths {
	fn default() -> Self {
		Self::new(DEFAULT_CONFIG_FILE, DEFAULT_CLIENTS_DIR)
	}
}

/// A fully validated config and client set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
	pub config: TunnelConfig,
	pub clients: ClientSet,
}

/// Loads the tunnel config and then the clients directory.
///
/// Fails as a whole if either part fails.
#[instrument(skip_all, fields(config = %paths.config_file.display(), clients = %paths.clients_dir.display()))]
pub async fn load(paths: &ConfigPaths) -> Result<LoadedConfig> {
	let config = load_tunnel_config(&paths.config_file).await?;
	let clients = load_clients(&paths.clients_dir).await?;

	info!(
		interface = %config.interface,
		dns = config.dns_enabled(),
		clients = clients.len(),
		"configuration loaded"
	);

	Ok(LoadedConfig { config, clients })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ConfigError;
	use tempfile::TempDir;

	fn layout(config: &str) -> (TempDir, ConfigPaths) {
		let dir = TempDir::new().unwrap();
		let paths = ConfigPaths::new(dir.path().join("wirewall.conf"), dir.path().join("clients"));
		std::fs::write(&paths.config_file, config).unwrap();
		std::fs::create_dir(&paths.clients_dir).unwrap();
		(dir, paths)
	}

	#[test]
	fn default_paths() {
		let paths = ConfigPaths::default();
		assert_eq!(paths.config_file, PathBuf::from("/etc/wirewall/wirewall.conf"));
		assert_eq!(paths.clients_dir, PathBuf::from("/etc/wirewall/clients"));
	}

	#[tokio::test]
	async fn loads_both_parts() {
		let (_dir, paths) = layout("interface = wg0\n");
		std::fs::write(
			paths.clients_dir.join("alice.conf"),
			"ip = 10.0.0.2\npublic_key = xTIBA5rboUvnH4htodjb6e697QjLERt1NAB4mZqp8Dg=\n",
		)
		.unwrap();

		let loaded = load(&paths).await.unwrap();
		assert_eq!(loaded.config.interface, "wg0");
		assert_eq!(loaded.clients.len(), 1);
	}

	#[tokio::test]
	async fn bad_client_fails_whole_load() {
		let (_dir, paths) = layout("interface = wg0\n");
		std::fs::write(paths.clients_dir.join("alice.conf"), "ip = 10.0.0.2\n").unwrap();

		let err = load(&paths).await.unwrap_err();
		assert!(matches!(err, ConfigError::MissingField { .. }));
	}
}
