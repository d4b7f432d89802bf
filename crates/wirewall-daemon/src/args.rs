// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use clap::Parser;
use std::path::PathBuf;
use wirewall_config::{ConfigPaths, DEFAULT_CLIENTS_DIR, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
	name = "wirewalld",
	version,
	about = "Keeps a WireGuard device and its DNS zone in sync with /etc/wirewall"
)]
pub struct Args {
	/// Tunnel config file
	#[arg(long, env = "WIREWALL_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
	pub config: PathBuf,

	/// Directory of <name>.conf client definitions
	#[arg(long, env = "WIREWALL_CLIENTS_DIR", default_value = DEFAULT_CLIENTS_DIR)]
	pub clients_dir: PathBuf,

	/// nsupdate binary used for DNS updates
	#[arg(long, env = "WIREWALL_NSUPDATE", default_value = "nsupdate")]
	pub nsupdate: PathBuf,

	/// Emit logs as JSON
	#[arg(long, env = "WIREWALL_LOG_JSON")]
	pub log_json: bool,
}

impl Args {
	pub fn paths(&self) -> ConfigPaths {
		ConfigPaths::new(&self.config, &self.clients_dir)
	}
}
