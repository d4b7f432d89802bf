// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `wirewallctl`, the command-line front end of `wirewalld`.

pub mod client;
pub mod error;

pub use client::WireWallClient;
pub use error::{CliError, Result, DAEMON_ERROR};

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
	name = "wirewallctl",
	version,
	about = "Ask wirewalld to re-apply or reload its configuration"
)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Option<Command>,

	/// Log D-Bus traffic to stderr
	#[arg(short, long, global = true)]
	pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
	/// Re-apply the configuration wirewalld already holds (default)
	Configure,
	/// Re-read /etc/wirewall, then apply it
	Reload,
}

impl Cli {
	pub fn selected(&self) -> Command {
		self.command.unwrap_or(Command::Configure)
	}
}

/// Runs `command` against the daemon on the system bus.
pub async fn run(command: Command) -> Result<()> {
	let client = WireWallClient::connect().await?;
	match command {
		Command::Configure => client.configure().await,
		Command::Reload => client.reload().await,
	}
}
