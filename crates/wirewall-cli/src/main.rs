// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wirewall_cli::{Cli, Command};

fn init_logging(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

async fn run(command: Command) -> anyhow::Result<()> {
	let action = match command {
		Command::Configure => "configure",
		Command::Reload => "reload",
	};
	wirewall_cli::run(command)
		.await
		.with_context(|| format!("{action} failed"))
}

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli.selected()).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("wirewallctl: {e:#}");
			ExitCode::FAILURE
		}
	}
}
