// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use wirewall_daemon::{logging, service, Args, StartupError, WireWallDaemon};
use wirewall_engine::{KernelTunnel, NsupdateClient, Reconciler};

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			warn!(error = %e, "cannot listen for ctrl-c");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};
		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
			}
			Err(e) => {
				warn!(error = %e, "cannot listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {}
		_ = terminate => {}
	}
}

async fn run(args: Args) -> Result<(), StartupError> {
	let reconciler = Reconciler::new(
		Arc::new(KernelTunnel::new()),
		Arc::new(NsupdateClient::new(&args.nsupdate)),
	);

	let daemon = Arc::new(WireWallDaemon::start(args.paths(), reconciler).await?);
	let _connection = service::serve(daemon).await?;

	info!("wirewalld ready");
	shutdown_signal().await;
	info!("shutting down");

	Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Args::parse();
	logging::init(args.log_json);

	match run(args).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!(error = %e, "wirewalld failed to start");
			ExitCode::FAILURE
		}
	}
}
