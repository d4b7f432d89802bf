// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::daemon::WireWallDaemon;
use crate::error::{DaemonError, StartupError};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument};
use zbus::fdo::{RequestNameFlags, RequestNameReply};
use zbus::{interface, Connection, DBusError};

pub const BUS_NAME: &str = "no.mstarvik.wirewall";
pub const OBJECT_PATH: &str = "/no/mstarvik/wirewall";

/// Error returned to D-Bus callers as `no.mstarvik.wirewall.Error`.
#[derive(Debug, DBusError)]
#[zbus(prefix = "no.mstarvik.wirewall")]
pub enum WireWallError {
	#[zbus(error)]
	ZBus(zbus::Error),
	Error(String),
}

impl From<DaemonError> for WireWallError {
	fn from(err: DaemonError) -> Self {
		Self::Error(err.to_string())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Configure,
	Reload,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Configure => f.write_str("Configure"),
			Self::Reload => f.write_str("Reload"),
		}
	}
}

/// D-Bus object exported at [`OBJECT_PATH`].
pub struct WireWallService {
	daemon: Arc<WireWallDaemon>,
}

impl WireWallService {
	pub fn new(daemon: Arc<WireWallDaemon>) -> Self {
		Self { daemon }
	}

	/// Runs `op` and reduces any failure to its description.
	#[instrument(skip(self))]
	pub async fn dispatch(&self, op: Operation) -> Result<(), WireWallError> {
		let result = match op {
			Operation::Configure => self.daemon.configure().await,
			Operation::Reload => self.daemon.reload().await,
		};

		match result {
			Ok(report) => {
				info!(%op, peers = report.peers, records = report.records, "remote call succeeded");
				Ok(())
			}
			Err(e) => {
				error!(%op, error = %e, "remote call failed");
				Err(e.into())
			}
		}
	}
}

#[interface(name = "no.mstarvik.wirewall")]
impl WireWallService {
	async fn configure(&self) -> Result<(), WireWallError> {
		self.dispatch(Operation::Configure).await
	}

	async fn reload(&self) -> Result<(), WireWallError> {
		self.dispatch(Operation::Reload).await
	}
}

/// Exports the service on the system bus and claims [`BUS_NAME`].
///
/// Fails with [`StartupError::AlreadyRunning`] if another process owns the
/// name. The returned connection must be kept alive to keep serving.
#[instrument(skip_all)]
pub async fn serve(daemon: Arc<WireWallDaemon>) -> Result<Connection, StartupError> {
	let connection = zbus::connection::Builder::system()?
		.serve_at(OBJECT_PATH, WireWallService::new(daemon))?
		.build()
		.await?;

	match connection
		.request_name_with_flags(BUS_NAME, RequestNameFlags::DoNotQueue.into())
		.await
	{
		Ok(RequestNameReply::PrimaryOwner) | Ok(RequestNameReply::AlreadyOwner) => {}
		Ok(reply) => {
			error!(?reply, name = BUS_NAME, "bus name is taken");
			return Err(StartupError::AlreadyRunning { name: BUS_NAME });
		}
		Err(zbus::Error::NameTaken) => {
			return Err(StartupError::AlreadyRunning { name: BUS_NAME });
		}
		Err(e) => return Err(e.into()),
	}

	info!(name = BUS_NAME, path = OBJECT_PATH, "registered on system bus");
	Ok(connection)
}
