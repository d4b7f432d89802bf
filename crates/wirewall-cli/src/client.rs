// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::Result;
use tracing::{debug, instrument};
use zbus::{proxy, Connection};

#[proxy(
	interface = "no.mstarvik.wirewall",
	default_service = "no.mstarvik.wirewall",
	default_path = "/no/mstarvik/wirewall"
)]
trait WireWall {
	fn configure(&self) -> zbus::Result<()>;

	fn reload(&self) -> zbus::Result<()>;
}

/// Client for a running `wirewalld`.
pub struct WireWallClient {
	proxy: WireWallProxy<'static>,
}

impl WireWallClient {
	/// Connects to the system bus.
	pub async fn connect() -> Result<Self> {
		let connection = Connection::system().await?;
		let proxy = WireWallProxy::new(&connection).await?;
		Ok(Self { proxy })
	}

	#[instrument(skip(self))]
	pub async fn configure(&self) -> Result<()> {
		self.proxy.configure().await?;
		debug!("configure acknowledged");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn reload(&self) -> Result<()> {
		self.proxy.reload().await?;
		debug!("reload acknowledged");
		Ok(())
	}
}

impl std::fmt::Debug for WireWallClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WireWallClient").finish_non_exhaustive()
	}
}
