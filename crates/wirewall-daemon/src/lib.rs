// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The wirewall daemon.
//!
//! `wirewalld` loads `/etc/wirewall`, reconciles the WireGuard device and DNS
//! zone once at startup, then serves two D-Bus methods on the system bus
//! under `no.mstarvik.wirewall`:
//!
//! - `Configure`: re-push the configuration already held in memory
//! - `Reload`: re-read `/etc/wirewall`, then push it
//!
//! Both run one at a time against the single [`WireWallDaemon`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wirewall_daemon::{service, WireWallDaemon};
//! use wirewall_config::ConfigPaths;
//! use wirewall_engine::{KernelTunnel, NsupdateClient, Reconciler};
//!
//! let reconciler = Reconciler::new(Arc::new(KernelTunnel::new()), Arc::new(NsupdateClient::default()));
//! let daemon = Arc::new(WireWallDaemon::start(ConfigPaths::default(), reconciler).await?);
//! let _connection = service::serve(daemon).await?;
//! ```

pub mod args;
pub mod daemon;
pub mod error;
pub mod logging;
pub mod service;

pub use args::Args;
pub use daemon::{DaemonState, WireWallDaemon};
pub use error::{DaemonError, StartupError};
pub use service::{Operation, WireWallError, WireWallService, BUS_NAME, OBJECT_PATH};
