// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failure of a `Configure` or `Reload` run.
#[derive(Debug, Error)]
pub enum DaemonError {
	#[error(transparent)]
	Load(#[from] wirewall_config::ConfigError),

	#[error(transparent)]
	Reconcile(#[from] wirewall_engine::ReconcileError),
}

/// Anything that keeps `wirewalld` from reaching its serving state.
#[derive(Debug, Error)]
pub enum StartupError {
	#[error("initial reconciliation failed: {0}")]
	Daemon(#[from] DaemonError),

	#[error("D-Bus error: {0}")]
	Bus(#[from] zbus::Error),

	#[error("an instance of wirewalld is already running ({name} is owned)")]
	AlreadyRunning { name: &'static str },
}
