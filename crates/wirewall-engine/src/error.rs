// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunnelError {
	#[error("invalid interface name {interface:?}: {reason}")]
	InvalidInterface { interface: String, reason: String },

	#[error("configure device: {0}")]
	Apply(#[source] std::io::Error),

	#[error("control plane task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum DnsError {
	#[error("{} not found in PATH", program.display())]
	NotInstalled { program: PathBuf },

	#[error("nsupdate I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("update rejected ({status}): {stderr}")]
	Rejected { status: String, stderr: String },
}

/// A failed reconciliation step. Earlier steps stay applied.
#[derive(Debug, Error)]
pub enum ReconcileError {
	#[error("apply peers to {interface}: {source}")]
	TunnelApply {
		interface: String,
		#[source]
		source: TunnelError,
	},

	#[error("update zone {zone}: {source}")]
	DnsApply {
		zone: String,
		#[source]
		source: DnsError,
	},
}
