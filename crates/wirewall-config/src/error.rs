// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Errors raised while loading the tunnel config or the clients directory.
///
/// Every variant names the file (or directory) at fault.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("parse {path}: {message}")]
	Parse { path: PathBuf, message: String },

	#[error("read {path}: missing {field}")]
	MissingField { path: PathBuf, field: &'static str },

	#[error("read {path}: unknown key {key:?}")]
	UnknownField { path: PathBuf, key: String },

	#[error("read {path}: {key:?} is set more than once")]
	DuplicateField { path: PathBuf, key: String },

	#[error("read {path}: unknown section [{section}]")]
	UnknownSection { path: PathBuf, section: String },

	#[error("read {path}: invalid {field}: {reason}")]
	InvalidField {
		path: PathBuf,
		field: &'static str,
		reason: String,
	},

	#[error("duplicate client name {name:?}: {first} and {second}")]
	DuplicateName {
		name: String,
		first: PathBuf,
		second: PathBuf,
	},

	#[error("duplicate client address {address}: {first} and {second}")]
	DuplicateAddress {
		address: Ipv4Addr,
		first: PathBuf,
		second: PathBuf,
	},

	#[error("duplicate client public key: {first} and {second}")]
	DuplicatePublicKey { first: PathBuf, second: PathBuf },
}

impl ConfigError {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}

pub type Result<T> = std::result::Result<T, ConfigError>;
