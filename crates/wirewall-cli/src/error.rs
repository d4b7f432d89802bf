// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Error name the daemon uses for failed operations.
pub const DAEMON_ERROR: &str = "no.mstarvik.wirewall.Error";

const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";
const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";

#[derive(Error, Debug)]
pub enum CliError {
	#[error("wirewalld is not running")]
	NotRunning,

	#[error("permission denied: {0}")]
	AccessDenied(String),

	/// The daemon ran the operation and reported a failure.
	#[error("{0}")]
	Daemon(String),

	#[error("{name}: {description}")]
	Remote { name: String, description: String },

	#[error("D-Bus error: {0}")]
	Bus(zbus::Error),
}

impl CliError {
	/// Classifies an error reply by its D-Bus error name.
	pub fn from_reply(name: &str, description: Option<&str>) -> Self {
		let description = description.unwrap_or_default().to_string();
		match name {
			DAEMON_ERROR => Self::Daemon(description),
			SERVICE_UNKNOWN => Self::NotRunning,
			ACCESS_DENIED => Self::AccessDenied(description),
			_ => Self::Remote {
				name: name.to_string(),
				description,
			},
		}
	}
}

impl From<zbus::Error> for CliError {
	fn from(err: zbus::Error) -> Self {
		match err {
			zbus::Error::MethodError(name, description, _) => {
				Self::from_reply(name.as_str(), description.as_deref())
			}
			other => Self::Bus(other),
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn daemon_error_keeps_description_only() {
		let err = CliError::from_reply(
			DAEMON_ERROR,
			Some("read /etc/wirewall/clients/alice.conf: missing ip"),
		);
		assert!(matches!(err, CliError::Daemon(_)));
		assert_eq!(
			err.to_string(),
			"read /etc/wirewall/clients/alice.conf: missing ip"
		);
	}

	#[test]
	fn missing_service_means_not_running() {
		let err = CliError::from_reply(SERVICE_UNKNOWN, Some("The name is not activatable"));
		assert!(matches!(err, CliError::NotRunning));
	}

	#[test]
	fn access_denied_is_reported() {
		let err = CliError::from_reply(ACCESS_DENIED, Some("rejected send message"));
		assert_eq!(err.to_string(), "permission denied: rejected send message");
	}

	#[test]
	fn other_errors_keep_their_name() {
		let err = CliError::from_reply("org.freedesktop.DBus.Error.NoReply", None);
		assert_eq!(err.to_string(), "org.freedesktop.DBus.Error.NoReply: ");
	}
}
