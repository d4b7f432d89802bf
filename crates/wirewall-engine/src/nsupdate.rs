// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::dns::{DnsBatch, DnsUpdater};
use crate::error::DnsError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, trace, warn};

/// [`DnsUpdater`] that pipes each batch into `nsupdate`.
///
/// By default runs `nsupdate -l`, which authenticates with the local
/// server's session key.
#[derive(Debug, Clone)]
pub struct NsupdateClient {
	program: PathBuf,
	args: Vec<String>,
}

impl NsupdateClient {
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			args: vec!["-l".to_string()],
		}
	}

	pub fn with_args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args = args.into_iter().map(Into::into).collect();
		self
	}
}

impl Default for NsupdateClient {
	fn default() -> Self {
		Self::new("nsupdate")
	}
}

#[async_trait]
impl DnsUpdater for NsupdateClient {
	#[instrument(skip_all, fields(zone = %batch.zone, program = %self.program.display()))]
	async fn submit(&self, batch: &DnsBatch) -> Result<(), DnsError> {
		let script = batch.to_script();
		trace!(%script, "nsupdate script");

		let mut child = Command::new(&self.program)
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| {
				if e.kind() == std::io::ErrorKind::NotFound {
					warn!("nsupdate not found");
					DnsError::NotInstalled {
						program: self.program.clone(),
					}
				} else {
					DnsError::Io(e)
				}
			})?;

		if let Some(mut stdin) = child.stdin.take() {
			match stdin.write_all(script.as_bytes()).await {
				Ok(()) => {}
				// The exit status below explains why it stopped reading.
				Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
					debug!("nsupdate closed stdin early");
				}
				Err(e) => return Err(DnsError::Io(e)),
			}
		}

		let output = child.wait_with_output().await?;
		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
			return Err(DnsError::Rejected {
				status: output.status.to_string(),
				stderr,
			});
		}

		debug!(records = batch.records().count(), "zone updated");
		Ok(())
	}
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;
	use crate::dns::{DnsRecord, RecordData};
	use tempfile::TempDir;

	fn batch() -> DnsBatch {
		DnsBatch::new(
			"vpn.example.",
			[DnsRecord {
				name: "alice.vpn.example.".to_string(),
				ttl: 3600,
				data: RecordData::A("10.0.0.2".parse().unwrap()),
			}],
		)
	}

	#[tokio::test]
	async fn pipes_script_to_program() {
		let dir = TempDir::new().unwrap();
		let out = dir.path().join("script.txt");
		let client = NsupdateClient::new("sh").with_args(["-c".to_string(), format!("cat > '{}'", out.display())]);

		client.submit(&batch()).await.unwrap();

		let written = std::fs::read_to_string(&out).unwrap();
		assert_eq!(written, batch().to_script());
	}

	#[tokio::test]
	async fn non_zero_exit_is_rejected() {
		let client = NsupdateClient::new("sh").with_args([
			"-c",
			"cat > /dev/null; echo 'update failed: REFUSED' >&2; exit 2",
		]);

		let err = client.submit(&batch()).await.unwrap_err();
		match err {
			DnsError::Rejected { stderr, .. } => assert_eq!(stderr, "update failed: REFUSED"),
			other => panic!("expected Rejected, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn missing_program_is_not_installed() {
		let client = NsupdateClient::new("/nonexistent/wirewall-nsupdate");
		let err = client.submit(&batch()).await.unwrap_err();
		assert!(matches!(err, DnsError::NotInstalled { .. }));
	}

	#[test]
	fn default_runs_local_mode() {
		let client = NsupdateClient::default();
		assert_eq!(client.program, PathBuf::from("nsupdate"));
		assert_eq!(client.args, vec!["-l".to_string()]);
	}
}
