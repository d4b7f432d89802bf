// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::{ConfigError, Result};
use crate::fields::{read_ini, Fields};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument, trace};
use wirewall_common::{ClientRecord, ClientSet, PresharedKey, WgKey};

/// Extension of client definition files; anything else is ignored.
pub const CLIENT_EXTENSION: &str = "conf";

const CLIENT_KEYS: &[&str] = &["ip", "public_key", "preshared_key"];

fn client_name(path: &Path) -> Result<String> {
	let invalid = |reason: &str| ConfigError::InvalidField {
		path: path.to_path_buf(),
		field: "name",
		reason: reason.to_string(),
	};
	let stem = path
		.file_stem()
		.and_then(OsStr::to_str)
		.ok_or_else(|| invalid("file name is not valid UTF-8"))?;
	if stem.is_empty() {
		return Err(invalid("empty client name"));
	}
	if stem.chars().any(char::is_whitespace) {
		return Err(invalid("client name contains whitespace"));
	}
	Ok(stem.to_string())
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn load_client(path: &Path) -> Result<ClientRecord> {
	let ini = read_ini(path).await?;
	let fields = Fields::new(path, &ini, CLIENT_KEYS)?;
	let name = client_name(path)?;

	let address: Ipv4Addr = fields
		.required("ip")?
		.parse()
		.map_err(|e| fields.invalid("ip", e))?;

	let public_key = WgKey::from_base64(fields.required("public_key")?)
		.map_err(|e| fields.invalid("public_key", e))?;

	let preshared_key = fields
		.optional("preshared_key")
		.map(|k| PresharedKey::from_base64(k).map_err(|e| fields.invalid("preshared_key", e)))
		.transpose()?;

	trace!(%name, %address, has_psk = preshared_key.is_some(), "loaded client");

	Ok(ClientRecord {
		name,
		address,
		public_key,
		preshared_key,
	})
}

/// Rejects clients that would collide on the tunnel or in DNS.
///
/// Names are compared case-insensitively since they become DNS labels.
fn check_unique(clients: &[(PathBuf, ClientRecord)]) -> Result<()> {
	let mut names: HashMap<String, &Path> = HashMap::new();
	let mut addresses: HashMap<Ipv4Addr, &Path> = HashMap::new();
	let mut keys: HashMap<WgKey, &Path> = HashMap::new();

	for (path, client) in clients {
		if let Some(first) = names.insert(client.name.to_ascii_lowercase(), path) {
			return Err(ConfigError::DuplicateName {
				name: client.name.clone(),
				first: first.to_path_buf(),
				second: path.clone(),
			});
		}
		if let Some(first) = addresses.insert(client.address, path) {
			return Err(ConfigError::DuplicateAddress {
				address: client.address,
				first: first.to_path_buf(),
				second: path.clone(),
			});
		}
		if let Some(first) = keys.insert(client.public_key, path) {
			return Err(ConfigError::DuplicatePublicKey {
				first: first.to_path_buf(),
				second: path.clone(),
			});
		}
	}
	Ok(())
}

/// Loads every `*.conf` file in `dir` as a client.
///
/// Subdirectories and files with other extensions are skipped. Any invalid
/// file fails the whole load. The result is sorted by client name.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub async fn load_clients(dir: impl AsRef<Path>) -> Result<ClientSet> {
	let dir = dir.as_ref();
	let mut entries = fs::read_dir(dir).await.map_err(ConfigError::io(dir))?;

	let mut paths = Vec::new();
	while let Some(entry) = entries.next_entry().await.map_err(ConfigError::io(dir))? {
		let path = entry.path();
		let file_type = entry.file_type().await.map_err(ConfigError::io(&path))?;
		if file_type.is_dir() {
			trace!(path = %path.display(), "skipping directory");
			continue;
		}
		if path.extension() != Some(OsStr::new(CLIENT_EXTENSION)) {
			trace!(path = %path.display(), "skipping non-client file");
			continue;
		}
		paths.push(path);
	}
	paths.sort();

	let mut loaded = Vec::with_capacity(paths.len());
	for path in paths {
		let client = load_client(&path).await?;
		loaded.push((path, client));
	}
	check_unique(&loaded)?;

	let clients = ClientSet::new(loaded.into_iter().map(|(_, c)| c).collect());
	debug!(count = clients.len(), "loaded clients");
	Ok(clients)
}
