// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::Result;
use crate::fields::{read_ini, Fields};
use std::path::Path;
use tracing::{debug, instrument};
use wirewall_common::{TunnelConfig, DEFAULT_TTL};

const TUNNEL_KEYS: &[&str] = &["interface", "zone", "reverse_zone", "ttl"];

fn check_zone(fields: &Fields<'_>, field: &'static str, zone: &str) -> Result<String> {
	if zone.is_empty() {
		return Err(fields.invalid(field, "empty zone name"));
	}
	if zone.chars().any(char::is_whitespace) {
		return Err(fields.invalid(field, "zone name contains whitespace"));
	}
	if zone.starts_with('.') || zone.contains("..") {
		return Err(fields.invalid(field, "zone name has an empty label"));
	}
	Ok(zone.to_string())
}

/// Loads the tunnel-level config file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_tunnel_config(path: impl AsRef<Path>) -> Result<TunnelConfig> {
	let path = path.as_ref();
	let ini = read_ini(path).await?;
	let fields = Fields::new(path, &ini, TUNNEL_KEYS)?;

	let interface = fields.required("interface")?;
	if interface.is_empty() {
		return Err(fields.invalid("interface", "empty interface name"));
	}

	let zone = fields
		.optional("zone")
		.map(|z| check_zone(&fields, "zone", z))
		.transpose()?;

	let reverse_zone = fields
		.optional("reverse_zone")
		.map(|z| check_zone(&fields, "reverse_zone", z))
		.transpose()?;
	if reverse_zone.is_some() && zone.is_none() {
		return Err(fields.invalid("reverse_zone", "requires zone to be set"));
	}

	let ttl = fields
		.optional("ttl")
		.map(|s| s.parse::<u32>().map_err(|e| fields.invalid("ttl", e)))
		.transpose()?
		.unwrap_or(DEFAULT_TTL);

	debug!(
		interface,
		zone = zone.as_deref().unwrap_or("-"),
		reverse_zone = reverse_zone.as_deref().unwrap_or("-"),
		ttl,
		"loaded tunnel config"
	);

	Ok(TunnelConfig {
		interface: interface.to_string(),
		zone,
		reverse_zone,
		ttl,
	})
}
