// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init(json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr);

	if json {
		builder.json().init();
	} else {
		builder.init();
	}
}
