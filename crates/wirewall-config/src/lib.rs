// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading of the wirewall configuration from disk.
//!
//! Two sources are read:
//!
//! - the tunnel config file (`/etc/wirewall/wirewall.conf` by default), with
//!   the keys `interface`, `zone`, `reverse_zone` and `ttl`
//! - the clients directory (`/etc/wirewall/clients` by default), holding one
//!   `<name>.conf` per client with the keys `ip`, `public_key` and
//!   `preshared_key`
//!
//! Loading is all-or-nothing: a single bad file fails the whole load and no
//! partial result is ever returned.

pub mod clients;
pub mod error;
mod fields;
pub mod paths;
pub mod tunnel;

pub use clients::{load_clients, CLIENT_EXTENSION};
pub use error::{ConfigError, Result};
pub use paths::{load, ConfigPaths, LoadedConfig, DEFAULT_CLIENTS_DIR, DEFAULT_CONFIG_FILE};
pub use tunnel::load_tunnel_config;
