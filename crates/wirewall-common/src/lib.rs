// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared data model for wirewall.
//!
//! This crate holds the in-memory representation of a tunnel endpoint and its
//! clients, independent of how they are loaded or applied:
//!
//! - [`TunnelConfig`]: the tunnel device and optional DNS zones
//! - [`ClientRecord`] / [`ClientSet`]: one WireGuard peer per client, plus the
//!   DNS names derived from it
//! - [`WgKey`] / [`PresharedKey`]: fixed-length WireGuard keys decoded from
//!   base64

pub mod client;
pub mod config;
pub mod keys;

pub use client::{reverse_name, ClientRecord, ClientSet};
pub use config::{TunnelConfig, DEFAULT_TTL};
pub use keys::{KeyError, PresharedKey, WgKey, KEY_LEN, REDACTED};
