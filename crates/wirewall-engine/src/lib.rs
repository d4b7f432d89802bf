// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reconciliation engine for wirewall.
//!
//! Turns a [`TunnelConfig`](wirewall_common::TunnelConfig) and
//! [`ClientSet`](wirewall_common::ClientSet) into the complete desired state and
//! pushes it out, in this order:
//!
//! 1. a [`PeerSetRequest`] replacing every peer on the WireGuard device,
//!    applied through a [`TunnelControl`]
//! 2. when a zone is configured, one [`DnsBatch`] per zone (forward, then
//!    reverse), each submitted atomically through a [`DnsUpdater`]
//!
//! The first failure stops the run. Steps already applied are not rolled
//! back.
//!
//! Production implementations are [`KernelTunnel`] (netlink via
//! `wireguard-control`) and [`NsupdateClient`] (`nsupdate -l`).

pub mod dns;
pub mod error;
pub mod nsupdate;
pub mod peer_set;
pub mod reconciler;
pub mod tunnel;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use dns::{plan_dns, DnsBatch, DnsInstruction, DnsRecord, DnsUpdater, RecordData};
pub use error::{DnsError, ReconcileError, TunnelError};
pub use nsupdate::NsupdateClient;
pub use peer_set::{plan_peer_set, PeerDescriptor, PeerSetRequest};
pub use reconciler::{ReconcileReport, Reconciler};
pub use tunnel::{KernelTunnel, TunnelControl};
