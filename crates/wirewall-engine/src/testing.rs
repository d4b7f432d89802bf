// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recording fakes of [`TunnelControl`] and [`DnsUpdater`].
//!
//! Both fakes append to a shared [`CallLog`], so tests can assert on the
//! order of calls across the two capabilities.

use crate::dns::{DnsBatch, DnsUpdater};
use crate::error::{DnsError, TunnelError};
use crate::peer_set::PeerSetRequest;
use crate::tunnel::TunnelControl;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Tunnel(PeerSetRequest),
	Dns(DnsBatch),
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&self, call: Call) {
		self.0.lock().unwrap().push(call);
	}

	pub fn calls(&self) -> Vec<Call> {
		self.0.lock().unwrap().clone()
	}

	pub fn tunnel_requests(&self) -> Vec<PeerSetRequest> {
		self
			.calls()
			.into_iter()
			.filter_map(|c| match c {
				Call::Tunnel(request) => Some(request),
				Call::Dns(_) => None,
			})
			.collect()
	}

	pub fn dns_batches(&self) -> Vec<DnsBatch> {
		self
			.calls()
			.into_iter()
			.filter_map(|c| match c {
				Call::Dns(batch) => Some(batch),
				Call::Tunnel(_) => None,
			})
			.collect()
	}

	pub fn clear(&self) {
		self.0.lock().unwrap().clear();
	}
}

/// Tracks how many calls run at once.
#[derive(Debug, Default)]
struct Concurrency {
	current: AtomicUsize,
	max: AtomicUsize,
}

impl Concurrency {
	fn enter(&self) {
		let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
		self.max.fetch_max(now, Ordering::SeqCst);
	}

	fn exit(&self) {
		self.current.fetch_sub(1, Ordering::SeqCst);
	}
}

#[derive(Debug, Default)]
pub struct RecordingTunnel {
	log: CallLog,
	failure: Mutex<Option<String>>,
	delay: Option<Duration>,
	concurrency: Concurrency,
}

impl RecordingTunnel {
	pub fn new(log: CallLog) -> Self {
		Self {
			log,
			..Self::default()
		}
	}

	/// Sleeps this long inside every call, widening any overlap window.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Makes subsequent calls fail with `message`, or succeed again with `None`.
	pub fn set_failure(&self, message: Option<&str>) {
		*self.failure.lock().unwrap() = message.map(str::to_string);
	}

	/// Largest number of calls observed in flight at the same time.
	pub fn max_concurrent_calls(&self) -> usize {
		self.concurrency.max.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl TunnelControl for RecordingTunnel {
	async fn apply_peer_set(&self, request: &PeerSetRequest) -> Result<(), TunnelError> {
		self.concurrency.enter();
		self.log.push(Call::Tunnel(request.clone()));
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		self.concurrency.exit();

		match self.failure.lock().unwrap().clone() {
			Some(message) => Err(TunnelError::Apply(std::io::Error::other(message))),
			None => Ok(()),
		}
	}
}

#[derive(Debug, Default)]
pub struct RecordingDns {
	log: CallLog,
	failure: Mutex<Option<String>>,
	delay: Option<Duration>,
	concurrency: Concurrency,
}

impl RecordingDns {
	pub fn new(log: CallLog) -> Self {
		Self {
			log,
			..Self::default()
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Makes subsequent submissions be rejected with `message` as stderr.
	pub fn set_failure(&self, message: Option<&str>) {
		*self.failure.lock().unwrap() = message.map(str::to_string);
	}

	pub fn max_concurrent_calls(&self) -> usize {
		self.concurrency.max.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl DnsUpdater for RecordingDns {
	async fn submit(&self, batch: &DnsBatch) -> Result<(), DnsError> {
		self.concurrency.enter();
		self.log.push(Call::Dns(batch.clone()));
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		self.concurrency.exit();

		match self.failure.lock().unwrap().clone() {
			Some(stderr) => Err(DnsError::Rejected {
				status: "exit status: 2".to_string(),
				stderr,
			}),
			None => Ok(()),
		}
	}
}
