// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length in bytes of every WireGuard key.
pub const KEY_LEN: usize = 32;

pub const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Error)]
pub enum KeyError {
	#[error("invalid base64: {0}")]
	Base64(#[from] base64::DecodeError),

	#[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
	Length(usize),
}

fn decode_key(encoded: &str) -> Result<[u8; KEY_LEN], KeyError> {
	let bytes = Zeroizing::new(STANDARD.decode(encoded.trim())?);
	if bytes.len() != KEY_LEN {
		return Err(KeyError::Length(bytes.len()));
	}
	let mut key = [0u8; KEY_LEN];
	key.copy_from_slice(&bytes);
	Ok(key)
}

/// A WireGuard public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WgKey([u8; KEY_LEN]);

impl WgKey {
	pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
		Self(bytes)
	}

	pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
		decode_key(encoded).map(Self)
	}

	pub fn to_base64(&self) -> String {
		STANDARD.encode(self.0)
	}

	pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
		&self.0
	}
}

impl FromStr for WgKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_base64(s)
	}
}

impl fmt::Display for WgKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_base64())
	}
}

impl fmt::Debug for WgKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("WgKey").field(&self.to_base64()).finish()
	}
}

/// A WireGuard preshared key. Wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PresharedKey([u8; KEY_LEN]);

impl PresharedKey {
	pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
		Self(bytes)
	}

	pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
		let mut raw = decode_key(encoded)?;
		let key = Self(raw);
		raw.zeroize();
		Ok(key)
	}

	/// Base64 form of the key, for handing to the control plane.
	pub fn expose_base64(&self) -> Zeroizing<String> {
		Zeroizing::new(STANDARD.encode(self.0))
	}

	pub fn expose_bytes(&self) -> &[u8; KEY_LEN] {
		&self.0
	}
}

impl fmt::Debug for PresharedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("PresharedKey").field(&REDACTED).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const ALICE_KEY: &str = "xTIBA5rboUvnH4htodjb6e697QjLERt1NAB4mZqp8Dg=";

	#[test]
	fn decodes_valid_key() {
		let key = WgKey::from_base64(ALICE_KEY).unwrap();
		assert_eq!(key.to_base64(), ALICE_KEY);
		assert_eq!(key.as_bytes().len(), KEY_LEN);
	}

	#[test]
	fn trims_surrounding_whitespace() {
		let key = WgKey::from_base64(&format!("  {ALICE_KEY}\n")).unwrap();
		assert_eq!(key.to_string(), ALICE_KEY);
	}

	#[test]
	fn rejects_short_key() {
		let err = WgKey::from_base64("AAAA").unwrap_err();
		assert!(matches!(err, KeyError::Length(3)));
	}

	#[test]
	fn rejects_bad_base64() {
		let err = WgKey::from_base64("not a key!").unwrap_err();
		assert!(matches!(err, KeyError::Base64(_)));
	}

	#[test]
	fn preshared_key_debug_is_redacted() {
		let psk = PresharedKey::from_base64(ALICE_KEY).unwrap();
		let debug = format!("{psk:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains(ALICE_KEY));
		assert_eq!(psk.expose_base64().as_str(), ALICE_KEY);
	}

	proptest! {
		#[test]
		fn prop_any_32_bytes_survive_base64(bytes in prop::array::uniform32(any::<u8>())) {
			let key = WgKey::from_bytes(bytes);
			let parsed: WgKey = key.to_base64().parse().unwrap();
			prop_assert_eq!(parsed, key);
		}

		#[test]
		fn prop_wrong_lengths_are_rejected(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
			prop_assume!(bytes.len() != KEY_LEN);
			let encoded = STANDARD.encode(&bytes);
			prop_assert!(matches!(WgKey::from_base64(&encoded), Err(KeyError::Length(_))));
		}
	}
}
