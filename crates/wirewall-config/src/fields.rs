// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::{ConfigError, Result};
use ini::{Ini, Properties};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use tokio::fs;
use tracing::trace;

/// Reads and parses an INI file.
pub(crate) async fn read_ini(path: &Path) -> Result<Ini> {
	let content = fs::read_to_string(path).await.map_err(ConfigError::io(path))?;
	Ini::load_from_str(&content).map_err(|e| ConfigError::Parse {
		path: path.to_path_buf(),
		message: e.to_string(),
	})
}

/// Key/value fields of a file's general (section-less) part.
///
/// Construction fails if the file has any named section, any key outside
/// `known`, or any key set twice, so every lookup sees the one value written.
pub(crate) struct Fields<'a> {
	path: &'a Path,
	props: Option<&'a Properties>,
}

impl<'a> Fields<'a> {
	pub(crate) fn new(path: &'a Path, ini: &'a Ini, known: &[&str]) -> Result<Self> {
		for (section, props) in ini.iter() {
			if let Some(section) = section {
				return Err(ConfigError::UnknownSection {
					path: path.to_path_buf(),
					section: section.to_string(),
				});
			}
			let mut seen = HashSet::new();
			for (key, _) in props.iter() {
				if !known.contains(&key) {
					return Err(ConfigError::UnknownField {
						path: path.to_path_buf(),
						key: key.to_string(),
					});
				}
				if !seen.insert(key) {
					return Err(ConfigError::DuplicateField {
						path: path.to_path_buf(),
						key: key.to_string(),
					});
				}
			}
		}

		trace!(path = %path.display(), "fields validated");

		Ok(Self {
			path,
			props: ini.section(None::<String>),
		})
	}

	pub(crate) fn optional(&self, field: &'static str) -> Option<&'a str> {
		self.props.and_then(|p| p.get(field))
	}

	pub(crate) fn required(&self, field: &'static str) -> Result<&'a str> {
		self.optional(field).ok_or_else(|| ConfigError::MissingField {
			path: self.path.to_path_buf(),
			field,
		})
	}

	pub(crate) fn invalid(&self, field: &'static str, reason: impl Display) -> ConfigError {
		ConfigError::InvalidField {
			path: self.path.to_path_buf(),
			field,
			reason: reason.to_string(),
		}
	}
}
