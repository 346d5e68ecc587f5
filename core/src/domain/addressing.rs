//! Addressing data structures for the remote content tree
//!
//! Two kinds of addresses live here:
//! - [`ResourceUri`]: the remote store's own address for a resource, as found
//!   in a resource's link table (`self`, `previousParent`, ...).
//! - [`Locator`]: the editor-visible address of a document, derived from a
//!   resource's identity plus a read-only flag.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheme of read-write locators
pub const CONTENT_SCHEME: &str = "content";

/// Scheme of read-only locators
pub const READ_ONLY_CONTENT_SCHEME: &str = "contentReadOnly";

/// Address of a resource inside the remote store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUri(String);

impl ResourceUri {
	pub fn new(uri: impl Into<String>) -> Self {
		Self(uri.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ResourceUri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ResourceUri {
	fn from(uri: &str) -> Self {
		Self::new(uri)
	}
}

/// Named relations in a resource's link table
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
	strum::AsRefStr,
	strum::Display,
	strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LinkRelation {
	#[serde(rename = "self")]
	#[strum(serialize = "self")]
	SelfLink,
	Parent,
	PreviousParent,
	/// The resource a favorite points at
	Target,
	Content,
}

/// Well-known containers resolved by name instead of tree traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelegateFolder {
	Root,
	MyFolder,
	Favorites,
	RecycleBin,
}

impl DelegateFolder {
	/// Name the remote store knows this delegate by
	pub const fn delegate_name(self) -> &'static str {
		match self {
			Self::Root => "@sasRoot",
			Self::MyFolder => "@myFolder",
			Self::Favorites => "@myFavorites",
			Self::RecycleBin => "@myRecycleBin",
		}
	}
}

/// Canonical editor-visible address of a resource
///
/// Derived only from the resource's id and name plus the read-only flag, so
/// two resources with equal locators are the same open document. Renaming a
/// resource changes its locator; moving it does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
	read_only: bool,
	name: String,
	id: String,
}

impl Locator {
	pub fn new(id: impl Into<String>, name: impl Into<String>, read_only: bool) -> Self {
		Self {
			read_only,
			name: name.into(),
			id: id.into(),
		}
	}

	pub const fn is_read_only(&self) -> bool {
		self.read_only
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub const fn scheme(&self) -> &'static str {
		if self.read_only {
			READ_ONLY_CONTENT_SCHEME
		} else {
			CONTENT_SCHEME
		}
	}

	/// Same document opened with the other access mode
	#[must_use]
	pub fn with_read_only(&self, read_only: bool) -> Self {
		Self {
			read_only,
			..self.clone()
		}
	}
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:/{}?id={}", self.scheme(), self.name, self.id)
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorParseError {
	#[error("locator has no scheme: {0}")]
	MissingScheme(String),
	#[error("unknown locator scheme: {0}")]
	UnknownScheme(String),
	#[error("locator has no id query: {0}")]
	MissingId(String),
}

impl FromStr for Locator {
	type Err = LocatorParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (scheme, rest) = s
			.split_once(":/")
			.ok_or_else(|| LocatorParseError::MissingScheme(s.to_string()))?;

		let read_only = match scheme {
			CONTENT_SCHEME => false,
			READ_ONLY_CONTENT_SCHEME => true,
			other => return Err(LocatorParseError::UnknownScheme(other.to_string())),
		};

		// Ids never contain '?', names may
		let (name, id) = rest
			.rsplit_once("?id=")
			.filter(|(_, id)| !id.is_empty())
			.ok_or_else(|| LocatorParseError::MissingId(s.to_string()))?;

		Ok(Self::new(id, name, read_only))
	}
}
