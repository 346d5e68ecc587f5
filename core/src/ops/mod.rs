//! Operations on the remote tree
//!
//! - [`files`]: single-resource state transitions (create, rename, delete,
//!   recycle, restore, favorite, move)
//! - [`transfer`]: recursive import from and export to the local file system
//! - [`drop`]: reconciling drag-and-drop payloads against a drop target
//! - [`query`]: read-only tree and content queries for the UI layer

pub mod drop;
pub mod files;
pub mod query;
pub mod transfer;

use crate::error::ContentError;

/// One failed item of a batch operation
#[derive(Debug)]
pub struct ItemFailure {
	pub name: String,
	pub error: ContentError,
}

impl ItemFailure {
	pub fn new(name: impl Into<String>, error: ContentError) -> Self {
		Self {
			name: name.into(),
			error,
		}
	}
}

/// Single user-facing message naming every failed item
pub(crate) fn failure_message(action: &str, names: &[String]) -> String {
	format!("{action}: {}", names.join(", "))
}
