//! Drag-and-drop payload channels
//!
//! A drop carries up to two channels: serialized [`Resource`]s dragged from
//! inside the tree, and a `text/uri-list` of local files dragged in from
//! outside.

use crate::{
	domain::Resource,
	error::{ContentError, Result},
};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Channel carrying resources dragged within the tree
pub const RESOURCE_MIME_TYPE: &str = "application/vnd.sd-content.resources+json";

/// Channel carrying external file URIs
pub const URI_LIST_MIME_TYPE: &str = "text/uri-list";

/// What a drag out of the tree puts on [`RESOURCE_MIME_TYPE`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
	pub resources: Vec<Resource>,
}

impl DragPayload {
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Everything a drop delivered, already decoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropPayload {
	pub resources: Vec<Resource>,
	pub paths: Vec<PathBuf>,
}

impl DropPayload {
	/// Decode the raw channel contents; absent or blank channels are empty
	pub fn from_channels(resources: Option<&str>, uri_list: Option<&str>) -> Result<Self> {
		let resources = match resources.map(str::trim) {
			Some(json) if !json.is_empty() => DragPayload::from_json(json)?.resources,
			_ => Vec::new(),
		};

		let paths = uri_list
			.map(parse_uri_list)
			.transpose()?
			.unwrap_or_default();

		Ok(Self { resources, paths })
	}

	pub fn is_empty(&self) -> bool {
		self.resources.is_empty() && self.paths.is_empty()
	}
}

/// Local paths named by a `text/uri-list`, skipping blanks and `#` comments
fn parse_uri_list(list: &str) -> Result<Vec<PathBuf>> {
	list.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(|line| {
			Url::parse(line)
				.ok()
				.filter(|url| url.scheme() == "file")
				.and_then(|url| url.to_file_path().ok())
				.ok_or_else(|| ContentError::InvalidUri(line.to_string()))
		})
		.collect()
}
