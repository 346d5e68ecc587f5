//! Remote tree nodes and the identity predicates over them
//!
//! Everything in this module is pure: nothing here talks to the content
//! repository, so the same inputs always yield the same answers.

use super::addressing::{LinkRelation, Locator, ResourceUri};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a [`Resource`] is. Fixed for the lifetime of the resource.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ResourceKind {
	RootFolder,
	MyFolder,
	TrashFolder,
	FavoritesFolder,
	Folder,
	File,
	/// A favorite pointing at another resource
	Reference,
}

impl ResourceKind {
	pub const fn is_container(self) -> bool {
		matches!(
			self,
			Self::RootFolder
				| Self::MyFolder
				| Self::TrashFolder
				| Self::FavoritesFolder
				| Self::Folder
		)
	}

	/// Delegate containers have their own drop and mutation rules
	pub const fn is_delegate(self) -> bool {
		matches!(
			self,
			Self::RootFolder | Self::MyFolder | Self::TrashFolder | Self::FavoritesFolder
		)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFlags {
	#[serde(default)]
	pub is_in_recycle_bin: bool,
}

/// A node in the remote content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
	/// Stable identity assigned by the remote store
	pub id: String,
	pub name: String,
	pub kind: ResourceKind,
	/// Address of the containing folder, `None` for top level nodes
	pub parent: Option<ResourceUri>,
	#[serde(default)]
	pub links: BTreeMap<LinkRelation, ResourceUri>,
	#[serde(default)]
	pub flags: ResourceFlags,
	pub created_at: DateTime<Utc>,
	pub modified_at: DateTime<Utc>,
}

impl Resource {
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		kind: ResourceKind,
		self_uri: ResourceUri,
	) -> Self {
		let now = Utc::now();
		Self {
			id: id.into(),
			name: name.into(),
			kind,
			parent: None,
			links: BTreeMap::from([(LinkRelation::SelfLink, self_uri)]),
			flags: ResourceFlags::default(),
			created_at: now,
			modified_at: now,
		}
	}

	#[must_use]
	pub fn with_parent(mut self, parent: ResourceUri) -> Self {
		self.links.insert(LinkRelation::Parent, parent.clone());
		self.parent = Some(parent);
		self
	}

	#[must_use]
	pub fn with_link(mut self, relation: LinkRelation, uri: ResourceUri) -> Self {
		self.links.insert(relation, uri);
		self
	}

	pub fn link(&self, relation: LinkRelation) -> Option<&ResourceUri> {
		self.links.get(&relation)
	}

	/// The store's address for this resource, if it advertised one
	pub fn self_uri(&self) -> Option<&ResourceUri> {
		self.link(LinkRelation::SelfLink)
	}

	pub const fn is_container(&self) -> bool {
		self.kind.is_container()
	}

	pub const fn is_reference(&self) -> bool {
		matches!(self.kind, ResourceKind::Reference)
	}

	pub const fn is_in_recycle_bin(&self) -> bool {
		self.flags.is_in_recycle_bin
	}

	/// Editor-visible address of this resource
	pub fn locator(&self, read_only: bool) -> Locator {
		Locator::new(self.id.clone(), self.name.clone(), read_only)
	}

	/// Whether `self` sits directly inside `container`
	pub fn is_child_of(&self, container: &Self) -> bool {
		match (&self.parent, container.self_uri()) {
			(Some(parent), Some(container_uri)) => parent == container_uri,
			_ => false,
		}
	}
}

/// Free-function form of [`Resource::is_container`]
pub const fn is_container(resource: &Resource) -> bool {
	resource.is_container()
}

/// Free-function form of [`Resource::locator`]
pub fn locator_for(resource: &Resource, read_only: bool) -> Locator {
	resource.locator(read_only)
}

/// Free-function form of [`Resource::is_reference`]
pub const fn is_reference(resource: &Resource) -> bool {
	resource.is_reference()
}

/// Free-function form of [`Resource::is_in_recycle_bin`]
pub const fn is_in_recycle_bin(resource: &Resource) -> bool {
	resource.is_in_recycle_bin()
}
