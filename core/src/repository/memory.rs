//! In-memory content repository
//!
//! A complete, process-local implementation of [`ContentRepository`]. The
//! four delegate folders exist from the start, the recycle bin keeps the
//! `previousParent` relation of everything moved into it, and favorites are
//! stored as references inside the favorites folder.

use super::{ContentRepository, TransportResult};
use crate::{
	domain::{DelegateFolder, LinkRelation, Locator, Resource, ResourceKind, ResourceUri},
	error::TransportError,
};

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

#[derive(Debug)]
struct Entry {
	resource: Resource,
	content: Option<Bytes>,
}

#[derive(Debug, Default)]
struct Store {
	entries: HashMap<ResourceUri, Entry>,
	delegates: HashMap<DelegateFolder, ResourceUri>,
	endpoint: Option<Url>,
	session_id: Option<String>,
}

#[derive(Debug)]
pub struct MemoryRepository {
	store: RwLock<Store>,
}

impl Default for MemoryRepository {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryRepository {
	/// Repository holding only the delegate folders
	pub fn new() -> Self {
		let mut store = Store::default();

		for (delegate, name, kind) in [
			(DelegateFolder::Root, "SAS Content", ResourceKind::RootFolder),
			(DelegateFolder::MyFolder, "My Folder", ResourceKind::MyFolder),
			(
				DelegateFolder::Favorites,
				"My Favorites",
				ResourceKind::FavoritesFolder,
			),
			(
				DelegateFolder::RecycleBin,
				"Recycle Bin",
				ResourceKind::TrashFolder,
			),
		] {
			let id = delegate.delegate_name().trim_start_matches('@');
			let uri = ResourceUri::new(format!("/folders/folders/{id}"));
			store.delegates.insert(delegate, uri.clone());
			store.entries.insert(
				uri.clone(),
				Entry {
					resource: Resource::new(id, name, kind, uri),
					content: None,
				},
			);
		}

		Self {
			store: RwLock::new(store),
		}
	}

	/// Drop one of the delegate folders, as servers without e.g. a recycle
	/// bin do
	#[must_use]
	pub fn without_delegate(self, delegate: DelegateFolder) -> Self {
		let mut store = self.store.into_inner();
		if let Some(uri) = store.delegates.remove(&delegate) {
			store.entries.remove(&uri);
		}
		Self {
			store: RwLock::new(store),
		}
	}

	/// Child of `parent` named `name`, if any
	pub async fn child_named(&self, parent: &Resource, name: &str) -> Option<Resource> {
		let parent_uri = parent.self_uri()?;
		self.store
			.read()
			.await
			.entries
			.values()
			.map(|entry| &entry.resource)
			.find(|resource| resource.parent.as_ref() == Some(parent_uri) && resource.name == name)
			.cloned()
	}

	/// Total number of resources, delegates included
	pub async fn len(&self) -> usize {
		self.store.read().await.entries.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.len().await == 0
	}
}

fn self_uri(resource: &Resource) -> TransportResult<&ResourceUri> {
	resource
		.self_uri()
		.ok_or_else(|| TransportError::NotFound(format!("self link of '{}'", resource.name)))
}

fn new_uri(kind: ResourceKind, id: &str) -> ResourceUri {
	match kind {
		ResourceKind::File => ResourceUri::new(format!("/files/files/{id}")),
		ResourceKind::Reference => ResourceUri::new(format!("/references/{id}")),
		_ => ResourceUri::new(format!("/folders/folders/{id}")),
	}
}

impl Store {
	fn get(&self, uri: &ResourceUri) -> TransportResult<&Entry> {
		self.entries.get(uri).ok_or_else(|| uri.into())
	}

	fn get_mut(&mut self, uri: &ResourceUri) -> TransportResult<&mut Entry> {
		self.entries.get_mut(uri).ok_or_else(|| uri.into())
	}

	fn by_id(&self, id: &str) -> TransportResult<&Entry> {
		self.entries
			.values()
			.find(|entry| entry.resource.id == id)
			.ok_or_else(|| TransportError::NotFound(id.to_string()))
	}

	fn children_of<'a>(&'a self, uri: &'a ResourceUri) -> impl Iterator<Item = &'a Resource> {
		self.entries
			.values()
			.map(|entry| &entry.resource)
			.filter(move |resource| resource.parent.as_ref() == Some(uri))
	}

	/// `uri` followed by everything below it
	fn subtree(&self, uri: &ResourceUri) -> Vec<ResourceUri> {
		let mut found = vec![];
		let mut queue = VecDeque::from([uri.clone()]);
		while let Some(next) = queue.pop_front() {
			queue.extend(self.children_of(&next).filter_map(|child| child.self_uri().cloned()));
			found.push(next);
		}
		found
	}

	fn ensure_unique_name(
		&self,
		parent: &ResourceUri,
		name: &str,
		except: Option<&ResourceUri>,
	) -> TransportResult<()> {
		let taken = self
			.children_of(parent)
			.any(|child| child.name == name && child.self_uri() != except);
		if taken {
			Err(TransportError::Conflict(name.to_string()))
		} else {
			Ok(())
		}
	}

	/// Parent able to receive new folders and files
	fn writable_container(&self, parent: &Resource) -> TransportResult<ResourceUri> {
		let uri = self_uri(parent)?;
		let stored = &self.get(uri)?.resource;
		match stored.kind {
			ResourceKind::TrashFolder | ResourceKind::FavoritesFolder => Err(
				TransportError::Rejected(format!("cannot create items in '{}'", stored.name)),
			),
			kind if kind.is_container() => Ok(uri.clone()),
			_ => Err(TransportError::Rejected(format!(
				"'{}' is not a folder",
				stored.name
			))),
		}
	}

	fn insert_new(
		&mut self,
		parent: ResourceUri,
		name: &str,
		kind: ResourceKind,
		content: Option<Bytes>,
	) -> Resource {
		let id = Uuid::new_v4().to_string();
		let uri = new_uri(kind, &id);
		let resource = Resource::new(id, name, kind, uri.clone()).with_parent(parent);
		self.entries.insert(
			uri,
			Entry {
				resource: resource.clone(),
				content,
			},
		);
		resource
	}

	fn unmovable(&self, uri: &ResourceUri) -> bool {
		self.delegates.values().any(|delegate| delegate == uri)
	}
}

#[async_trait]
impl ContentRepository for MemoryRepository {
	async fn connect(&self, endpoint: &Url) -> TransportResult<()> {
		let mut store = self.store.write().await;
		info!(%endpoint, "Connecting in-memory content repository");
		store.endpoint = Some(endpoint.clone());
		store.session_id = None;
		Ok(())
	}

	async fn acquire_session_id(&self) -> TransportResult<String> {
		let mut store = self.store.write().await;
		if store.endpoint.is_none() {
			return Err(TransportError::Disconnected);
		}
		Ok(store
			.session_id
			.get_or_insert_with(|| Uuid::new_v4().to_string())
			.clone())
	}

	async fn get_children(&self, parent: Option<&Resource>) -> TransportResult<Vec<Resource>> {
		let store = self.store.read().await;
		let mut children = match parent {
			None => store
				.entries
				.values()
				.map(|entry| &entry.resource)
				.filter(|resource| resource.parent.is_none())
				.cloned()
				.collect::<Vec<_>>(),
			Some(parent) => {
				let uri = self_uri(parent)?;
				store.get(uri)?;
				store.children_of(uri).cloned().collect()
			}
		};
		children.sort_by(|a, b| a.name.cmp(&b.name));
		Ok(children)
	}

	async fn get_resource_by_uri(&self, uri: &ResourceUri) -> TransportResult<Resource> {
		Ok(self.store.read().await.get(uri)?.resource.clone())
	}

	async fn get_resource_by_locator(&self, locator: &Locator) -> TransportResult<Resource> {
		Ok(self.store.read().await.by_id(locator.id())?.resource.clone())
	}

	async fn get_content_by_locator(&self, locator: &Locator) -> TransportResult<Bytes> {
		let store = self.store.read().await;
		let entry = store.by_id(locator.id())?;
		entry.content.clone().ok_or_else(|| {
			TransportError::Rejected(format!("'{}' has no content", entry.resource.name))
		})
	}

	async fn save_content(&self, locator: &Locator, content: Bytes) -> TransportResult<()> {
		if locator.is_read_only() {
			return Err(TransportError::Rejected(format!(
				"'{}' is opened read-only",
				locator.name()
			)));
		}

		let mut store = self.store.write().await;
		let uri = self_uri(&store.by_id(locator.id())?.resource)?.clone();
		let entry = store.get_mut(&uri)?;
		if entry.resource.kind != ResourceKind::File {
			return Err(TransportError::Rejected(format!(
				"'{}' is not a file",
				entry.resource.name
			)));
		}
		entry.content = Some(content);
		entry.resource.modified_at = Utc::now();
		Ok(())
	}

	async fn create_folder(&self, parent: &Resource, name: &str) -> TransportResult<Resource> {
		let mut store = self.store.write().await;
		let parent_uri = store.writable_container(parent)?;
		store.ensure_unique_name(&parent_uri, name, None)?;
		debug!(%parent_uri, name, "Creating folder");
		Ok(store.insert_new(parent_uri, name, ResourceKind::Folder, None))
	}

	async fn create_file(
		&self,
		parent: &Resource,
		name: &str,
		content: Bytes,
	) -> TransportResult<Resource> {
		let mut store = self.store.write().await;
		let parent_uri = store.writable_container(parent)?;
		store.ensure_unique_name(&parent_uri, name, None)?;
		debug!(%parent_uri, name, bytes = content.len(), "Creating file");
		Ok(store.insert_new(parent_uri, name, ResourceKind::File, Some(content)))
	}

	async fn rename(&self, resource: &Resource, new_name: &str) -> TransportResult<Resource> {
		let mut store = self.store.write().await;
		let uri = self_uri(resource)?;
		if store.unmovable(uri) {
			return Err(TransportError::Rejected(format!(
				"'{}' cannot be renamed",
				resource.name
			)));
		}
		if let Some(parent) = store.get(uri)?.resource.parent.clone() {
			store.ensure_unique_name(&parent, new_name, Some(uri))?;
		}

		let entry = store.get_mut(uri)?;
		entry.resource.name = new_name.to_string();
		entry.resource.modified_at = Utc::now();
		Ok(entry.resource.clone())
	}

	async fn delete(&self, resource: &Resource) -> TransportResult<()> {
		let mut store = self.store.write().await;
		let uri = self_uri(resource)?;
		store.get(uri)?;
		if store.unmovable(uri) {
			return Err(TransportError::Rejected(format!(
				"'{}' cannot be deleted",
				resource.name
			)));
		}

		// References elsewhere are left alone, they go stale instead
		for doomed in store.subtree(uri) {
			store.entries.remove(&doomed);
		}
		Ok(())
	}

	async fn move_to(
		&self,
		resource: &Resource,
		destination: &ResourceUri,
	) -> TransportResult<Resource> {
		let mut store = self.store.write().await;
		let uri = self_uri(resource)?.clone();
		let current = store.get(&uri)?.resource.clone();
		let target = store.get(destination)?.resource.clone();

		if store.unmovable(&uri) || current.is_reference() {
			return Err(TransportError::Rejected(format!(
				"'{}' cannot be moved",
				current.name
			)));
		}
		if !target.is_container() || target.kind == ResourceKind::FavoritesFolder {
			return Err(TransportError::Rejected(format!(
				"'{}' cannot hold moved items",
				target.name
			)));
		}
		if current.parent.as_ref() == Some(destination) {
			return Ok(current);
		}

		let subtree = store.subtree(&uri);
		if subtree.contains(destination) {
			return Err(TransportError::Rejected(format!(
				"'{}' cannot be moved into itself",
				current.name
			)));
		}

		let into_trash = target.kind == ResourceKind::TrashFolder;
		if !into_trash {
			store.ensure_unique_name(destination, &current.name, Some(&uri))?;
		}

		for moved in &subtree {
			let entry = store.get_mut(moved)?;
			entry.resource.flags.is_in_recycle_bin = into_trash;
		}

		let entry = store.get_mut(&uri)?;
		let resource = &mut entry.resource;
		if into_trash {
			if let Some(previous) = resource.parent.clone() {
				resource.links.insert(LinkRelation::PreviousParent, previous);
			}
		} else {
			resource.links.remove(&LinkRelation::PreviousParent);
		}
		resource.parent = Some(destination.clone());
		resource
			.links
			.insert(LinkRelation::Parent, destination.clone());
		resource.modified_at = Utc::now();

		Ok(resource.clone())
	}

	async fn get_parent(&self, resource: &Resource) -> TransportResult<Option<Resource>> {
		let store = self.store.read().await;
		let current = &store.get(self_uri(resource)?)?.resource;
		match &current.parent {
			Some(parent) => Ok(Some(store.get(parent)?.resource.clone())),
			None => Ok(None),
		}
	}

	async fn get_delegate_folder(
		&self,
		delegate: DelegateFolder,
	) -> TransportResult<Option<Resource>> {
		let store = self.store.read().await;
		Ok(store
			.delegates
			.get(&delegate)
			.and_then(|uri| store.entries.get(uri))
			.map(|entry| entry.resource.clone()))
	}

	async fn add_favorite(&self, resource: &Resource) -> TransportResult<Resource> {
		let mut store = self.store.write().await;
		let favorites = store
			.delegates
			.get(&DelegateFolder::Favorites)
			.cloned()
			.ok_or_else(|| TransportError::NotFound(DelegateFolder::Favorites.delegate_name().into()))?;

		let target_uri = self_uri(resource)?.clone();
		let target = store.get(&target_uri)?.resource.clone();
		if target.is_reference() {
			return Err(TransportError::Rejected(format!(
				"'{}' is already a favorite",
				target.name
			)));
		}

		let already = store
			.children_of(&favorites)
			.any(|reference| reference.link(LinkRelation::Target) == Some(&target_uri));
		if already {
			return Err(TransportError::Conflict(target.name));
		}

		let reference = store
			.insert_new(favorites, &target.name, ResourceKind::Reference, None)
			.with_link(LinkRelation::Target, target_uri);
		let uri = new_uri(ResourceKind::Reference, &reference.id);
		store.get_mut(&uri)?.resource = reference.clone();
		Ok(reference)
	}

	async fn remove_favorite(&self, resource: &Resource) -> TransportResult<()> {
		let mut store = self.store.write().await;
		let uri = self_uri(resource)?;

		let reference = if resource.is_reference() {
			store.get(uri)?;
			Some(uri.clone())
		} else {
			store
				.entries
				.iter()
				.find(|(_, entry)| {
					entry.resource.is_reference()
						&& entry.resource.link(LinkRelation::Target) == Some(uri)
				})
				.map(|(reference, _)| reference.clone())
		};

		let reference = reference.ok_or_else(|| {
			TransportError::NotFound(format!("favorite for '{}'", resource.name))
		})?;
		store.entries.remove(&reference);
		Ok(())
	}
}
