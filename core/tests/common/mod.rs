#![allow(dead_code)]

//! Doubles shared by the integration tests: an editor host that records
//! what it was asked to do, and a repository wrapper that fails on request.

use sd_content_core::{
	config::ContentConfig,
	domain::{DelegateFolder, Locator, Resource, ResourceUri},
	error::TransportError,
	fs::TokioFs,
	infra::host::{CloseOutcome, EditorHost},
	repository::{ContentRepository, MemoryRepository, TransportResult},
	ContentCore,
};

use std::{
	collections::{HashMap, HashSet},
	path::Path,
	sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
	Close(Locator),
	Open(Locator),
	Reveal(Locator),
}

/// Editor host with a scripted set of open documents
#[derive(Debug, Default)]
pub struct RecordingHost {
	open: Mutex<HashSet<Locator>>,
	keep_open: Mutex<HashSet<Locator>>,
	calls: Mutex<Vec<HostCall>>,
	errors: Mutex<Vec<String>>,
}

impl RecordingHost {
	pub fn with_open(&self, locator: Locator) {
		self.open.lock().unwrap().insert(locator);
	}

	/// The user will refuse to close `locator`
	pub fn decline_close(&self, locator: Locator) {
		self.keep_open.lock().unwrap().insert(locator);
	}

	pub fn calls(&self) -> Vec<HostCall> {
		self.calls.lock().unwrap().clone()
	}

	pub fn is_open_at(&self, locator: &Locator) -> bool {
		self.open.lock().unwrap().contains(locator)
	}

	pub fn errors(&self) -> Vec<String> {
		self.errors.lock().unwrap().clone()
	}
}

#[async_trait]
impl EditorHost for RecordingHost {
	fn is_open(&self, locator: &Locator) -> bool {
		self.open.lock().unwrap().contains(locator)
	}

	async fn close(&self, locator: &Locator) -> CloseOutcome {
		self.calls
			.lock()
			.unwrap()
			.push(HostCall::Close(locator.clone()));

		if self.keep_open.lock().unwrap().contains(locator) {
			CloseOutcome::Declined
		} else {
			self.open.lock().unwrap().remove(locator);
			CloseOutcome::Closed
		}
	}

	async fn open(&self, locator: &Locator) {
		self.calls
			.lock()
			.unwrap()
			.push(HostCall::Open(locator.clone()));
		self.open.lock().unwrap().insert(locator.clone());
	}

	async fn reveal(&self, locator: &Locator) {
		self.calls
			.lock()
			.unwrap()
			.push(HostCall::Reveal(locator.clone()));
	}

	fn show_error(&self, message: &str) {
		self.errors.lock().unwrap().push(message.to_string());
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
	CreateFolder,
	CreateFile,
	Rename,
	Delete,
	MoveTo,
	AddFavorite,
}

/// [`MemoryRepository`] that counts mutating calls and fails the ones
/// registered with [`FlakyRepository::fail`]
#[derive(Debug, Default)]
pub struct FlakyRepository {
	pub inner: MemoryRepository,
	failing: Mutex<HashSet<(Op, String)>>,
	calls: Mutex<HashMap<Op, usize>>,
}

impl FlakyRepository {
	pub fn new(inner: MemoryRepository) -> Self {
		Self {
			inner,
			..Default::default()
		}
	}

	/// Fail every `op` on a resource, or into a folder, named `name`
	pub fn fail(&self, op: Op, name: &str) {
		self.failing.lock().unwrap().insert((op, name.to_string()));
	}

	pub fn calls(&self, op: Op) -> usize {
		self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
	}

	fn check(&self, op: Op, name: &str) -> TransportResult<()> {
		*self.calls.lock().unwrap().entry(op).or_default() += 1;

		if self.failing.lock().unwrap().contains(&(op, name.to_string())) {
			Err(TransportError::Rejected(format!("injected {op:?} failure on {name}")))
		} else {
			Ok(())
		}
	}
}

#[async_trait]
impl ContentRepository for FlakyRepository {
	async fn connect(&self, endpoint: &Url) -> TransportResult<()> {
		self.inner.connect(endpoint).await
	}

	async fn acquire_session_id(&self) -> TransportResult<String> {
		self.inner.acquire_session_id().await
	}

	async fn get_children(&self, parent: Option<&Resource>) -> TransportResult<Vec<Resource>> {
		self.inner.get_children(parent).await
	}

	async fn get_resource_by_uri(&self, uri: &ResourceUri) -> TransportResult<Resource> {
		self.inner.get_resource_by_uri(uri).await
	}

	async fn get_resource_by_locator(&self, locator: &Locator) -> TransportResult<Resource> {
		self.inner.get_resource_by_locator(locator).await
	}

	async fn get_content_by_locator(&self, locator: &Locator) -> TransportResult<Bytes> {
		self.inner.get_content_by_locator(locator).await
	}

	async fn save_content(&self, locator: &Locator, content: Bytes) -> TransportResult<()> {
		self.inner.save_content(locator, content).await
	}

	async fn create_folder(&self, parent: &Resource, name: &str) -> TransportResult<Resource> {
		self.check(Op::CreateFolder, name)?;
		self.inner.create_folder(parent, name).await
	}

	async fn create_file(
		&self,
		parent: &Resource,
		name: &str,
		content: Bytes,
	) -> TransportResult<Resource> {
		self.check(Op::CreateFile, name)?;
		self.inner.create_file(parent, name, content).await
	}

	async fn rename(&self, resource: &Resource, new_name: &str) -> TransportResult<Resource> {
		self.check(Op::Rename, &resource.name)?;
		self.inner.rename(resource, new_name).await
	}

	async fn delete(&self, resource: &Resource) -> TransportResult<()> {
		self.check(Op::Delete, &resource.name)?;
		self.inner.delete(resource).await
	}

	async fn move_to(
		&self,
		resource: &Resource,
		destination: &ResourceUri,
	) -> TransportResult<Resource> {
		self.check(Op::MoveTo, &resource.name)?;
		self.inner.move_to(resource, destination).await
	}

	async fn get_parent(&self, resource: &Resource) -> TransportResult<Option<Resource>> {
		self.inner.get_parent(resource).await
	}

	async fn get_delegate_folder(
		&self,
		delegate: DelegateFolder,
	) -> TransportResult<Option<Resource>> {
		self.inner.get_delegate_folder(delegate).await
	}

	async fn add_favorite(&self, resource: &Resource) -> TransportResult<Resource> {
		self.check(Op::AddFavorite, &resource.name)?;
		self.inner.add_favorite(resource).await
	}

	async fn remove_favorite(&self, resource: &Resource) -> TransportResult<()> {
		self.inner.remove_favorite(resource).await
	}
}

pub struct Harness {
	pub core: ContentCore,
	pub repository: Arc<FlakyRepository>,
	pub host: Arc<RecordingHost>,
}

impl Harness {
	pub fn new(data_dir: &Path) -> Self {
		Self::over(MemoryRepository::new(), data_dir)
	}

	pub fn over(repository: MemoryRepository, data_dir: &Path) -> Self {
		let repository = Arc::new(FlakyRepository::new(repository));
		let host = Arc::new(RecordingHost::default());
		let core = ContentCore::new(
			ContentConfig::default_with_dir(data_dir.to_path_buf()),
			repository.clone(),
			host.clone(),
			Arc::new(TokioFs),
		);

		Self {
			core,
			repository,
			host,
		}
	}

	pub async fn delegate(&self, delegate: DelegateFolder) -> Resource {
		self.repository
			.get_delegate_folder(delegate)
			.await
			.unwrap()
			.unwrap()
	}

	pub async fn my_folder(&self) -> Resource {
		self.delegate(DelegateFolder::MyFolder).await
	}

	/// Names of the children of `parent`, in tree order
	pub async fn child_names(&self, parent: &Resource) -> Vec<String> {
		self.core
			.children(Some(parent))
			.await
			.unwrap()
			.into_iter()
			.map(|child| child.name)
			.collect()
	}

	pub async fn file(&self, parent: &Resource, name: &str, content: &str) -> Resource {
		self.core
			.mutations()
			.create_file(parent, name, Some(Bytes::from(content.to_string())))
			.await
			.unwrap()
	}

	pub async fn folder(&self, parent: &Resource, name: &str) -> Resource {
		self.core
			.mutations()
			.create_folder(parent, name)
			.await
			.unwrap()
	}
}
