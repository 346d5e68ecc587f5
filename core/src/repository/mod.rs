//! Content repository capability
//!
//! The core never talks to the remote store directly. Everything goes
//! through [`ContentRepository`], and after a mutation the core asks the UI
//! to re-query instead of patching any cached tree locally.

pub mod memory;

use crate::{
	domain::{DelegateFolder, Locator, Resource, ResourceUri},
	error::TransportError,
};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

pub use memory::MemoryRepository;

pub type TransportResult<T> = Result<T, TransportError>;

/// Operations the remote content store offers
#[async_trait]
pub trait ContentRepository: Send + Sync {
	async fn connect(&self, endpoint: &Url) -> TransportResult<()>;

	async fn acquire_session_id(&self) -> TransportResult<String>;

	/// Children of `parent`, or the top level nodes when `parent` is `None`
	async fn get_children(&self, parent: Option<&Resource>) -> TransportResult<Vec<Resource>>;

	async fn get_resource_by_uri(&self, uri: &ResourceUri) -> TransportResult<Resource>;

	async fn get_resource_by_locator(&self, locator: &Locator) -> TransportResult<Resource>;

	async fn get_content_by_locator(&self, locator: &Locator) -> TransportResult<Bytes>;

	async fn save_content(&self, locator: &Locator, content: Bytes) -> TransportResult<()>;

	async fn create_folder(&self, parent: &Resource, name: &str) -> TransportResult<Resource>;

	async fn create_file(
		&self,
		parent: &Resource,
		name: &str,
		content: Bytes,
	) -> TransportResult<Resource>;

	async fn rename(&self, resource: &Resource, new_name: &str) -> TransportResult<Resource>;

	async fn delete(&self, resource: &Resource) -> TransportResult<()>;

	/// Move `resource` into the container addressed by `destination`
	async fn move_to(
		&self,
		resource: &Resource,
		destination: &ResourceUri,
	) -> TransportResult<Resource>;

	async fn get_parent(&self, resource: &Resource) -> TransportResult<Option<Resource>>;

	async fn get_delegate_folder(
		&self,
		delegate: DelegateFolder,
	) -> TransportResult<Option<Resource>>;

	/// Create a reference to `resource` in the favorites folder
	async fn add_favorite(&self, resource: &Resource) -> TransportResult<Resource>;

	/// Remove the favorite for `resource`, which may be the reference itself
	async fn remove_favorite(&self, resource: &Resource) -> TransportResult<()>;
}
