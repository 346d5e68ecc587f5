//! Folder and file creation

use super::{ensure_container, ensure_valid_name, MutationEngine};
use crate::{domain::Resource, error::Result};

use bytes::Bytes;
use tracing::{debug, warn};

impl MutationEngine {
	/// Create a folder named `name` inside `parent`
	pub async fn create_folder(&self, parent: &Resource, name: &str) -> Result<Resource> {
		let folder = self.create_folder_without_refresh(parent, name).await?;
		self.events.tree_changed();
		Ok(folder)
	}

	/// Create a file inside `parent`, empty unless `content` is given
	pub async fn create_file(
		&self,
		parent: &Resource,
		name: &str,
		content: Option<Bytes>,
	) -> Result<Resource> {
		let file = self
			.create_file_without_refresh(parent, name, content.unwrap_or_default())
			.await?;
		self.events.tree_changed();
		Ok(file)
	}

	pub(crate) async fn create_folder_without_refresh(
		&self,
		parent: &Resource,
		name: &str,
	) -> Result<Resource> {
		ensure_container(parent)?;
		ensure_valid_name(name)?;

		debug!(parent = %parent.name, %name, "Creating folder");
		self.repository
			.create_folder(parent, name)
			.await
			.map_err(|e| {
				warn!(parent = %parent.name, %name, "Failed to create folder: {e}");
				e.into()
			})
	}

	pub(crate) async fn create_file_without_refresh(
		&self,
		parent: &Resource,
		name: &str,
		content: Bytes,
	) -> Result<Resource> {
		ensure_container(parent)?;
		ensure_valid_name(name)?;

		debug!(parent = %parent.name, %name, size = content.len(), "Creating file");
		self.repository
			.create_file(parent, name, content)
			.await
			.map_err(|e| {
				warn!(parent = %parent.name, %name, "Failed to create file: {e}");
				e.into()
			})
	}
}
