use super::MutationEngine;
use crate::{domain::Resource, error::Result};

use tracing::{debug, warn};

impl MutationEngine {
	/// Create a favorite pointing at `resource`
	pub async fn add_favorite(&self, resource: &Resource) -> Result<Resource> {
		let reference = self.add_favorite_without_refresh(resource).await?;
		self.events.tree_changed();
		Ok(reference)
	}

	/// Remove the favorite of `resource`; `resource` may be the reference itself
	pub async fn remove_favorite(&self, resource: &Resource) -> Result<()> {
		self.remove_favorite_without_refresh(resource).await?;
		self.events.tree_changed();
		Ok(())
	}

	pub(crate) async fn add_favorite_without_refresh(&self, resource: &Resource) -> Result<Resource> {
		debug!(name = %resource.name, "Adding favorite");
		self.repository.add_favorite(resource).await.map_err(|e| {
			warn!(name = %resource.name, "Failed to add favorite: {e}");
			e.into()
		})
	}

	pub(crate) async fn remove_favorite_without_refresh(&self, resource: &Resource) -> Result<()> {
		debug!(name = %resource.name, "Removing favorite");
		self.repository.remove_favorite(resource).await.map_err(|e| {
			warn!(name = %resource.name, "Failed to remove favorite: {e}");
			e.into()
		})
	}
}
