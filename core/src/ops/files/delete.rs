use super::MutationEngine;
use crate::{domain::Resource, error::Result};

use tracing::{debug, warn};

impl MutationEngine {
	/// Permanently delete `resource`.
	///
	/// Deleting a reference removes the favorite, never its target.
	pub async fn delete(&self, resource: &Resource) -> Result<()> {
		self.delete_without_refresh(resource).await?;
		self.events.tree_changed();
		Ok(())
	}

	pub(crate) async fn delete_without_refresh(&self, resource: &Resource) -> Result<()> {
		if resource.is_reference() {
			return self.remove_favorite_without_refresh(resource).await;
		}

		let closed = self.close_open_editors(resource).await?;

		debug!(name = %resource.name, "Deleting resource");
		if let Err(e) = self.repository.delete(resource).await {
			warn!(name = %resource.name, "Failed to delete: {e}");
			self.reopen(&closed, resource).await;
			return Err(e.into());
		}

		Ok(())
	}
}
