use super::{ensure_valid_name, MutationEngine};
use crate::{domain::Resource, error::Result};

use tracing::{debug, warn};

impl MutationEngine {
	/// Rename `resource`, moving any open editor along with it.
	///
	/// Open editors are closed before the remote call. A declined close aborts
	/// the rename; a failed rename reopens them at the old locator.
	pub async fn rename(&self, resource: &Resource, new_name: &str) -> Result<Resource> {
		if resource.name == new_name {
			return Ok(resource.clone());
		}
		ensure_valid_name(new_name)?;

		let closed = self.close_open_editors(resource).await?;

		debug!(from = %resource.name, to = %new_name, "Renaming resource");
		match self.repository.rename(resource, new_name).await {
			Ok(renamed) => {
				self.reopen(&closed, &renamed).await;
				self.events.tree_changed();
				Ok(renamed)
			}
			Err(e) => {
				warn!(name = %resource.name, "Failed to rename: {e}");
				self.reopen(&closed, resource).await;
				Err(e.into())
			}
		}
	}
}
