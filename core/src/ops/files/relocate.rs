use super::MutationEngine;
use crate::{
	domain::{Resource, ResourceUri},
	error::{ContentError, Result},
};

use tracing::{debug, warn};

impl MutationEngine {
	/// Move `resource` into `target`.
	///
	/// The locator of a moved resource does not change, so open editors stay
	/// as they are.
	pub async fn move_resource(&self, resource: &Resource, target: &Resource) -> Result<Resource> {
		let moved = self.move_without_refresh(resource, target).await?;
		self.events.tree_changed();
		Ok(moved)
	}

	/// Move `resource` into the container addressed by `destination`
	pub async fn move_to(&self, resource: &Resource, destination: &ResourceUri) -> Result<Resource> {
		let target = self
			.repository
			.get_resource_by_uri(destination)
			.await
			.map_err(|e| ContentError::move_rejected(&resource.name, e))?;

		self.move_resource(resource, &target).await
	}

	pub(crate) async fn move_without_refresh(
		&self,
		resource: &Resource,
		target: &Resource,
	) -> Result<Resource> {
		if !target.is_container() {
			return Err(ContentError::move_rejected(
				&resource.name,
				format!("'{}' is not a folder", target.name),
			));
		}
		let destination = target.self_uri().ok_or_else(|| {
			ContentError::move_rejected(&resource.name, format!("'{}' has no address", target.name))
		})?;

		debug!(name = %resource.name, to = %target.name, "Moving resource");
		self.repository
			.move_to(resource, destination)
			.await
			.map_err(|e| {
				warn!(name = %resource.name, to = %target.name, "Failed to move: {e}");
				ContentError::move_rejected(&resource.name, e)
			})
	}
}
