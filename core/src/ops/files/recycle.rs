//! Recycle bin transitions: `Active -> Trashed -> Active`, and emptying the
//! bin for good.

use super::MutationEngine;
use crate::{
	domain::{DelegateFolder, LinkRelation, Resource},
	error::{ContentError, Result},
	ops::failure_message,
};

use futures_concurrency::future::Join;
use tracing::{debug, info, warn};

/// What recycling actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecycleOutcome {
	/// Moved into the recycle bin, carrying its `previousParent` link
	Recycled(Resource),
	/// The store has no recycle bin, so the resource was deleted
	Deleted,
}

impl MutationEngine {
	/// Move `resource` into the recycle bin, or delete it if the store has none.
	///
	/// Editors showing the resource are closed and stay closed. A document
	/// with the same id may already be open read-only from an earlier visit to
	/// the bin, so its read-only locator is announced as changed.
	pub async fn recycle(&self, resource: &Resource) -> Result<RecycleOutcome> {
		let outcome = self.recycle_without_refresh(resource).await?;
		self.events.tree_changed();
		Ok(outcome)
	}

	pub(crate) async fn recycle_without_refresh(&self, resource: &Resource) -> Result<RecycleOutcome> {
		let Some(trash) = self
			.repository
			.get_delegate_folder(DelegateFolder::RecycleBin)
			.await?
		else {
			debug!(name = %resource.name, "No recycle bin, deleting instead");
			self.delete_without_refresh(resource).await?;
			return Ok(RecycleOutcome::Deleted);
		};
		let destination = trash.self_uri().ok_or(ContentError::NoRecycleTarget)?;

		let previous = resource.locator(true);
		let closed = self.close_open_editors(resource).await?;

		debug!(name = %resource.name, "Recycling resource");
		match self.repository.move_to(resource, destination).await {
			Ok(recycled) => {
				self.events.content_changed(previous);
				Ok(RecycleOutcome::Recycled(recycled))
			}
			Err(e) => {
				warn!(name = %resource.name, "Failed to recycle: {e}");
				self.reopen(&closed, resource).await;
				Err(ContentError::move_rejected(&resource.name, e))
			}
		}
	}

	/// Move a recycled resource back to where it was recycled from
	pub async fn restore(&self, resource: &Resource) -> Result<Resource> {
		let previous_parent = resource
			.link(LinkRelation::PreviousParent)
			.ok_or_else(|| ContentError::NoPreviousParent(resource.name.clone()))?;

		let previous = resource.locator(true);
		let closed = self.close_open_editors(resource).await?;

		debug!(name = %resource.name, to = %previous_parent, "Restoring resource");
		match self.repository.move_to(resource, previous_parent).await {
			Ok(restored) => {
				self.events.content_changed(previous);
				self.events.tree_changed();
				Ok(restored)
			}
			Err(e) => {
				warn!(name = %resource.name, "Failed to restore: {e}");
				self.reopen(&closed, resource).await;
				Err(ContentError::move_rejected(&resource.name, e))
			}
		}
	}

	/// Delete everything in the recycle bin.
	///
	/// Every child is attempted. Returns how many were deleted, or
	/// `BatchIncomplete` naming the ones that were not.
	pub async fn empty_trash(&self) -> Result<usize> {
		let trash = self
			.repository
			.get_delegate_folder(DelegateFolder::RecycleBin)
			.await?
			.ok_or(ContentError::NoRecycleTarget)?;

		let children = self.repository.get_children(Some(&trash)).await?;
		if children.is_empty() {
			return Ok(0);
		}

		let results = children
			.iter()
			.map(|child| async move {
				self.delete_without_refresh(child)
					.await
					.map_err(|e| (child.name.clone(), e))
			})
			.collect::<Vec<_>>()
			.join()
			.await;

		self.events.tree_changed();

		let failed = results
			.into_iter()
			.filter_map(|res| match res {
				Ok(()) => None,
				Err((name, e)) => {
					warn!(%name, "Failed to delete from recycle bin: {e}");
					Some(name)
				}
			})
			.collect::<Vec<_>>();

		if failed.is_empty() {
			info!(count = children.len(), "Emptied recycle bin");
			Ok(children.len())
		} else {
			self.host
				.show_error(&failure_message("Unable to delete", &failed));
			Err(ContentError::BatchIncomplete { failed })
		}
	}
}
