//! Drop reconciler
//!
//! Applies each item of a drop to the target independently. Resources
//! dragged within the tree are checked in a fixed order:
//!
//! 1. anything in the recycle bin is rejected,
//! 2. favorites (references) are rejected,
//! 3. a drop on the recycle bin recycles,
//! 4. a drop on the favorites folder adds a favorite,
//! 5. anything else moves into the target.
//!
//! Local paths are imported through the [`TransferOrchestrator`].

pub mod payload;

pub use payload::{DragPayload, DropPayload, RESOURCE_MIME_TYPE, URI_LIST_MIME_TYPE};

use super::{
	failure_message,
	files::{ensure_container, MutationEngine},
	transfer::{TransferOrchestrator, TransferReport},
	ItemFailure,
};
use crate::{
	domain::{Resource, ResourceKind},
	error::{ContentError, Result},
};

use std::path::Path;

use futures_concurrency::future::Join;
use sd_utils::display_name;
use tracing::{debug, info};

/// Items of a drop that did not make it
#[derive(Debug, Default)]
pub struct DropReport {
	pub failed: Vec<ItemFailure>,
}

impl DropReport {
	pub fn is_complete(&self) -> bool {
		self.failed.is_empty()
	}

	pub fn failed_names(&self) -> Vec<String> {
		self.failed.iter().map(|failure| failure.name.clone()).collect()
	}
}

#[derive(Clone)]
pub struct DropReconciler {
	mutations: MutationEngine,
	transfers: TransferOrchestrator,
}

impl DropReconciler {
	pub fn new(mutations: MutationEngine, transfers: TransferOrchestrator) -> Self {
		Self {
			mutations,
			transfers,
		}
	}

	/// Serialize a tree selection for the [`RESOURCE_MIME_TYPE`] channel
	pub fn handle_drag(&self, selection: &[Resource]) -> Result<String> {
		debug!(count = selection.len(), "Starting drag");
		DragPayload {
			resources: selection.to_vec(),
		}
		.to_json()
	}

	/// Apply every item of `payload` to `target` concurrently.
	///
	/// The tree is refreshed once when everything has settled, and all
	/// failures are reported to the host in a single message. Items the user
	/// cancelled count as failed but are not reported.
	pub async fn handle_drop(&self, target: &Resource, payload: &DropPayload) -> Result<DropReport> {
		ensure_container(target)?;

		let (resource_results, path_failures) = (
			payload
				.resources
				.iter()
				.map(|resource| async move {
					self.drop_resource(resource, target)
						.await
						.map_err(|e| ItemFailure::new(&resource.name, e))
				})
				.collect::<Vec<_>>()
				.join(),
			payload
				.paths
				.iter()
				.map(|path| self.drop_path(path, target))
				.collect::<Vec<_>>()
				.join(),
		)
			.join()
			.await;

		self.mutations.events().tree_changed();

		let failed = resource_results
			.into_iter()
			.filter_map(|res| res.err())
			.chain(path_failures.into_iter().flatten())
			.collect::<Vec<_>>();

		let reported = failed
			.iter()
			.filter(|failure| !matches!(failure.error, ContentError::UserAborted(_)))
			.map(|failure| failure.name.clone())
			.collect::<Vec<_>>();
		if !reported.is_empty() {
			self.mutations
				.host()
				.show_error(&failure_message("Unable to drop", &reported));
		}

		info!(
			target = %target.name,
			items = payload.resources.len() + payload.paths.len(),
			failed = failed.len(),
			"Finished drop"
		);

		Ok(DropReport { failed })
	}

	async fn drop_resource(&self, resource: &Resource, target: &Resource) -> Result<()> {
		if resource.is_in_recycle_bin() {
			return Err(ContentError::FileDragFromTrash(resource.name.clone()));
		}
		if resource.is_reference() {
			return Err(ContentError::FileDragFromFavorites(resource.name.clone()));
		}

		match target.kind {
			ResourceKind::TrashFolder => {
				self.mutations.recycle_without_refresh(resource).await?;
			}
			ResourceKind::FavoritesFolder => {
				self.mutations.add_favorite_without_refresh(resource).await?;
			}
			_ => {
				self.mutations.move_without_refresh(resource, target).await?;
			}
		}

		Ok(())
	}

	async fn drop_path(&self, path: &Path, target: &Resource) -> Vec<ItemFailure> {
		debug!(path = %path.display(), target = %target.name, "Importing dropped path");

		let report = TransferReport::default();
		self.transfers.import_path(path, target, &report).await;
		let failures = report.into_failures();
		if !failures.is_empty() {
			debug!(
				path = %display_name(path),
				count = failures.len(),
				"Dropped path imported partially"
			);
		}
		failures
	}
}
