use super::{TransferOrchestrator, TransferReport};
use crate::{
	domain::Resource,
	error::Result,
	ops::files::ensure_valid_name,
};

use std::path::Path;

use futures::{future::BoxFuture, FutureExt};
use futures_concurrency::future::Join;
use tracing::{debug, info};

impl TransferOrchestrator {
	/// Export `selections` below `destination`.
	///
	/// A selected folder exports only those of its children that appear in
	/// `all_selections`. When none of them do, its children are fetched and
	/// all of them are exported.
	pub async fn download_selections(
		&self,
		selections: &[Resource],
		all_selections: &[Resource],
		destination: &Path,
	) -> Result<()> {
		self.fs.create_dir(destination).await?;

		let report = TransferReport::default();
		selections
			.iter()
			.map(|item| self.export_item(item, all_selections, destination, &report))
			.collect::<Vec<_>>()
			.join()
			.await;

		info!(
			count = selections.len(),
			destination = %destination.display(),
			"Finished download"
		);
		self.finish(report, "Unable to download")
	}

	/// Export every selected subtree exactly once
	pub async fn download(&self, all_selections: &[Resource], destination: &Path) -> Result<()> {
		let roots = super::covering_set(all_selections);
		self.download_selections(&roots, all_selections, destination)
			.await
	}

	async fn effective_children(
		&self,
		container: &Resource,
		all_selections: &[Resource],
	) -> Result<Vec<Resource>> {
		let selected = all_selections
			.iter()
			.filter(|candidate| candidate.is_child_of(container))
			.cloned()
			.collect::<Vec<_>>();

		if !selected.is_empty() {
			return Ok(selected);
		}

		Ok(self
			.mutations
			.repository()
			.get_children(Some(container))
			.await?)
	}

	fn export_item<'a>(
		&'a self,
		item: &'a Resource,
		all_selections: &'a [Resource],
		directory: &'a Path,
		report: &'a TransferReport,
	) -> BoxFuture<'a, ()> {
		async move {
			if item.is_reference() {
				debug!(name = %item.name, "Skipping favorite reference during export");
				return;
			}
			// Remote names end up as path components
			if let Err(e) = ensure_valid_name(&item.name) {
				report.record_failure(&item.name, e);
				return;
			}

			let path = directory.join(&item.name);

			if !item.is_container() {
				if let Err(e) = self.export_file(item, &path).await {
					report.record_failure(&item.name, e);
				}
				return;
			}

			if let Err(e) = self.fs.create_dir(&path).await {
				report.record_failure(&item.name, e.into());
				return;
			}

			let children = match self.effective_children(item, all_selections).await {
				Ok(children) => children,
				Err(e) => {
					report.record_failure(&item.name, e);
					return;
				}
			};

			children
				.iter()
				.map(|child| self.export_item(child, all_selections, &path, report))
				.collect::<Vec<_>>()
				.join()
				.await;
		}
		.boxed()
	}

	async fn export_file(&self, file: &Resource, path: &Path) -> Result<()> {
		debug!(name = %file.name, path = %path.display(), "Exporting file");
		let content = self
			.mutations
			.repository()
			.get_content_by_locator(&file.locator(false))
			.await?;

		Ok(self.fs.write(path, content).await?)
	}
}
