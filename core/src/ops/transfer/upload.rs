use super::{TransferOrchestrator, TransferReport};
use crate::{
	domain::Resource,
	error::{ContentError, Result},
	fs::LocalEntryKind,
	ops::files::ensure_container,
};

use std::path::{Path, PathBuf};

use futures::{future::BoxFuture, FutureExt};
use futures_concurrency::future::Join;
use sd_utils::display_name;
use tracing::{debug, info};

impl TransferOrchestrator {
	/// Recreate the local directory `source` as a new folder inside `target`
	pub async fn import_folder(&self, source: &Path, target: &Resource) -> Result<()> {
		ensure_container(target)?;

		let report = TransferReport::default();
		self.import_directory(source, target, &report).await;
		self.mutations.events().tree_changed();

		info!(source = %source.display(), target = %target.name, "Finished folder import");
		self.finish(report, "Unable to import")
	}

	/// Upload local files and directories into `target`, all at once
	pub async fn upload_paths(&self, target: &Resource, paths: &[PathBuf]) -> Result<()> {
		ensure_container(target)?;

		let report = TransferReport::default();
		paths
			.iter()
			.map(|path| self.import_path(path, target, &report))
			.collect::<Vec<_>>()
			.join()
			.await;
		self.mutations.events().tree_changed();

		info!(count = paths.len(), target = %target.name, "Finished upload");
		self.finish(report, "Unable to upload")
	}

	/// Import one local path, whatever its kind, recording failures in `report`
	pub(crate) async fn import_path(&self, path: &Path, target: &Resource, report: &TransferReport) {
		match self.fs.stat(path).await {
			Ok(LocalEntryKind::Directory) => self.import_directory(path, target, report).await,
			Ok(LocalEntryKind::File) => self.import_file(path, target, report).await,
			Ok(LocalEntryKind::Other) => report.record_failure(
				display_name(path),
				ContentError::Unsupported("uploading", path.display().to_string()),
			),
			Err(e) => report.record_failure(display_name(path), e.into()),
		}
	}

	/// The remote folder is created before anything is uploaded into it. If
	/// that fails the whole branch is skipped and only the folder is reported.
	pub(crate) fn import_directory<'a>(
		&'a self,
		directory: &'a Path,
		target: &'a Resource,
		report: &'a TransferReport,
	) -> BoxFuture<'a, ()> {
		async move {
			let name = display_name(directory);

			let folder = match self
				.mutations
				.create_folder_without_refresh(target, &name)
				.await
			{
				Ok(folder) => folder,
				Err(e) => {
					report.record_failure(name, e);
					return;
				}
			};

			let entries = match self.fs.read_dir(directory).await {
				Ok(entries) => entries,
				Err(e) => {
					report.record_failure(name, e.into());
					return;
				}
			};

			debug!(%name, count = entries.len(), "Importing directory");

			let folder = &folder;
			entries
				.iter()
				.map(|entry| async move {
					match entry.kind {
						LocalEntryKind::Directory => {
							self.import_directory(&entry.path, folder, report).await;
						}
						LocalEntryKind::File => {
							self.import_file(&entry.path, folder, report).await;
						}
						LocalEntryKind::Other => {
							debug!(path = %entry.path.display(), "Skipping special file");
						}
					}
				})
				.collect::<Vec<_>>()
				.join()
				.await;
		}
		.boxed()
	}

	pub(crate) async fn import_file(&self, path: &Path, target: &Resource, report: &TransferReport) {
		let name = display_name(path);

		let content = match self.fs.read(path).await {
			Ok(content) => content,
			Err(e) => {
				report.record_failure(name, e.into());
				return;
			}
		};

		if let Err(e) = self
			.mutations
			.create_file_without_refresh(target, &name, content)
			.await
		{
			report.record_failure(name, e);
		}
	}
}
