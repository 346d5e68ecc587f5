//! Local filesystem implementation backed by `tokio::fs`

use super::{LocalEntry, LocalEntryKind, LocalFs};

use std::{fs::Metadata, path::Path};

use async_trait::async_trait;
use bytes::Bytes;
use sd_utils::error::FileIOError;
use tokio::fs;
use tracing::{debug, warn};

/// Thin wrapper around `tokio::fs` with no additional logic
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFs;

fn kind_of(metadata: &Metadata) -> LocalEntryKind {
	if metadata.is_dir() {
		LocalEntryKind::Directory
	} else if metadata.is_file() {
		LocalEntryKind::File
	} else {
		LocalEntryKind::Other
	}
}

#[async_trait]
impl LocalFs for TokioFs {
	async fn stat(&self, path: &Path) -> Result<LocalEntryKind, FileIOError> {
		let metadata = fs::metadata(path)
			.await
			.map_err(|e| FileIOError::from((path, e)))?;

		Ok(kind_of(&metadata))
	}

	async fn read(&self, path: &Path) -> Result<Bytes, FileIOError> {
		debug!("TokioFs::read: {}", path.display());

		fs::read(path)
			.await
			.map(Bytes::from)
			.map_err(|e| FileIOError::from((path, e, "reading local file")))
	}

	async fn write(&self, path: &Path, data: Bytes) -> Result<(), FileIOError> {
		debug!("TokioFs::write: {} ({} bytes)", path.display(), data.len());

		fs::write(path, data)
			.await
			.map_err(|e| FileIOError::from((path, e, "writing local file")))
	}

	async fn create_dir(&self, path: &Path) -> Result<(), FileIOError> {
		debug!("TokioFs::create_dir: {}", path.display());

		fs::create_dir_all(path)
			.await
			.map_err(|e| FileIOError::from((path, e, "creating local directory")))
	}

	async fn read_dir(&self, path: &Path) -> Result<Vec<LocalEntry>, FileIOError> {
		debug!("TokioFs::read_dir: {}", path.display());

		let mut entries = Vec::new();
		let mut dir = fs::read_dir(path)
			.await
			.map_err(|e| FileIOError::from((path, e)))?;

		while let Some(entry) = dir
			.next_entry()
			.await
			.map_err(|e| FileIOError::from((path, e)))?
		{
			let entry_path = entry.path();
			// Follow symlinks so a linked directory imports as a directory
			let metadata = match fs::metadata(&entry_path).await {
				Ok(m) => m,
				Err(e) => {
					warn!("Skipping unreadable entry {}: {e}", entry_path.display());
					continue;
				}
			};

			entries.push(LocalEntry {
				name: entry.file_name().to_string_lossy().into_owned(),
				kind: kind_of(&metadata),
				path: entry_path,
			});
		}

		entries.sort_by(|a, b| a.name.cmp(&b.name));

		Ok(entries)
	}
}
