//! Local file-system capability used by import and export
//!
//! Injected rather than called directly so hosts can substitute their own
//! file system (a sandbox, a virtual workspace) and tests can use a temporary
//! directory.

pub mod local;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use sd_utils::error::FileIOError;

pub use local::TokioFs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEntryKind {
	File,
	Directory,
	/// Anything else: symlinks that could not be followed, sockets, devices
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
	pub name: String,
	pub path: PathBuf,
	pub kind: LocalEntryKind,
}

#[async_trait]
pub trait LocalFs: Send + Sync {
	/// Kind of the entry at `path`, following symlinks
	async fn stat(&self, path: &Path) -> Result<LocalEntryKind, FileIOError>;

	async fn read(&self, path: &Path) -> Result<Bytes, FileIOError>;

	async fn write(&self, path: &Path, data: Bytes) -> Result<(), FileIOError>;

	/// Create `path` and any missing parents; existing directories are fine
	async fn create_dir(&self, path: &Path) -> Result<(), FileIOError>;

	async fn read_dir(&self, path: &Path) -> Result<Vec<LocalEntry>, FileIOError>;
}
