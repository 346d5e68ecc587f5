//! Application configuration management

use anyhow::{anyhow, Result};
use std::{fs, path::PathBuf};

pub mod app_config;

pub use app_config::ContentConfig;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "content.json";

/// Forward-only schema migration for persisted configuration
pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	fn migrate(&mut self) -> Result<()>;
}

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(target_os = "windows")]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("ContentNavigator");

	#[cfg(not(target_os = "windows"))]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("content-navigator");

	// Create directory if it doesn't exist
	fs::create_dir_all(&dir)?;

	Ok(dir)
}
