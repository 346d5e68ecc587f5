//! Navigator configuration

use super::{default_data_dir, Migrate, CONFIG_FILE_NAME};
use crate::infra::event::DEFAULT_EVENT_CAPACITY;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tracing::{info, warn};
use url::Url;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/";

/// Main configuration of the content navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	#[serde(skip)]
	pub data_dir: PathBuf,

	/// Content server the repository connects to
	pub endpoint: Url,

	/// Default tracing directive, `RUST_LOG` takes precedence
	pub log_level: String,

	/// Buffer size of the tree change notifier
	#[serde(default = "default_event_capacity")]
	pub event_capacity: usize,
}

const fn default_event_capacity() -> usize {
	DEFAULT_EVENT_CAPACITY
}

impl ContentConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)
				.with_context(|| format!("reading {}", config_path.display()))?;
			let mut config: Self = serde_json::from_str(&json)
				.with_context(|| format!("parsing {}", config_path.display()))?;
			config.data_dir = data_dir.to_path_buf();

			// Apply migrations if needed
			if config.current_version() < Self::target_version() {
				info!(
					"Migrating config from v{} to v{}",
					config.version,
					Self::target_version()
				);
				config.migrate()?;
				config.save()?;
			} else if config.current_version() > Self::target_version() {
				return Err(anyhow!(
					"Config version {} is newer than supported version {}",
					config.version,
					Self::target_version()
				));
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		}
	}

	/// Load or create configuration
	pub fn load_or_create(data_dir: &Path) -> Result<Self> {
		Self::load_from(data_dir).or_else(|e| {
			warn!("Discarding unreadable config: {e:#}");
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		})
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
			log_level: "info".to_string(),
			event_capacity: DEFAULT_EVENT_CAPACITY,
		}
	}

	#[must_use]
	pub fn with_endpoint(mut self, endpoint: Url) -> Self {
		self.endpoint = endpoint;
		self
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		// Ensure directory exists
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}
}

impl Default for ContentConfig {
	fn default() -> Self {
		let data_dir = default_data_dir().unwrap_or_else(|_| PathBuf::from("."));
		Self::default_with_dir(data_dir)
	}
}

impl Migrate for ContentConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		2 // Current schema version
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 | 1 => {
				// v2 introduced a configurable notifier buffer
				if self.event_capacity == 0 {
					self.event_capacity = DEFAULT_EVENT_CAPACITY;
				}
				self.version = 2;
				Ok(())
			}
			2 => Ok(()), // Already at target version
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
