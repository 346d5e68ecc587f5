//! Content navigator core
//!
//! Presents a remote content store (folders, files, favorites and a recycle
//! bin) as a tree an editor can browse and rearrange. The store itself sits
//! behind [`ContentRepository`]; the editor behind [`EditorHost`].

#![warn(
	clippy::all,
	clippy::unwrap_used,
	clippy::dbg_macro,
	unused_qualifications,
	rust_2018_idioms
)]

pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod infra;
pub mod ops;
pub mod repository;

use crate::{
	config::ContentConfig,
	domain::{Locator, Resource},
	error::Result,
	fs::{LocalFs, TokioFs},
	infra::{
		event::{EventBus, EventSubscriber},
		host::{EditorHost, HeadlessHost},
	},
	ops::{
		drop::DropReconciler, files::MutationEngine, query::TreeQuery,
		transfer::TransferOrchestrator,
	},
	repository::ContentRepository,
};

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use error::ContentError;

/// Every component of the navigator, wired to one repository, one host and
/// one tree change notifier
#[derive(Clone)]
pub struct ContentCore {
	config: Arc<ContentConfig>,
	repository: Arc<dyn ContentRepository>,
	events: Arc<EventBus>,
	query: TreeQuery,
	mutations: MutationEngine,
	transfers: TransferOrchestrator,
	drops: DropReconciler,
}

impl ContentCore {
	pub fn new(
		config: ContentConfig,
		repository: Arc<dyn ContentRepository>,
		host: Arc<dyn EditorHost>,
		fs: Arc<dyn LocalFs>,
	) -> Self {
		let events = Arc::new(EventBus::new(config.event_capacity));

		let query = TreeQuery::new(repository.clone(), host.clone(), events.clone());
		let mutations = MutationEngine::new(repository.clone(), host, events.clone());
		let transfers = TransferOrchestrator::new(mutations.clone(), fs);
		let drops = DropReconciler::new(mutations.clone(), transfers.clone());

		Self {
			config: Arc::new(config),
			repository,
			events,
			query,
			mutations,
			transfers,
			drops,
		}
	}

	/// Core without an editor attached, using the real local file system
	pub fn headless(config: ContentConfig, repository: Arc<dyn ContentRepository>) -> Self {
		Self::new(config, repository, Arc::new(HeadlessHost), Arc::new(TokioFs))
	}

	/// Connect the repository to the configured endpoint and open a session
	pub async fn connect(&self) -> Result<String> {
		let endpoint = &self.config.endpoint;
		self.repository.connect(endpoint).await?;
		let session_id = self.repository.acquire_session_id().await?;

		info!(%endpoint, %session_id, "Connected to content server");
		Ok(session_id)
	}

	pub fn config(&self) -> &ContentConfig {
		&self.config
	}

	/// Listen to tree and content change notifications
	pub fn subscribe(&self) -> EventSubscriber {
		self.events.subscribe()
	}

	pub fn events(&self) -> &Arc<EventBus> {
		&self.events
	}

	pub fn query(&self) -> &TreeQuery {
		&self.query
	}

	pub fn mutations(&self) -> &MutationEngine {
		&self.mutations
	}

	pub fn transfers(&self) -> &TransferOrchestrator {
		&self.transfers
	}

	pub fn drops(&self) -> &DropReconciler {
		&self.drops
	}

	pub async fn children(&self, parent: Option<&Resource>) -> Result<Vec<Resource>> {
		self.query.children(parent).await
	}

	pub async fn parent(&self, resource: &Resource) -> Result<Option<Resource>> {
		self.query.parent(resource).await
	}

	pub async fn resource_by_locator(&self, locator: &Locator) -> Result<Resource> {
		self.query.resource_by_locator(locator).await
	}

	pub async fn content_by_locator(&self, locator: &Locator) -> Result<Bytes> {
		self.query.content_by_locator(locator).await
	}

	pub async fn save_content(&self, locator: &Locator, content: Bytes) -> Result<()> {
		self.query.save_content(locator, content).await
	}

	pub async fn reveal(&self, locator: &Locator) {
		self.query.reveal(locator).await;
	}
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice returns an
/// error instead of replacing the first subscriber.
pub fn init_logging(config: &ContentConfig) -> anyhow::Result<()> {
	let filter =
		EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_target(true))
		.try_init()?;

	info!(log_level = %config.log_level, "Logging initialized");
	Ok(())
}
