//! Mutation engine - every state transition of a single resource
//!
//! Operations that change what an open editor points at (rename, delete,
//! recycle, restore) first close that editor. If the user declines, the
//! operation returns [`ContentError::UserAborted`] without any remote call.

mod create;
mod delete;
mod favorite;
mod recycle;
mod relocate;
mod rename;
pub mod validation;

pub use recycle::RecycleOutcome;

use crate::{
	domain::{Locator, Resource},
	error::{ContentError, Result},
	infra::{
		event::EventBus,
		host::{CloseOutcome, EditorHost},
	},
	repository::ContentRepository,
};

use std::sync::Arc;

use tracing::{debug, info};

/// Executes mutations against the content repository and announces them
#[derive(Clone)]
pub struct MutationEngine {
	repository: Arc<dyn ContentRepository>,
	host: Arc<dyn EditorHost>,
	events: Arc<EventBus>,
}

impl MutationEngine {
	pub fn new(
		repository: Arc<dyn ContentRepository>,
		host: Arc<dyn EditorHost>,
		events: Arc<EventBus>,
	) -> Self {
		Self {
			repository,
			host,
			events,
		}
	}

	pub fn repository(&self) -> &Arc<dyn ContentRepository> {
		&self.repository
	}

	pub fn host(&self) -> &Arc<dyn EditorHost> {
		&self.host
	}

	pub fn events(&self) -> &Arc<EventBus> {
		&self.events
	}

	/// Close every editor showing `resource`, read-write before read-only.
	///
	/// Returns the locators that were closed. If the user declines any close,
	/// the editors already closed are reopened and `UserAborted` is returned.
	async fn close_open_editors(&self, resource: &Resource) -> Result<Vec<Locator>> {
		let mut closed = Vec::new();

		for read_only in [false, true] {
			let locator = resource.locator(read_only);
			if !self.host.is_open(&locator) {
				continue;
			}

			match self.host.close(&locator).await {
				CloseOutcome::Closed => {
					debug!(%locator, "Closed editor before mutation");
					closed.push(locator);
				}
				CloseOutcome::Declined => {
					info!(%locator, "Editor close declined, aborting operation");
					for locator in &closed {
						self.host.open(locator).await;
					}
					return Err(ContentError::UserAborted(resource.name.clone()));
				}
			}
		}

		Ok(closed)
	}

	/// Reopen previously closed editors at `resource`'s current locators
	async fn reopen(&self, closed: &[Locator], resource: &Resource) {
		for locator in closed {
			self.host
				.open(&resource.locator(locator.is_read_only()))
				.await;
		}
	}
}

pub(crate) fn ensure_container(resource: &Resource) -> Result<()> {
	if resource.is_container() {
		Ok(())
	} else {
		Err(ContentError::InvalidTarget(resource.name.clone()))
	}
}

pub(crate) fn ensure_valid_name(name: &str) -> Result<()> {
	validation::validate_name(name).map_err(|source| ContentError::InvalidName {
		name: name.to_string(),
		source,
	})
}
