//! Read side of the tree as the UI layer sees it

use crate::{
	domain::{Locator, Resource},
	error::{ContentError, Result},
	infra::{event::EventBus, host::EditorHost},
	repository::ContentRepository,
};

use std::{cmp::Ordering, sync::Arc};

use bytes::Bytes;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TreeQuery {
	repository: Arc<dyn ContentRepository>,
	host: Arc<dyn EditorHost>,
	events: Arc<EventBus>,
}

/// Containers before everything else, then case-insensitive by name
fn tree_order(a: &Resource, b: &Resource) -> Ordering {
	b.is_container()
		.cmp(&a.is_container())
		.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
		.then_with(|| a.name.cmp(&b.name))
}

impl TreeQuery {
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

	/// Children of `parent` in display order, or the top level when `None`
	pub async fn children(&self, parent: Option<&Resource>) -> Result<Vec<Resource>> {
		if let Some(parent) = parent {
			if !parent.is_container() {
				return Err(ContentError::InvalidTarget(parent.name.clone()));
			}
		}

		let mut children = self.repository.get_children(parent).await?;
		children.sort_by(tree_order);
		Ok(children)
	}

	pub async fn parent(&self, resource: &Resource) -> Result<Option<Resource>> {
		Ok(self.repository.get_parent(resource).await?)
	}

	pub async fn resource_by_locator(&self, locator: &Locator) -> Result<Resource> {
		Ok(self.repository.get_resource_by_locator(locator).await?)
	}

	pub async fn content_by_locator(&self, locator: &Locator) -> Result<Bytes> {
		Ok(self.repository.get_content_by_locator(locator).await?)
	}

	/// Store new content for the document at `locator` and announce it
	pub async fn save_content(&self, locator: &Locator, content: Bytes) -> Result<()> {
		if locator.is_read_only() {
			return Err(ContentError::Unsupported(
				"saving",
				format!("read-only document {locator}"),
			));
		}

		debug!(%locator, size = content.len(), "Saving content");
		self.repository
			.save_content(locator, content)
			.await
			.map_err(|e| {
				warn!(%locator, "Failed to save content: {e}");
				ContentError::from(e)
			})?;

		self.events.content_changed(locator.clone());
		Ok(())
	}

	/// Ask the tree to reveal and select `locator`
	pub async fn reveal(&self, locator: &Locator) {
		self.host.reveal(locator).await;
	}
}
