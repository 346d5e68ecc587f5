//! The editor side of the world: open documents, reveal requests and
//! user-facing error notifications.

use crate::domain::Locator;

use async_trait::async_trait;
use tracing::{debug, error};

/// How a request to close an open editor ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
	Closed,
	/// The user kept the editor open, e.g. to keep unsaved changes
	Declined,
}

/// Capability the host editor provides to the core
#[async_trait]
pub trait EditorHost: Send + Sync {
	/// Whether a document with exactly this locator is open
	fn is_open(&self, locator: &Locator) -> bool;

	/// Close the editor showing `locator`, possibly after asking the user
	async fn close(&self, locator: &Locator) -> CloseOutcome;

	async fn open(&self, locator: &Locator);

	/// Ask the tree to reveal and select `locator`
	async fn reveal(&self, locator: &Locator);

	/// Show a single user-visible error message
	fn show_error(&self, message: &str);
}

/// Host with no editors at all, for running without a UI
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessHost;

#[async_trait]
impl EditorHost for HeadlessHost {
	fn is_open(&self, _locator: &Locator) -> bool {
		false
	}

	async fn close(&self, _locator: &Locator) -> CloseOutcome {
		CloseOutcome::Closed
	}

	async fn open(&self, locator: &Locator) {
		debug!(%locator, "No editor attached, ignoring open request");
	}

	async fn reveal(&self, locator: &Locator) {
		debug!(%locator, "No tree attached, ignoring reveal request");
	}

	fn show_error(&self, message: &str) {
		error!("{message}");
	}
}
