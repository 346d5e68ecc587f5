//! Recursive transfers between the remote tree and the local file system
//!
//! Sibling items are processed concurrently on the calling task and never
//! abort each other. Failures are collected in a [`TransferReport`] and
//! surfaced once per batch.

mod download;
mod upload;

use super::{failure_message, files::MutationEngine, ItemFailure};
use crate::{
	domain::Resource,
	error::{ContentError, Result},
	fs::LocalFs,
};

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc, Mutex, PoisonError,
};

use tracing::warn;

#[derive(Clone)]
pub struct TransferOrchestrator {
	mutations: MutationEngine,
	fs: Arc<dyn LocalFs>,
}

impl TransferOrchestrator {
	pub fn new(mutations: MutationEngine, fs: Arc<dyn LocalFs>) -> Self {
		Self { mutations, fs }
	}

	/// Turn a finished report into the batch result, notifying the host once
	fn finish(&self, report: TransferReport, action: &str) -> Result<()> {
		if report.succeeded() {
			return Ok(());
		}

		let failed = report
			.into_failures()
			.into_iter()
			.map(|failure| failure.name)
			.collect::<Vec<_>>();
		self.mutations
			.host()
			.show_error(&failure_message(action, &failed));

		Err(ContentError::BatchIncomplete { failed })
	}
}

/// Outcome of a concurrent batch.
///
/// The success flag only ever goes from `true` to `false`, so a sibling that
/// finishes later can never hide an earlier failure.
#[derive(Debug)]
pub(crate) struct TransferReport {
	success: AtomicBool,
	failures: Mutex<Vec<ItemFailure>>,
}

impl Default for TransferReport {
	fn default() -> Self {
		Self {
			success: AtomicBool::new(true),
			failures: Mutex::default(),
		}
	}
}

impl TransferReport {
	pub(crate) fn record_failure(&self, name: impl Into<String>, error: ContentError) {
		let name = name.into();
		warn!(%name, "Transfer failed: {error}");

		self.success.store(false, Ordering::Release);
		self.failures
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(ItemFailure::new(name, error));
	}

	pub(crate) fn succeeded(&self) -> bool {
		self.success.load(Ordering::Acquire)
	}

	pub(crate) fn into_failures(self) -> Vec<ItemFailure> {
		self.failures
			.into_inner()
			.unwrap_or_else(PoisonError::into_inner)
	}
}

/// The selections whose parent is not selected as well.
///
/// Exporting these with `all_selections` as context reproduces every
/// selected subtree exactly once.
pub fn covering_set(all_selections: &[Resource]) -> Vec<Resource> {
	all_selections
		.iter()
		.filter(|candidate| {
			!all_selections
				.iter()
				.any(|other| candidate.is_child_of(other))
		})
		.cloned()
		.collect()
}
