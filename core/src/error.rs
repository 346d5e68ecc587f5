//! Error types for tree navigation and mutation

use crate::{domain::ResourceUri, ops::files::validation::NameValidationError};

use sd_utils::error::FileIOError;
use thiserror::Error;

/// Failure reported by a content repository.
///
/// The core never decodes these beyond logging them; they are carried to
/// callers as [`ContentError::Transport`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
	#[error("no resource at {0}")]
	NotFound(String),
	#[error("request rejected: {0}")]
	Rejected(String),
	#[error("a resource named '{0}' already exists there")]
	Conflict(String),
	#[error("not connected to the content server")]
	Disconnected,
}

/// Errors of every tree operation
#[derive(Debug, Error)]
pub enum ContentError {
	/// Mutation attempted against something that is not a container
	#[error("'{0}' is not a folder")]
	InvalidTarget(String),

	#[error("the recycle bin cannot be resolved")]
	NoRecycleTarget,

	#[error("'{0}' has no previous parent to restore to")]
	NoPreviousParent(String),

	#[error("could not move '{name}': {reason}")]
	MoveRejected { name: String, reason: String },

	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The user declined to close an editor showing the resource
	#[error("operation on '{0}' was cancelled")]
	UserAborted(String),

	#[error("'{0}' cannot be dragged out of the recycle bin")]
	FileDragFromTrash(String),

	#[error("'{0}' is a favorite and cannot be dragged")]
	FileDragFromFavorites(String),

	#[error("invalid name '{name}': {source}")]
	InvalidName {
		name: String,
		#[source]
		source: NameValidationError,
	},

	#[error("not a local file URI: {0}")]
	InvalidUri(String),

	#[error(transparent)]
	LocalIo(#[from] FileIOError),

	#[error("malformed drop payload: {0}")]
	Payload(#[from] serde_json::Error),

	/// One or more items of a batch failed, named here
	#[error("failed: {}", failed.join(", "))]
	BatchIncomplete { failed: Vec<String> },

	#[error("{0} is not supported on {1}")]
	Unsupported(&'static str, String),
}

impl ContentError {
	pub(crate) fn move_rejected(name: impl Into<String>, reason: impl ToString) -> Self {
		Self::MoveRejected {
			name: name.into(),
			reason: reason.to_string(),
		}
	}
}

impl From<&ResourceUri> for TransportError {
	fn from(uri: &ResourceUri) -> Self {
		Self::NotFound(uri.to_string())
	}
}

pub type Result<T> = std::result::Result<T, ContentError>;
