//! Tree change notifier
//!
//! A single broadcast point for everything the UI layer has to re-query
//! after a mutation. Any component may emit; subscribers are expected to
//! re-fetch children (for [`Event::TreeChanged`]) or reload a document
//! (for [`Event::ContentChanged`]).

use crate::domain::Locator;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Default buffer size of the notifier channel
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all_fields = "snake_case")]
pub enum Event {
	/// The shape of the tree changed; consumers re-fetch from the root or
	/// whichever node they are showing
	TreeChanged,
	/// The document backing `locator` changed
	ContentChanged { locator: Locator },
}

/// Event bus for broadcasting tree changes
#[derive(Debug, Clone)]
pub struct EventBus {
	sender: broadcast::Sender<Event>,
}

impl EventBus {
	/// Create a new event bus with specified capacity
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity.max(1));
		Self { sender }
	}

	/// Emit an event
	pub fn emit(&self, event: Event) {
		trace!(kind = event.as_ref(), "Emitting event");
		// Ignore send errors (no receivers)
		let _ = self.sender.send(event);
	}

	pub fn tree_changed(&self) {
		self.emit(Event::TreeChanged);
	}

	pub fn content_changed(&self, locator: Locator) {
		self.emit(Event::ContentChanged { locator });
	}

	/// Subscribe to events
	pub fn subscribe(&self) -> EventSubscriber {
		EventSubscriber {
			receiver: self.sender.subscribe(),
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_EVENT_CAPACITY)
	}
}

/// Event subscriber for receiving events
#[derive(Debug)]
pub struct EventSubscriber {
	receiver: broadcast::Receiver<Event>,
}

impl EventSubscriber {
	/// Receive the next event
	pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
		self.receiver.recv().await
	}

	/// Try to receive an event without blocking
	pub fn try_recv(&mut self) -> Result<Event, broadcast::error::TryRecvError> {
		self.receiver.try_recv()
	}

	/// Everything buffered right now, without waiting for more
	pub fn drain(&mut self) -> Vec<Event> {
		let mut events = Vec::new();
		loop {
			match self.receiver.try_recv() {
				Ok(event) => events.push(event),
				Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
				Err(_) => break,
			}
		}
		events
	}

	/// Filter events by type using a closure
	pub async fn recv_filtered<F>(&mut self, filter: F) -> Result<Event, broadcast::error::RecvError>
	where
		F: Fn(&Event) -> bool,
	{
		loop {
			let event = self.recv().await?;
			if filter(&event) {
				return Ok(event);
			}
		}
	}
}
