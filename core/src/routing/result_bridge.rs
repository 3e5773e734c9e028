//! Awaitable per-route results.
//!
//! Each requested pattern owns a single-slot, latest-value-wins cell. The
//! dispatcher overwrites it after every successful handler run; waiters are
//! woken by the overwrite. Nothing is queued.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use arcstr::ArcStr;
use tokio::sync::watch;
use tracing::trace;

type ResultSlot<R> = Arc<watch::Sender<Option<R>>>;

/// Handle resolving to the next result produced by one route.
///
/// Each handle tracks whether it has consumed the current value. A new handle
/// starts as "consumed", so results published before it existed are never
/// observed. A clone starts with the state of the original at clone time.
#[derive(Debug)]
pub struct ResultHandle<R> {
	pattern: ArcStr,
	// Keeps the sender alive so the receiver never observes a closed slot
	_slot: ResultSlot<R>,
	receiver: watch::Receiver<Option<R>>,
}

impl<R> Clone for ResultHandle<R> {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			_slot: Arc::clone(&self._slot),
			receiver: self.receiver.clone(),
		}
	}
}

impl<R: Clone> ResultHandle<R> {
	/// Route pattern this handle observes.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// True if a result was published that this handle has not consumed.
	pub fn has_pending(&self) -> bool {
		self.receiver.has_changed().unwrap_or(false)
	}

	/// Waits for the next unconsumed result and consumes it.
	///
	/// Returns immediately if a result was published since the last call;
	/// when several were, only the latest is returned. Never resolves if the
	/// route never produces a result.
	pub async fn await_next(&mut self) -> R {
		loop {
			if self.receiver.changed().await.is_err() {
				// Unreachable while `_slot` holds the sender
				std::future::pending::<()>().await;
			}
			let latest = (*self.receiver.borrow_and_update()).clone();
			if let Some(value) = latest {
				return value;
			}
		}
	}
}

/// Per-pattern result slots, keyed by the exact registration pattern.
#[derive(Debug)]
pub struct ResultBridge<R> {
	slots: Mutex<HashMap<ArcStr, ResultSlot<R>>>,
}

impl<R> Default for ResultBridge<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> ResultBridge<R> {
	/// Creates a bridge without any slot.
	pub fn new() -> Self {
		Self {
			slots: Mutex::new(HashMap::new()),
		}
	}

	/// Returns a handle for `pattern`, creating its slot on first request.
	pub fn request_handle(&self, pattern: impl Into<ArcStr>) -> ResultHandle<R> {
		let pattern = pattern.into();
		let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
		let slot = slots
			.entry(pattern.clone())
			.or_insert_with(|| Arc::new(watch::channel(None).0))
			.clone();
		drop(slots);

		let receiver = slot.subscribe();
		ResultHandle {
			pattern,
			_slot: slot,
			receiver,
		}
	}

	/// Overwrites the slot of `pattern` with a copy of `value` and wakes its
	/// waiters.
	///
	/// Does nothing if no handle was ever requested for `pattern`.
	pub fn publish(&self, pattern: &str, value: &R)
	where
		R: Clone,
	{
		let slot = self
			.slots
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.get(pattern)
			.cloned();
		match slot {
			| Some(slot) => {
				trace!(pattern = %pattern, "Publishing route result");
				slot.send_replace(Some(value.clone()));
			}
			| None => {
				trace!(pattern = %pattern, "No result handle requested, skipping publish");
			}
		}
	}

	/// True if a handle was requested for `pattern`.
	pub fn is_requested(&self, pattern: &str) -> bool {
		self.slots
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.contains_key(pattern)
	}
}
