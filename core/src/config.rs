//! Router behaviour settings

/// What dispatch does when a matched handler fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
	/// Run every matched handler to completion, then report the first
	/// failure (registration order) as the dispatch error
	#[default]
	FailBatch,
	/// Log failures and return the successful results only
	Isolate,
}

/// Router-level behaviour settings
#[derive(Debug, Clone, Default)]
pub struct RouterSettings {
	/// Handling of failed handler invocations
	pub failure_policy: FailurePolicy,
	/// Drop repeated subscription paths across routes, keeping the first
	/// occurrence
	pub deduplicate_subscription_paths: bool,
}

impl RouterSettings {
	/// Settings with the given failure policy
	pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
		self.failure_policy = policy;
		self
	}

	/// Settings with subscription path de-duplication switched on or off
	pub fn with_deduplicated_subscriptions(mut self, enabled: bool) -> Self {
		self.deduplicate_subscription_paths = enabled;
		self
	}
}
