//! Router facade owning the route table, the result bridge and the settings.

use std::collections::HashSet;

use arcstr::ArcStr;
use tracing::debug;

use crate::config::RouterSettings;
use crate::routing::{
	DispatchError, ResultBridge, ResultHandle, RouteDefinition,
	RouteDefinitionError, RouteHandler, RouteTable, dispatcher,
};

/// Topic router.
///
/// Register every route first, then drive [`Router::dispatch`] from a single
/// message-consumption loop. `register` needs `&mut self` and `dispatch`
/// only `&self`, so routes cannot change while a dispatch is in flight.
///
/// `R` is the value handlers produce; it is cloned into result handles.
pub struct Router<R> {
	routes: RouteTable<R>,
	results: ResultBridge<R>,
	settings: RouterSettings,
}

impl<R> Default for Router<R>
where
	R: Clone + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Router<R>
where
	R: Clone + Send + Sync + 'static,
{
	/// Creates a router with default settings.
	pub fn new() -> Self {
		Self::with_settings(RouterSettings::default())
	}

	/// Creates a router with custom settings.
	pub fn with_settings(settings: RouterSettings) -> Self {
		Self {
			routes: RouteTable::new(),
			results: ResultBridge::new(),
			settings,
		}
	}

	/// Registers `handler` for `pattern`.
	///
	/// Fails if the pattern is malformed or the handler declares a parameter
	/// that is neither `topic`, `message` nor a placeholder of the pattern.
	/// Nothing is registered on failure.
	pub fn register<H>(
		&mut self,
		pattern: impl Into<ArcStr>,
		handler: H,
	) -> Result<(), RouteDefinitionError>
	where
		H: RouteHandler<R>,
	{
		self.routes.register(pattern, handler).map(|_| ())
	}

	/// Registers `handler` and returns a handle on its next results.
	pub fn register_awaitable<H>(
		&mut self,
		pattern: impl Into<ArcStr>,
		handler: H,
	) -> Result<ResultHandle<R>, RouteDefinitionError>
	where
		H: RouteHandler<R>,
	{
		let pattern = self.routes.register(pattern, handler)?.pattern();
		Ok(self.results.request_handle(pattern))
	}

	/// Registers a handler under its own [`RouteDefinition::PATTERN`].
	pub fn mount<H>(&mut self, handler: H) -> Result<(), RouteDefinitionError>
	where
		H: RouteDefinition<R>,
	{
		self.register(H::PATTERN, handler)
	}

	/// Dispatches one inbound message to every matching route.
	///
	/// Returns the results of the invoked handlers in registration order, or
	/// an empty vector when nothing matched. Handler failures are treated
	/// according to [`RouterSettings::failure_policy`].
	pub async fn dispatch(
		&self,
		topic: &str,
		message: &str,
	) -> Result<Vec<R>, DispatchError> {
		dispatcher::dispatch(
			&self.routes,
			&self.results,
			self.settings.failure_policy,
			topic,
			message,
		)
		.await
	}

	/// Broker subscription paths for every registered route.
	///
	/// Called after each (re)connect. Duplicates are kept unless
	/// [`RouterSettings::deduplicate_subscription_paths`] is set.
	pub fn subscription_paths(&self) -> Vec<String> {
		let paths = self.routes.subscription_paths();
		if !self.settings.deduplicate_subscription_paths {
			return paths;
		}
		let mut seen = HashSet::with_capacity(paths.len());
		let unique: Vec<String> =
			paths.into_iter().filter(|path| seen.insert(path.clone())).collect();
		debug!(subscriptions = unique.len(), "De-duplicated subscription paths");
		unique
	}

	/// Handle resolving to the next result of the route registered with
	/// exactly `pattern`.
	///
	/// Never resolves if no such route exists or it never succeeds.
	pub fn request_result_handle(
		&self,
		pattern: impl Into<ArcStr>,
	) -> ResultHandle<R> {
		self.results.request_handle(pattern)
	}

	/// Registered routes.
	pub fn routes(&self) -> &RouteTable<R> {
		&self.routes
	}

	/// Number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Active settings.
	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}
}
