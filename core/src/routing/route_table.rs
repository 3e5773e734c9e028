use std::sync::Arc;

use arcstr::{ArcStr, Substr};
use smallvec::SmallVec;
use tracing::debug;

use super::error::RouteDefinitionError;
use super::handler::{MESSAGE_PARAM, RouteArguments, RouteHandler, TOPIC_PARAM};
use crate::topic::{TopicMatch, TopicPatternPath};

/// A registered (pattern, handler) binding. Immutable once created.
pub struct Route<R> {
	pattern: TopicPatternPath,
	param_names: SmallVec<[Substr; 4]>,
	required_params: Vec<&'static str>,
	handler: Arc<dyn RouteHandler<R>>,
}

impl<R> Route<R> {
	/// Original pattern string, the key for awaitable results.
	pub fn pattern(&self) -> ArcStr {
		self.pattern.topic_pattern()
	}

	/// Compiled pattern.
	pub fn topic_pattern(&self) -> &TopicPatternPath {
		&self.pattern
	}

	/// Placeholder names captured by the pattern, in declaration order.
	pub fn param_names(&self) -> &[Substr] {
		&self.param_names
	}

	/// Parameter names declared by the handler.
	pub fn required_params(&self) -> &[&'static str] {
		&self.required_params
	}

	pub(crate) fn handler(&self) -> &Arc<dyn RouteHandler<R>> {
		&self.handler
	}

	/// Builds the handler's arguments from a match and the message.
	///
	/// The full binding map (`topic`, `message`, every capture) is projected
	/// down to the handler's declared parameters.
	pub(crate) fn bind_arguments(
		&self,
		topic_match: &TopicMatch,
		message: &ArcStr,
	) -> RouteArguments {
		let mut args = RouteArguments::with_capacity(self.required_params.len());
		for &name in &self.required_params {
			let value = match name {
				| TOPIC_PARAM => Some(topic_match.topic().substr(..)),
				| MESSAGE_PARAM => Some(message.substr(..)),
				| _ => topic_match.get_named_param(name).cloned(),
			};
			if let Some(value) = value {
				args.push(name, value);
			}
		}
		args
	}
}

impl<R> std::fmt::Debug for Route<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.topic_pattern())
			.field("required_params", &self.required_params)
			.finish()
	}
}

/// Registered routes in registration order.
///
/// Filled during the registration phase and read-only afterwards; there is
/// no removal.
pub struct RouteTable<R> {
	routes: Vec<Route<R>>,
}

impl<R> Default for RouteTable<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> RouteTable<R> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Parses `pattern`, validates the handler's parameters against it and
	/// stores the route.
	pub fn register<H>(
		&mut self,
		pattern: impl Into<ArcStr>,
		handler: H,
	) -> Result<&Route<R>, RouteDefinitionError>
	where
		H: RouteHandler<R>,
	{
		let pattern = TopicPatternPath::new_from_string(pattern)?;
		let param_names = pattern.param_names();

		let unknown: Vec<&str> = handler
			.parameter_names()
			.iter()
			.copied()
			.filter(|name| {
				*name != TOPIC_PARAM
					&& *name != MESSAGE_PARAM
					&& !param_names.iter().any(|param| param.as_str() == *name)
			})
			.collect();
		if !unknown.is_empty() {
			return Err(RouteDefinitionError::unknown_parameters(
				pattern.topic_pattern().as_str(),
				unknown,
			));
		}

		let required_params = handler.parameter_names().to_vec();
		debug!(
			pattern = %pattern,
			params = ?required_params,
			subscriptions = pattern.subscription_count(),
			"Registered route"
		);
		self.routes.push(Route {
			pattern,
			param_names,
			required_params,
			handler: Arc::new(handler),
		});
		let index = self.routes.len() - 1;
		Ok(&self.routes[index])
	}

	/// Subscription paths of every route, in registration then expansion
	/// order. Duplicates across routes are kept.
	pub fn subscription_paths(&self) -> Vec<String> {
		self.routes
			.iter()
			.flat_map(|route| route.pattern.subscription_paths())
			.collect()
	}

	/// Iterator over routes in registration order.
	pub fn iter(&self) -> std::slice::Iter<'_, Route<R>> {
		self.routes.iter()
	}

	/// Number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// True if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
