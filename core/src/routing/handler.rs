//! Handler capability: an async callable plus its declared parameter names.

use std::future::Future;
use std::str::FromStr;

use arcstr::Substr;
use futures::future::BoxFuture;
use smallvec::SmallVec;

use super::error::HandlerError;

/// Reserved parameter name bound to the full inbound topic
pub const TOPIC_PARAM: &str = "topic";
/// Reserved parameter name bound to the message payload
pub const MESSAGE_PARAM: &str = "message";

/// A route handler.
///
/// `parameter_names` must list the caller-supplied parameters in declaration
/// order, excluding any receiver or captured state. Each name has to be
/// [`TOPIC_PARAM`], [`MESSAGE_PARAM`] or a placeholder of the route pattern;
/// registration rejects anything else.
///
/// Implemented by `#[route_handler]` functions and by [`handler_fn`].
pub trait RouteHandler<R>: Send + Sync + 'static {
	/// Declared parameter names in declaration order.
	fn parameter_names(&self) -> &[&'static str];

	/// Invokes the handler with arguments bound by name.
	fn call(
		&self,
		args: RouteArguments,
	) -> BoxFuture<'static, Result<R, HandlerError>>;
}

/// A handler that knows the pattern it should be mounted on.
pub trait RouteDefinition<R>: RouteHandler<R> {
	/// Route pattern, e.g. `home/<room>/temperature`
	const PATTERN: &'static str;
}

/// Arguments bound for one handler invocation.
///
/// Holds exactly the handler's declared parameters.
#[derive(Debug, Clone, Default)]
pub struct RouteArguments {
	values: SmallVec<[(&'static str, Substr); 4]>,
}

impl RouteArguments {
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			values: SmallVec::with_capacity(capacity),
		}
	}

	pub(crate) fn push(&mut self, name: &'static str, value: Substr) {
		self.values.push((name, value));
	}

	/// Value bound to `name`, if any.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values
			.iter()
			.find(|(n, _)| *n == name)
			.map(|(_, value)| value.as_str())
	}

	/// Value bound to `name`, or [`HandlerError::MissingArgument`].
	pub fn require(&self, name: &str) -> Result<&str, HandlerError> {
		self.get(name)
			.ok_or_else(|| HandlerError::missing_argument(name))
	}

	/// Parses the value bound to `name`.
	pub fn parse<T>(&self, name: &str) -> Result<T, HandlerError>
	where
		T: FromStr,
		T::Err: std::error::Error + Send + Sync + 'static,
	{
		self.require(name)?
			.parse()
			.map_err(|e| HandlerError::ArgumentParse {
				name: name.to_string(),
				source: Box::new(e),
			})
	}

	/// Full inbound topic, if the handler declared `topic`.
	pub fn topic(&self) -> Option<&str> {
		self.get(TOPIC_PARAM)
	}

	/// Message payload, if the handler declared `message`.
	pub fn message(&self) -> Option<&str> {
		self.get(MESSAGE_PARAM)
	}

	/// Iterator over `(name, value)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.values.iter().map(|(name, value)| (*name, value.as_str()))
	}

	/// Number of bound arguments.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// True if nothing is bound.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// Handler built from a closure and an explicit parameter list.
pub struct FnHandler<F> {
	params: Vec<&'static str>,
	func: F,
}

/// Creates a handler from a closure.
///
/// `params` is the closure's parameter list: the names the closure reads from
/// its [`RouteArguments`]. Captured variables are not parameters.
///
/// ```rust
/// use mqtt_topic_router_core::routing::{HandlerError, RouteArguments, handler_fn};
///
/// let handler = handler_fn(["room", "message"], |args: RouteArguments| async move {
/// 	let celsius: f64 = args.parse("message")?;
/// 	Ok::<_, HandlerError>(format!("{}={celsius}", args.require("room")?))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<R, F, Fut>(
	params: impl IntoIterator<Item = &'static str>,
	func: F,
) -> FnHandler<F>
where
	F: Fn(RouteArguments) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
{
	FnHandler {
		params: params.into_iter().collect(),
		func,
	}
}

impl<R, F, Fut> RouteHandler<R> for FnHandler<F>
where
	F: Fn(RouteArguments) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
{
	fn parameter_names(&self) -> &[&'static str] {
		&self.params
	}

	fn call(
		&self,
		args: RouteArguments,
	) -> BoxFuture<'static, Result<R, HandlerError>> {
		Box::pin((self.func)(args))
	}
}
