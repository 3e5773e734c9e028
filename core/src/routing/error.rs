use thiserror::Error;

use crate::topic::TopicPatternError;

/// Boxed error returned by handler bodies
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised when a route is registered
///
/// Registration either stores the route completely or not at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteDefinitionError {
	/// The route pattern could not be parsed
	#[error("Invalid route pattern: {0}")]
	InvalidPattern(#[from] TopicPatternError),

	/// Handler declares parameters the pattern cannot supply
	#[error(
		"Handler parameters {parameters:?} are not 'topic', 'message' or a \
		 placeholder of '{pattern}'"
	)]
	UnknownParameters {
		/// Route pattern
		pattern: String,
		/// Offending parameter names in declaration order
		parameters: Vec<String>,
	},
}

impl RouteDefinitionError {
	/// Creates a new UnknownParameters error
	pub fn unknown_parameters<I, S>(
		pattern: impl Into<String>,
		parameters: I,
	) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::UnknownParameters {
			pattern: pattern.into(),
			parameters: parameters.into_iter().map(Into::into).collect(),
		}
	}
}

/// Errors raised by a single handler invocation
#[derive(Debug, Error)]
pub enum HandlerError {
	/// Handler asked for an argument that was not bound
	#[error("Missing argument '{name}'")]
	MissingArgument {
		/// Parameter name
		name: String,
	},

	/// Bound value could not be parsed into the parameter type
	#[error("Failed to parse argument '{name}': {source}")]
	ArgumentParse {
		/// Parameter name
		name: String,
		/// Parse error details
		#[source]
		source: BoxError,
	},

	/// Handler body failed
	#[error("Handler failed: {0}")]
	Failed(#[source] BoxError),
}

impl HandlerError {
	/// Wraps an arbitrary handler failure
	pub fn failed(err: impl Into<BoxError>) -> Self {
		Self::Failed(err.into())
	}

	/// Creates a new MissingArgument error
	pub fn missing_argument(name: impl Into<String>) -> Self {
		Self::MissingArgument { name: name.into() }
	}
}

/// Errors returned by dispatch under [`FailurePolicy::FailBatch`]
///
/// [`FailurePolicy::FailBatch`]: crate::config::FailurePolicy::FailBatch
#[derive(Debug, Error)]
pub enum DispatchError {
	/// A matched handler failed
	#[error("Handler for route '{pattern}' failed on topic '{topic}': {source}")]
	Handler {
		/// Pattern of the failing route
		pattern: String,
		/// Inbound topic
		topic: String,
		/// Handler error
		#[source]
		source: HandlerError,
	},
}
