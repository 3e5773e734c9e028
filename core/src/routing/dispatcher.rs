//! Per-message dispatch: match, bind, invoke concurrently, aggregate.

use std::future::Future;

use arcstr::ArcStr;
use futures::future::join_all;
use tracing::{debug, error};

use super::error::{DispatchError, HandlerError};
use super::handler::RouteArguments;
use super::result_bridge::ResultBridge;
use super::route_table::{Route, RouteTable};
use crate::config::FailurePolicy;
use crate::topic::TopicPath;

/// Dispatches one inbound message to every matching route.
///
/// Handlers are started in registration order and driven together on the
/// calling task; the call returns once all of them have finished. Each
/// successful result is published to `results` as soon as its handler
/// completes. The returned values keep registration order; routes that did
/// not match contribute nothing.
///
/// There is no timeout: a handler that never completes stalls this dispatch.
pub async fn dispatch<R>(
	routes: &RouteTable<R>,
	results: &ResultBridge<R>,
	policy: FailurePolicy,
	topic: &str,
	message: &str,
) -> Result<Vec<R>, DispatchError>
where
	R: Clone + Send + 'static,
{
	let topic_path = TopicPath::new(topic);
	let message = ArcStr::from(message);

	let invocations: Vec<_> = routes
		.iter()
		.filter_map(|route| {
			let topic_match =
				route.topic_pattern().try_match(&topic_path).ok()?;
			// try_match already enforces this; never run a partial match
			if route.topic_pattern().len() != topic_path.len() {
				return None;
			}
			let args = route.bind_arguments(&topic_match, &message);
			Some(invoke(route, args, results))
		})
		.collect();

	debug!(
		topic = %topic_path,
		matched = invocations.len(),
		routes = routes.len(),
		"Dispatching message"
	);
	if invocations.is_empty() {
		return Ok(Vec::new());
	}

	let outcomes = join_all(invocations).await;

	let mut values = Vec::with_capacity(outcomes.len());
	let mut first_failure = None;
	for (route, outcome) in outcomes {
		match outcome {
			| Ok(value) => values.push(value),
			| Err(err) => {
				if policy == FailurePolicy::FailBatch && first_failure.is_none()
				{
					first_failure = Some(DispatchError::Handler {
						pattern: route.pattern().to_string(),
						topic: topic_path.path.to_string(),
						source: err,
					});
				} else {
					error!(
						pattern = %route.pattern(),
						topic = %topic_path,
						error = %err,
						"Route handler failed"
					);
				}
			}
		}
	}

	match first_failure {
		| Some(err) => Err(err),
		| None => Ok(values),
	}
}

/// Starts the handler immediately; the returned future completes it and
/// publishes a successful result.
fn invoke<'a, R>(
	route: &'a Route<R>,
	args: RouteArguments,
	results: &'a ResultBridge<R>,
) -> impl Future<Output = (&'a Route<R>, Result<R, HandlerError>)> + 'a
where
	R: Clone + Send + 'static,
{
	let call = route.handler().call(args);
	async move {
		let outcome = call.await;
		if let Ok(value) = &outcome {
			results.publish(&route.pattern(), value);
		}
		(route, outcome)
	}
}
