//! Route registration, message dispatch and awaitable route results
//!
//! Registration fills a [`RouteTable`]; each inbound message flows through
//! [`dispatcher::dispatch`] into the matching handlers and from there into the
//! [`ResultBridge`].

/// Dispatch of inbound messages to matching routes
pub mod dispatcher;
/// Routing error types
pub mod error;
/// Handler capability and argument binding
pub mod handler;
/// Awaitable per-route results
pub mod result_bridge;
/// Registered routes
pub mod route_table;

#[cfg(test)]
mod result_bridge_tests;

pub use error::{BoxError, DispatchError, HandlerError, RouteDefinitionError};
pub use handler::{
	FnHandler, MESSAGE_PARAM, RouteArguments, RouteDefinition, RouteHandler,
	TOPIC_PARAM, handler_fn,
};
pub use result_bridge::{ResultBridge, ResultHandle};
pub use route_table::{Route, RouteTable};
