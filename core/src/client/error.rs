use rumqttc::{ClientError, ConnectionError, OptionError};

use crate::routing::{DispatchError, RouteDefinitionError};

/// Errors that can occur in routed client operations
#[derive(Debug, thiserror::Error)]
pub enum RoutedClientError {
	/// Request could not be handed to the rumqttc event loop
	#[error("Client operation failed: {0}")]
	ClientOperation(#[from] ClientError),

	/// Configuration errors when parsing MQTT options
	#[error("Configuration error: {0}")]
	Configuration(#[from] OptionError),

	/// Invalid configuration parameter values
	#[error("Invalid configuration value: {0}")]
	ConfigurationValue(String),

	/// Route registration failed
	#[error("Route definition error: {0}")]
	RouteDefinition(#[from] RouteDefinitionError),

	/// Dispatch of an inbound message failed
	#[error("Dispatch error: {0}")]
	Dispatch(#[from] DispatchError),

	/// The event loop kept failing and was abandoned
	#[error("Event loop stopped after {attempts} consecutive errors: {source}")]
	EventLoop {
		/// Number of consecutive failed polls
		attempts: u32,
		/// Last connection error
		#[source]
		source: ConnectionError,
	},
}

impl RoutedClientError {
	/// Create a ConfigurationValue error
	pub fn configuration_value(message: impl Into<String>) -> Self {
		Self::ConfigurationValue(message.into())
	}
}
