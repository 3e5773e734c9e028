//! # MQTT Topic Router
//!
//! Pattern-based topic routing for MQTT clients: declare handlers on topic
//! patterns, expand them into broker subscriptions, and dispatch every
//! inbound message to all matching handlers concurrently.
//!
//! ## Features
//!
//! - **Pattern language**: `+` wildcards, named `<room>` captures and
//!   enumerated `<room>:{kitchen,hall}` captures
//! - **Registration-time validation**: handlers may only ask for `topic`,
//!   `message` or placeholders of their pattern
//! - **Concurrent dispatch**: matching handlers run together, results keep
//!   registration order
//! - **Awaitable results**: wait for the next result of a specific route
//! - **Transport driver**: a rumqttc client that subscribes on every connect
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mqtt_topic_router_core::prelude::*;
//! use mqtt_topic_router_core::routing::{HandlerError, RouteArguments, handler_fn};
//!
//! #[tokio::main]
//! async fn main() -> mqtt_topic_router_core::Result<()> {
//!     let mut router = Router::new();
//!     let mut temperatures = router.register_awaitable(
//!         "home/<room>:{kitchen,living_room}/temperature",
//!         handler_fn(["room", "message"], |args: RouteArguments| async move {
//!             let celsius: f64 = args.parse("message")?;
//!             Ok::<_, HandlerError>((args.require("room")?.to_string(), celsius))
//!         }),
//!     )?;
//!
//!     let config = RoutedClientConfig::from_url(
//!         "mqtt://localhost:1883?client_id=topic_router",
//!     )?;
//!     let (client, event_loop) = RoutedClient::new(router, config)?;
//!
//!     let driver = client.clone();
//!     let run = tokio::spawn(async move { driver.run(event_loop).await });
//!
//!     let (room, celsius) = temperatures.await_next().await;
//!     println!("{room}: {celsius}");
//!
//!     client.shutdown().await?;
//!     let _ = run.await;
//!     Ok(())
//! }
//! ```
//!
//! ## Pattern Matching
//!
//! A pattern matches a topic only when both have the same number of
//! `/`-separated segments. `#` is not supported.

#![warn(missing_docs)]

pub mod client;
/// Router behaviour settings
pub mod config;
/// Router facade
pub mod router;
pub mod routing;
/// Topic pattern parsing, matching and subscription expansion
pub mod topic;

// === Core Public API ===
pub use client::{
	ClientSettings, RoutedClient, RoutedClientConfig, RoutedClientError,
};
pub use config::{FailurePolicy, RouterSettings};
pub use router::Router;
pub use routing::{
	HandlerError, ResultHandle, RouteArguments, RouteDefinition,
	RouteDefinitionError, RouteHandler, handler_fn,
};
// Re-export rumqttc types for advanced configuration
pub use rumqttc::MqttOptions;
pub use rumqttc::QoS;
// Topic pattern types (for manual pattern handling)
pub use topic::{TopicError, TopicPatternError, TopicPatternPath};

/// Result type alias for operations that may fail with RoutedClientError
pub type Result<T> = std::result::Result<T, RoutedClientError>;

/// Prelude module for convenient imports
///
/// ```rust
/// use mqtt_topic_router_core::prelude::*;
/// ```
pub mod prelude {
	pub use crate::{
		ClientSettings, FailurePolicy, MqttOptions, QoS, RoutedClient,
		RoutedClientConfig, RoutedClientError, Router, RouterSettings,
	};
}

/// Error types used throughout the library
///
/// ```rust
/// use mqtt_topic_router_core::errors::*;
/// ```
pub mod errors {
	pub use crate::routing::{BoxError, DispatchError};
	pub use crate::topic::TopicMatchError;
	pub use crate::{
		HandlerError, RouteDefinitionError, RoutedClientError, TopicError,
		TopicPatternError,
	};
}
