//! # MQTT Topic Router
//!
//! Declare async handlers on MQTT topic patterns and let the router expand
//! them into broker subscriptions and dispatch every inbound message to all
//! matching handlers.
//!
//! ```rust,no_run
//! use mqtt_topic_router::prelude::*;
//! use std::convert::Infallible;
//!
//! #[route_handler("home/<room>:{kitchen,living_room}/temperature")]
//! async fn on_temperature(room: String, message: f64) -> Result<String, Infallible> {
//!     Ok(format!("{room}: {message}"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> mqtt_topic_router::Result<()> {
//!     let mut router = Router::new();
//!     router.mount(OnTemperatureHandler)?;
//!     let mut readings = router
//!         .request_result_handle("home/<room>:{kitchen,living_room}/temperature");
//!
//!     let (client, event_loop) = RoutedClient::new(
//!         router,
//!         RoutedClientConfig::localhost("topic_router"),
//!     )?;
//!     let driver = client.clone();
//!     tokio::spawn(async move { driver.run(event_loop).await });
//!
//!     println!("{}", readings.await_next().await);
//!     client.shutdown().await
//! }
//! ```

pub use mqtt_topic_router_core::*;
pub use mqtt_topic_router_macros::route_handler;

/// Prelude module for convenient imports
///
/// ```rust
/// use mqtt_topic_router::prelude::*;
/// ```
pub mod prelude {
	pub use mqtt_topic_router_core::prelude::*;
	pub use mqtt_topic_router_core::{
		HandlerError, ResultHandle, RouteArguments, RouteDefinition,
		RouteHandler, handler_fn,
	};
	pub use mqtt_topic_router_macros::route_handler;
}
