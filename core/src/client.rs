//! MQTT transport driver
//!
//! Binds a [`Router`](crate::router::Router) to a rumqttc client: subscribes
//! every route after each connect and dispatches inbound publishes.

/// Routed MQTT client and its event loop
pub mod async_client;
/// Client configuration
pub mod config;
/// Client error types
pub mod error;


pub use async_client::RoutedClient;
pub use config::{ClientSettings, RoutedClientConfig};
pub use error::RoutedClientError;
