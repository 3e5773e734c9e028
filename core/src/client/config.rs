//! Configuration for routed client initialization

use rumqttc::{MqttOptions, OptionError, QoS};

/// Client-level behavior settings
#[derive(Debug, Clone)]
pub struct ClientSettings {
	/// Capacity of the rumqttc request channel (must be > 0)
	pub event_loop_capacity: usize,
	/// QoS requested for every route subscription
	pub subscription_qos: QoS,
	/// Consecutive event loop errors tolerated before `run` gives up
	/// (must be > 0)
	pub max_consecutive_errors: u32,
}

impl Default for ClientSettings {
	fn default() -> Self {
		Self {
			event_loop_capacity: 10,
			subscription_qos: QoS::AtMostOnce,
			max_consecutive_errors: 10,
		}
	}
}

/// Configuration for routed client creation
#[derive(Debug, Clone)]
pub struct RoutedClientConfig {
	/// Underlying MQTT connection options (from rumqttc)
	pub connection: MqttOptions,
	/// Client-level behavior settings
	pub settings: ClientSettings,
}

impl RoutedClientConfig {
	/// Create config with default settings
	pub fn new(client_id: &str, host: &str, port: u16) -> Self {
		Self {
			connection: MqttOptions::new(client_id, host, port),
			settings: ClientSettings::default(),
		}
	}

	/// Parse configuration from MQTT URL
	///
	/// Supports: tcp://, mqtt://, ssl://, mqtts://, ws://, wss://.
	/// The URL must carry a `client_id` query parameter.
	pub fn from_url(url: &str) -> Result<Self, OptionError> {
		Ok(Self {
			connection: MqttOptions::parse_url(url)?,
			settings: ClientSettings::default(),
		})
	}

	/// Create config for localhost:1883
	pub fn localhost(client_id: &str) -> Self {
		Self::new(client_id, "localhost", 1883)
	}

	/// Replaces the client settings
	pub fn with_settings(mut self, settings: ClientSettings) -> Self {
		self.settings = settings;
		self
	}
}
