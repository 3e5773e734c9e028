use std::sync::Arc;
use std::time::Duration;

use arcstr::ArcStr;
use rumqttc::Packet::{self, Disconnect, Publish};
use rumqttc::{AsyncClient, ConnAck, ConnectReturnCode, EventLoop};
use rumqttc::{Event, Event::Incoming, Event::Outgoing, SubscribeFilter};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, error, info, warn};

use super::config::{ClientSettings, RoutedClientConfig};
use super::error::RoutedClientError;
use crate::router::Router;
use crate::routing::ResultHandle;

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(100);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Outcome of handling one event loop notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
	Continue,
	Stop,
}

/// MQTT client that feeds every inbound message through a [`Router`].
///
/// Routes are registered on the router before the client is built; the
/// client only reads it afterwards. Clones share the router and the
/// underlying rumqttc client.
pub struct RoutedClient<R> {
	client: AsyncClient,
	router: Arc<Router<R>>,
	settings: ClientSettings,
}

impl<R> Clone for RoutedClient<R> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			router: Arc::clone(&self.router),
			settings: self.settings.clone(),
		}
	}
}

impl<R> RoutedClient<R>
where R: Clone + Send + Sync + 'static
{
	/// Create a client around a fully registered router.
	///
	/// Nothing touches the network until the returned event loop is driven
	/// by [`RoutedClient::run`].
	pub fn new(
		router: Router<R>,
		config: RoutedClientConfig,
	) -> Result<(Self, EventLoop), RoutedClientError> {
		if config.settings.event_loop_capacity == 0 {
			return Err(RoutedClientError::configuration_value(
				"event_loop_capacity must be greater than 0",
			));
		}
		if config.settings.max_consecutive_errors == 0 {
			return Err(RoutedClientError::configuration_value(
				"max_consecutive_errors must be greater than 0",
			));
		}
		let (client, event_loop) = AsyncClient::new(
			config.connection,
			config.settings.event_loop_capacity,
		);
		let routed = Self {
			client,
			router: Arc::new(router),
			settings: config.settings,
		};
		Ok((routed, event_loop))
	}

	/// Message consumption loop.
	///
	/// Requests every route subscription after each successful connect
	/// without blocking the loop, and dispatches each inbound publish before
	/// polling the next event, so slow handlers stall intake instead of
	/// buffering. Returns `Ok` once a Disconnect
	/// packet is sent or received.
	pub async fn run(
		&self,
		mut event_loop: EventLoop,
	) -> Result<(), RoutedClientError> {
		let mut error_count = 0_u32;
		let max_errors = self.settings.max_consecutive_errors;

		loop {
			match event_loop.poll().await {
				| Ok(event) => {
					error_count = 0;
					if self.handle_event(event).await == LoopControl::Stop {
						break;
					}
				}
				| Err(err) => {
					error_count += 1;
					error!(error_count = error_count, error = %err, "MQTT event loop error");

					if error_count >= max_errors {
						error!(
							error_count = error_count,
							max_errors = max_errors,
							"Too many consecutive errors, terminating event \
							 loop"
						);
						return Err(RoutedClientError::EventLoop {
							attempts: error_count,
							source: err,
						});
					}

					let delay = INITIAL_RETRY_DELAY
						* 2_u32.pow((error_count - 1).min(10));
					let delay = delay.min(MAX_RETRY_DELAY);

					warn!(delay = ?delay, error_count = error_count, "Retrying MQTT connection");
					time::sleep(delay).await;
				}
			}
		}
		info!("MQTT event loop terminated gracefully");
		Ok(())
	}

	pub(crate) async fn handle_event(&self, event: Event) -> LoopControl {
		match event {
			| Incoming(Packet::ConnAck(ConnAck {
				session_present,
				code: ConnectReturnCode::Success,
			})) => {
				info!(
					session_present = session_present,
					"MQTT connected, subscribing route topics"
				);
				self.spawn_subscribe_all();
			}
			| Incoming(Publish(p)) => {
				debug!(topic = %p.topic, payload_size = p.payload.len(), "Received MQTT message");
				let Ok(message) = std::str::from_utf8(&p.payload) else {
					warn!(topic = %p.topic, "Skipping message with non UTF-8 payload");
					return LoopControl::Continue;
				};
				if let Err(err) = self.router.dispatch(&p.topic, message).await {
					error!(error = %err, "Failed to dispatch MQTT message");
				}
			}
			| Incoming(Disconnect) => {
				info!("Received MQTT Disconnect packet from server");
				return LoopControl::Stop;
			}
			| Outgoing(rumqttc::Outgoing::Disconnect) => {
				info!("Sent MQTT Disconnect packet to server");
				return LoopControl::Stop;
			}
			| notification => {
				debug!(notification = ?notification, "Received OTHER MQTT notification");
			}
		}
		LoopControl::Continue
	}

	/// Requests route subscriptions from a separate task.
	///
	/// The poll loop is the only consumer of the request channel, so it
	/// must never wait for room in it.
	pub(crate) fn spawn_subscribe_all(
		&self,
	) -> JoinHandle<Result<usize, RoutedClientError>> {
		let client = self.clone();
		tokio::spawn(async move {
			client.subscribe_all().await.inspect_err(|err| {
				error!(error = %err, "Failed to subscribe route topics");
			})
		})
	}

	/// Queues one SUBSCRIBE carrying every route subscription path.
	///
	/// Returns the number of paths requested.
	pub(crate) async fn subscribe_all(&self) -> Result<usize, RoutedClientError> {
		let qos = self.settings.subscription_qos;
		let filters: Vec<SubscribeFilter> = self
			.router
			.subscription_paths()
			.into_iter()
			.map(|path| SubscribeFilter::new(path, qos))
			.collect();
		if filters.is_empty() {
			warn!("No routes registered, nothing to subscribe");
			return Ok(0);
		}
		let count = filters.len();
		self.client.subscribe_many(filters).await?;
		debug!(subscriptions = count, qos = ?qos, "Requested route subscriptions");
		Ok(count)
	}

	/// Underlying rumqttc client, for publishing.
	pub fn mqtt_client(&self) -> &AsyncClient {
		&self.client
	}

	/// Router driving dispatch.
	pub fn router(&self) -> &Router<R> {
		&self.router
	}

	/// Handle on the next result of the route registered with `pattern`.
	pub fn request_result_handle(
		&self,
		pattern: impl Into<ArcStr>,
	) -> ResultHandle<R> {
		self.router.request_result_handle(pattern)
	}

	/// Active client settings.
	pub fn settings(&self) -> &ClientSettings {
		&self.settings
	}

	/// Sends an MQTT Disconnect; [`RoutedClient::run`] returns once the
	/// packet has gone out.
	pub async fn shutdown(&self) -> Result<(), RoutedClientError> {
		self.client.disconnect().await?;
		Ok(())
	}
}
