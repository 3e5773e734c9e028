//! # Home Sensors - MQTT Topic Router Example
//!
//! Routes simulated home sensor readings to handlers declared on topic
//! patterns and waits for route results from the outside.
//!
//! Routes:
//! - `home/<room>:{kitchen,living_room}/temperature`: macro-generated handler,
//!   subscribes to two concrete topics
//! - `home/<room>/humidity`: closure handler, subscribes to `home/+/humidity`
//! - `home/+/+`: catch-all logger
//!
//! ```bash
//! MQTT_BROKER=mqtt://broker.hivemq.com:1883 cargo run --example home_sensors
//! ```

mod shared;

use std::convert::Infallible;
use std::time::Duration;

use mqtt_topic_router::prelude::*;

const TEMPERATURE_ROUTE: &str = "home/<room>:{kitchen,living_room}/temperature";

#[route_handler("home/<room>:{kitchen,living_room}/temperature")]
async fn on_temperature(
	room: String,
	message: f64,
) -> Result<String, Infallible> {
	Ok(format!("{room} is at {message:.1}°C"))
}

#[route_handler("home/+/+")]
async fn log_reading(topic: String, message: String) -> Result<String, Infallible> {
	println!("  [log] {topic} = {message}");
	Ok(topic)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	shared::tracing::setup(None);

	let mut router = Router::<String>::new();
	router.mount(OnTemperatureHandler)?;
	router.register(
		"home/<room>/humidity",
		handler_fn(["room", "message"], |args: RouteArguments| async move {
			let percent: u8 = args.parse("message")?;
			Ok::<_, HandlerError>(format!(
				"{} humidity is {percent}%",
				args.require("room")?
			))
		}),
	)?;
	router.mount(LogReadingHandler)?;

	println!("Subscribing to:");
	for path in router.subscription_paths() {
		println!("  {path}");
	}
	let mut temperatures = router.request_result_handle(TEMPERATURE_ROUTE);

	let config = RoutedClientConfig::from_url(&shared::config::build_url(
		"home_sensors",
	))?;
	let (client, event_loop) = RoutedClient::new(router, config)?;

	let driver = client.clone();
	let run = tokio::spawn(async move { driver.run(event_loop).await });

	// Give the broker a moment to acknowledge the subscriptions
	tokio::time::sleep(Duration::from_secs(1)).await;

	let readings = [
		("home/kitchen/temperature", "21.5", true),
		("home/garage/temperature", "9.0", false),
		("home/bathroom/humidity", "71", false),
		("home/living_room/temperature", "22.25", true),
	];
	for (topic, payload, routed_temperature) in readings {
		client
			.mqtt_client()
			.publish(topic, QoS::AtLeastOnce, false, payload)
			.await?;
		if !routed_temperature {
			continue;
		}
		// Latest value wins: consume each result before the next publish
		match tokio::time::timeout(Duration::from_secs(5), temperatures.await_next())
			.await
		{
			| Ok(summary) => println!("Temperature route: {summary}"),
			| Err(_) => println!("No result for {topic} within 5s"),
		}
	}

	client.shutdown().await?;
	run.await??;
	println!("Done");
	Ok(())
}
