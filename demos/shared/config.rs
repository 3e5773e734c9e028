use std::env;

use uuid::Uuid;

/// Broker URL from `MQTT_BROKER`, falling back to a local plain-text broker
///
/// `.env` files are read first, `demos/.env.local` overriding `demos/.env`.
pub fn broker_url() -> String {
	dotenv::dotenv().ok();
	if std::path::Path::new("demos/.env.local").exists() {
		dotenv::from_filename("demos/.env.local").ok();
	}

	env::var("MQTT_BROKER")
		.unwrap_or_else(|_| "mqtt://localhost:1883".to_string())
}

/// Client id made of `prefix` and a short random suffix
pub fn get_client_id(prefix: &str) -> String {
	let uuid = Uuid::new_v4().to_string();
	format!("{prefix}_{}", &uuid[..8])
}

/// Broker URL with a fresh `client_id` query parameter
pub fn build_url(client_id_prefix: &str) -> String {
	let base_url = broker_url();
	let client_id = get_client_id(client_id_prefix);

	if base_url.contains('?') {
		format!("{base_url}&client_id={client_id}")
	} else {
		format!("{base_url}?client_id={client_id}")
	}
}
