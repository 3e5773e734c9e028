use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing from the environment
///
/// Priority (first match wins):
/// 1. `force_level` if provided
/// 2. `RUST_LOG_DISABLE` set: no tracing
/// 3. `RUST_LOG` set: environment filter
/// 4. Otherwise silent
///
/// ```bash
/// RUST_LOG=mqtt_topic_router_core=debug cargo run --example home_sensors
/// ```
pub fn setup(force_level: Option<&str>) {
	load_env_files();

	if std::env::var("RUST_LOG_DISABLE").is_ok() {
		return;
	}

	let filter = if let Some(level) = force_level {
		tracing_subscriber::EnvFilter::new(level)
	} else if std::env::var("RUST_LOG").is_ok() {
		tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| "info".into())
	} else {
		return;
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.init();
}

fn load_env_files() {
	dotenv::from_filename("demos/.env").ok();
	if std::path::Path::new("demos/.env.local").exists() {
		dotenv::from_filename("demos/.env.local").ok();
	}
}
