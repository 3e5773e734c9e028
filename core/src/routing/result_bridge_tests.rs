//! Tests for awaitable route results

use std::time::Duration;

use tokio::time::timeout;

use super::ResultBridge;

const PATTERN: &str = "home/<room>/temperature";

#[tokio::test]
async fn test_await_next_receives_next_publish() {
	let bridge = ResultBridge::<u32>::new();
	let mut handle = bridge.request_handle(PATTERN);

	let waiter = tokio::spawn(async move { handle.await_next().await });
	tokio::task::yield_now().await;
	bridge.publish(PATTERN, &7);

	assert_eq!(waiter.await.unwrap(), 7);
}

#[tokio::test]
async fn test_consumed_value_is_not_returned_again() {
	let bridge = ResultBridge::<u32>::new();
	let mut handle = bridge.request_handle(PATTERN);

	bridge.publish(PATTERN, &1);
	assert_eq!(handle.await_next().await, 1);
	assert!(!handle.has_pending());

	let second = timeout(Duration::from_millis(20), handle.await_next()).await;
	assert!(second.is_err(), "already consumed value must not resolve");

	bridge.publish(PATTERN, &2);
	assert_eq!(handle.await_next().await, 2);
}

#[tokio::test]
async fn test_latest_value_wins() {
	let bridge = ResultBridge::<&'static str>::new();
	let mut handle = bridge.request_handle(PATTERN);

	bridge.publish(PATTERN, &"first");
	bridge.publish(PATTERN, &"second");

	assert_eq!(handle.await_next().await, "second");
	assert!(!handle.has_pending());
}

#[tokio::test]
async fn test_publish_before_handle_is_not_observed() {
	let bridge = ResultBridge::<u32>::new();
	let _early = bridge.request_handle(PATTERN);
	bridge.publish(PATTERN, &1);

	let mut late = bridge.request_handle(PATTERN);
	assert!(!late.has_pending());

	bridge.publish(PATTERN, &2);
	assert_eq!(late.await_next().await, 2);
}

#[tokio::test]
async fn test_publish_without_handle_is_noop() {
	let bridge = ResultBridge::<u32>::new();

	bridge.publish(PATTERN, &1);

	assert!(!bridge.is_requested(PATTERN));
}

#[tokio::test]
async fn test_handles_are_keyed_by_exact_pattern() {
	let bridge = ResultBridge::<u32>::new();
	let mut handle = bridge.request_handle(PATTERN);

	bridge.publish("home/+/temperature", &1);

	assert!(!handle.has_pending());
	assert_eq!(handle.pattern(), PATTERN);
	let pending = timeout(Duration::from_millis(20), handle.await_next()).await;
	assert!(pending.is_err());
}

#[tokio::test]
async fn test_every_handle_sees_the_value() {
	let bridge = ResultBridge::<u32>::new();
	let mut first = bridge.request_handle(PATTERN);
	let mut cloned = first.clone();
	let mut second = bridge.request_handle(PATTERN);

	bridge.publish(PATTERN, &5);

	assert_eq!(first.await_next().await, 5);
	assert_eq!(cloned.await_next().await, 5);
	assert_eq!(second.await_next().await, 5);
}

#[tokio::test(start_paused = true)]
async fn test_never_resolves_without_publish() {
	let bridge = ResultBridge::<u32>::new();
	let mut handle = bridge.request_handle("never/<published>");

	let outcome = timeout(Duration::from_secs(3600), handle.await_next()).await;

	assert!(outcome.is_err());
}
