mod common;

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use grabexpress::{ApiRevision, CallContext, CancellationToken, Error, error::TransportError};

async fn slow_lookup(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/deliveries/D1");
			then.status(200)
				.header("content-type", "application/json")
				.delay(Duration::from_secs(2))
				.json_body(delivery_body("D1", "ALLOCATING"));
		})
		.await
}

#[tokio::test]
async fn deadline_expiry_is_a_timeout() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _slow = slow_lookup(&server).await;
	let ctx = CallContext::new().with_timeout(Duration::from_millis(100));
	let err = client(&server, ApiRevision::V1)
		.get_delivery(&ctx, "D1")
		.await
		.expect_err("The call should time out.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout)));
}

#[tokio::test]
async fn cancelled_context_never_reaches_the_network() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;
	let lookup = slow_lookup(&server).await;
	let cancellation = CancellationToken::new();

	cancellation.cancel();

	let err = client(&server, ApiRevision::V1)
		.get_delivery(&CallContext::new().with_cancellation(cancellation), "D1")
		.await
		.expect_err("A cancelled context should fail immediately.");

	assert!(matches!(err, Error::Transport(TransportError::Cancelled)));

	token.assert_calls_async(0).await;
	lookup.assert_calls_async(0).await;
}

#[tokio::test]
async fn cancelling_mid_flight_aborts_the_call() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _slow = slow_lookup(&server).await;
	let cancellation = CancellationToken::new();
	let trigger = cancellation.clone();
	let ctx = CallContext::new().with_cancellation(cancellation);

	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(100)).await;
		trigger.cancel();
	});

	let err = client(&server, ApiRevision::V1)
		.get_delivery(&ctx, "D1")
		.await
		.expect_err("A cancelled call should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Cancelled)));
}

#[tokio::test]
async fn generous_deadlines_do_not_interfere() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _lookup = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/deliveries/D1");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(delivery_body("D1", "ALLOCATING"));
		})
		.await;
	let ctx = CallContext::new()
		.with_timeout(Duration::from_secs(10))
		.with_cancellation(CancellationToken::new());

	client(&server, ApiRevision::V1)
		.get_delivery(&ctx, "D1")
		.await
		.expect("A call within its deadline should succeed.");
}
