//! Shared fixtures for the integration suites.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
// self
use grabexpress::{ApiRevision, Client, ClientBuilder, ReqwestApiClient};

pub const API_KEY: &str = "test-key";
pub const SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "test-access";
pub const REQUEST_ID: &str = "req-3f9c";

/// Token endpoint response with a 30 minute lifetime.
pub fn token_body() -> Value {
	json!({ "access_token": ACCESS_TOKEN, "token_type": "bearer", "expires_in": 1800 })
}

pub async fn mock_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").json_body(token_body());
		})
		.await
}

pub fn builder(server: &MockServer, revision: ApiRevision) -> ClientBuilder {
	Client::builder()
		.api_key(API_KEY)
		.secret(SECRET)
		.base_url(server.base_url())
		.token_url(server.url("/token"))
		.revision(revision)
}

pub fn client(server: &MockServer, revision: ApiRevision) -> ReqwestApiClient {
	builder(server, revision).build().expect("Test client should build.")
}

/// Quote payload carrying `count` quotes.
pub fn quotes_body(count: usize) -> Value {
	let quotes = (0..count)
		.map(|i| {
			json!({
				"service": { "id": i, "type": "INSTANT", "name": format!("Service {i}") },
				"currency": { "code": "IDR", "symbol": "Rp", "exponent": 0 },
				"amount": 15000.0 + i as f64,
				"estimatedTimeline": { "pickup": "2025-03-01T08:15:00Z" }
			})
		})
		.collect::<Vec<_>>();

	json!({ "quotes": quotes })
}

pub fn delivery_body(id: &str, status: &str) -> Value {
	json!({
		"deliveryID": id,
		"merchantOrderID": "order-1",
		"status": status,
		"trackingURL": format!("https://express.grab.com/track/{id}")
	})
}
