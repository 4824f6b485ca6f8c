//! Walks through quoting, booking, tracking, and cancelling a delivery against a local mock of
//! the GrabExpress partner API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use grabexpress::{
	CallContext, Client,
	model::{
		Contact, Coordinates, CreateDeliveryRequest, CreateQuotesRequest, Package, ServiceType,
		Waypoint,
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/deliveries/quotes");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"quotes": [{
					"service": { "id": 0, "type": "INSTANT", "name": "GrabExpress" },
					"currency": { "code": "SGD", "symbol": "S$", "exponent": 2 },
					"amount": 12.5,
					"distance": 4200
				}]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/deliveries");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"deliveryID": "SG-DEMO-1",
				"merchantOrderID": "demo-order",
				"status": "ALLOCATING",
				"trackingURL": "https://express.grab.com/track/SG-DEMO-1"
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/deliveries/SG-DEMO-1");
			then.status(200)
				.header("content-type", "application/json")
				.header("X-Grabkit-Grab-Requestid", "demo-request")
				.json_body(json!({
					"deliveryID": "SG-DEMO-1",
					"merchantOrderID": "demo-order",
					"status": "PICKING_UP"
				}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v1/deliveries/SG-DEMO-1");
			then.status(204);
		})
		.await;

	let client = Client::builder()
		.api_key("demo-key")
		.secret("demo-secret")
		.base_url(server.base_url())
		.token_url(server.url("/token"))
		.build()?;
	let ctx = CallContext::new().with_timeout(std::time::Duration::from_secs(5));
	let origin = Waypoint {
		address: "1 Marina Boulevard".into(),
		coordinates: Coordinates { latitude: 1.2834, longitude: 103.8535 },
		..Default::default()
	};
	let destination = Waypoint {
		address: "80 Pasir Panjang Road".into(),
		coordinates: Coordinates { latitude: 1.2764, longitude: 103.7913 },
		..Default::default()
	};
	let packages = vec![Package {
		name: "Contracts".into(),
		description: "Signed paperwork".into(),
		quantity: 1,
		price: 0.,
		..Default::default()
	}];
	let quotes = client
		.create_quotes(&ctx, &CreateQuotesRequest {
			service_type: Some(ServiceType::Instant),
			packages: packages.clone(),
			origin: origin.clone(),
			destination: destination.clone(),
		})
		.await?;

	for quote in &quotes.quotes {
		println!("{}: {} {}.", quote.service.name, quote.currency.symbol, quote.amount);
	}

	let contact = |name: &str, phone: &str| Contact {
		first_name: name.into(),
		email: format!("{}@example.com", name.to_lowercase()),
		phone: phone.into(),
		..Default::default()
	};
	let delivery = client
		.create_delivery(&ctx, &CreateDeliveryRequest {
			merchant_order_id: "demo-order".into(),
			service_type: ServiceType::Instant,
			packages,
			sender: contact("Mei", "6591234567"),
			recipient: contact("Arun", "6597654321"),
			origin,
			destination,
			..Default::default()
		})
		.await?;

	println!("Booked {} ({:?}).", delivery.delivery_id, delivery.status);

	let tracked = client.get_delivery(&ctx, &delivery.delivery_id).await?;

	println!(
		"Delivery {} is {:?} (request {}).",
		tracked.delivery_id,
		tracked.status,
		tracked.request_id.as_deref().unwrap_or("-")
	);

	client.cancel_delivery(&ctx, &delivery.delivery_id).await?;

	println!("Cancelled {}.", delivery.delivery_id);

	// Every call above reused the first token.
	token_mock.assert_calls_async(1).await;

	Ok(())
}
