//! Quote request and response shapes.

// self
use crate::{
	_prelude::*,
	decode::ApiPayload,
	model::{Package, ServiceType, Timeline, Waypoint},
};

/// Body of `POST deliveries/quotes`.
///
/// Without packages the provider prices a single package of its cheapest category, and
/// quotes always assume immediate dispatch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotesRequest {
	/// Restricts the quotes to one service tier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub service_type: Option<ServiceType>,
	/// Items to be delivered.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub packages: Vec<Package>,
	/// Pickup point.
	pub origin: Waypoint,
	/// Drop-off point.
	pub destination: Waypoint,
}

/// Delivery service a quote applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
	/// Provider service identifier.
	pub id: u64,
	/// Service tier.
	#[serde(rename = "type")]
	pub kind: ServiceType,
	/// Display name.
	pub name: String,
}

/// Currency of a quoted amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
	/// ISO 4217 code.
	pub code: String,
	/// Display symbol.
	pub symbol: String,
	/// Number of minor-unit digits.
	pub exponent: u8,
}

/// Priced estimate for one service tier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Service the price applies to.
	pub service: Service,
	/// Currency of [`Quote::amount`].
	pub currency: Currency,
	/// Quoted price.
	pub amount: f64,
	/// Projected lifecycle timestamps.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub estimated_timeline: Option<Timeline>,
	/// Route distance in metres.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub distance: Option<u64>,
}

/// Result of `POST deliveries/quotes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateQuotesResponse {
	/// One quote per available service tier.
	pub quotes: Vec<Quote>,
	/// Pickup point as normalized by the provider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub origin: Option<Waypoint>,
	/// Drop-off point as normalized by the provider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub destination: Option<Waypoint>,
	/// Packages the quotes were priced for.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub packages: Vec<Package>,
	/// Correlation identifier of the response.
	#[serde(skip)]
	pub request_id: Option<String>,
}
impl ApiPayload for CreateQuotesResponse {
	fn attach_request_id(&mut self, request_id: Option<String>) {
		self.request_id = request_id;
	}
}
