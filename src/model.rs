//! Wire shapes for the GrabExpress delivery API.
//!
//! Field names follow the provider's camelCase convention, keeping its upper-case `ID` and
//! `URL` suffixes. Optional request fields are left off the wire when unset.

pub mod delivery;
pub mod quote;

pub use delivery::*;
pub use quote::*;

// std
use std::collections::BTreeMap;
// crates.io
use time::serde::rfc3339;
// self
use crate::_prelude::*;

/// Delivery service tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
	/// Courier is dispatched immediately.
	#[default]
	Instant,
	/// Delivered within the same day.
	SameDay,
}

/// How the delivery is paid for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
	/// Charged to the merchant account.
	#[default]
	Cashless,
	/// Paid in cash to the courier.
	Cash,
}

/// Lifecycle state of a delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
	/// Looking for a courier.
	Allocating,
	/// Courier is heading to the origin.
	PickingUp,
	/// Parcel is on its way to the destination.
	InDelivery,
	/// Parcel is being brought back to the sender.
	InReturn,
	/// Cancelled before completion.
	Canceled,
	/// Parcel was returned to the sender.
	Returned,
	/// Delivery could not be completed.
	Failed,
	/// Parcel was handed to the recipient.
	Completed,
	/// Status this client does not know about yet.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Package size in centimetres and weight in grams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
	/// Height in centimetres.
	pub height: u64,
	/// Width in centimetres.
	pub width: u64,
	/// Depth in centimetres.
	pub depth: u64,
	/// Weight in grams.
	pub weight: u64,
}

/// WGS84 position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
	/// Latitude in degrees.
	pub latitude: f64,
	/// Longitude in degrees.
	pub longitude: f64,
}

/// Named location used as a pickup or drop-off point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
	/// Free-form street address.
	pub address: String,
	/// Landmarks or building names that help the courier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub keywords: Option<String>,
	/// Provider city code, e.g. `JKT`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city_code: Option<String>,
	/// Position the courier navigates to.
	pub coordinates: Coordinates,
	/// Provider-specific extras passed through untouched.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<BTreeMap<String, String>>,
}

/// Item carried by the courier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
	/// Short item name.
	pub name: String,
	/// Item description shown to the courier.
	pub description: String,
	/// Number of identical items.
	pub quantity: u32,
	/// Declared value in the quote currency.
	pub price: f64,
	/// Size and weight of one item.
	pub dimensions: Dimensions,
}

/// Sender or recipient of a delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
	/// Given name.
	pub first_name: String,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Honorific, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Company the contact represents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub company_name: Option<String>,
	/// Email address.
	pub email: String,
	/// Phone number including the country code.
	pub phone: String,
	/// Whether the provider should send status SMS to this contact.
	#[serde(default)]
	pub sms_enabled: bool,
}

/// Timestamps of the delivery lifecycle; each is set once the stage is reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
	/// Order creation.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub create: Option<OffsetDateTime>,
	/// Courier allocation.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub allocate: Option<OffsetDateTime>,
	/// Parcel pickup.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub pickup: Option<OffsetDateTime>,
	/// Parcel drop-off.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub dropoff: Option<OffsetDateTime>,
	/// Delivery completion.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub completed: Option<OffsetDateTime>,
	/// Cancellation.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub cancel: Option<OffsetDateTime>,
	/// Failure.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub failed: Option<OffsetDateTime>,
	/// Return to the sender.
	#[serde(
		rename = "return",
		default,
		with = "rfc3339::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub returned: Option<OffsetDateTime>,
}
