//! Delivery booking and tracking shapes.

// crates.io
use time::serde::rfc3339;
// self
use crate::{
	_prelude::*,
	decode::ApiPayload,
	model::{
		Contact, Coordinates, DeliveryStatus, Package, PaymentMethod, Quote, ServiceType,
		Timeline, Waypoint,
	},
};

/// Pickup window for a scheduled delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
	/// Earliest pickup time.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub pickup_time_from: Option<OffsetDateTime>,
	/// Latest pickup time.
	#[serde(default, with = "rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub pickup_time_to: Option<OffsetDateTime>,
}

/// Amount the courier collects from the recipient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashOnDelivery {
	/// Amount in the delivery currency.
	pub amount: f64,
}

/// Body of `POST deliveries`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryRequest {
	/// Merchant-side order reference; must be unique per merchant.
	#[serde(rename = "merchantOrderID")]
	pub merchant_order_id: String,
	/// Service tier to book.
	pub service_type: ServiceType,
	/// Payment method; the provider falls back to the account default when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_method: Option<PaymentMethod>,
	/// Items to be delivered.
	pub packages: Vec<Package>,
	/// Cash the courier collects on drop-off.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cash_on_delivery: Option<CashOnDelivery>,
	/// Party handing over the parcel.
	pub sender: Contact,
	/// Party receiving the parcel.
	pub recipient: Contact,
	/// Pickup point.
	pub origin: Waypoint,
	/// Drop-off point.
	pub destination: Waypoint,
	/// Pickup window; immediate dispatch when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub schedule: Option<Schedule>,
}

/// Vehicle assigned to a delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
	/// Registration plate.
	pub license_plate: String,
	/// Make and model.
	pub model: String,
	/// Provider vehicle category, e.g. `BIKE` or `CAR`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub physical_vehicle_type: Option<String>,
}

/// Courier handling a delivery.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
	/// Courier display name.
	pub name: String,
	/// Courier phone number.
	pub phone: String,
	/// Profile picture.
	#[serde(rename = "pictureURL", default, skip_serializing_if = "Option::is_none")]
	pub picture_url: Option<String>,
	/// Average rating.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rating: Option<f64>,
	/// Last reported position.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub coordinates: Option<Coordinates>,
	/// Assigned vehicle.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub vehicle: Option<Vehicle>,
}

/// Booked delivery as reported by the provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Delivery {
	/// Provider delivery identifier.
	#[serde(rename = "deliveryID")]
	pub delivery_id: String,
	/// Merchant-side order reference.
	#[serde(rename = "merchantOrderID")]
	pub merchant_order_id: String,
	/// Quote the delivery was booked against.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quote: Option<Quote>,
	/// Party handing over the parcel.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sender: Option<Contact>,
	/// Party receiving the parcel.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub recipient: Option<Contact>,
	/// Current lifecycle state.
	pub status: DeliveryStatus,
	/// Public tracking page.
	#[serde(rename = "trackingURL", skip_serializing_if = "Option::is_none")]
	pub tracking_url: Option<String>,
	/// Courier, once allocated.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub courier: Option<Courier>,
	/// Lifecycle timestamps reached so far.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeline: Option<Timeline>,
	/// Pickup window, for scheduled deliveries.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schedule: Option<Schedule>,
	/// Cash the courier collects on drop-off.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cash_on_delivery: Option<CashOnDelivery>,
	/// Provider invoice number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub invoice_no: Option<String>,
	/// PIN the sender gives the courier at pickup.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pickup_pin: Option<String>,
	/// Correlation identifier of the response.
	#[serde(skip)]
	pub request_id: Option<String>,
}
impl ApiPayload for Delivery {
	fn attach_request_id(&mut self, request_id: Option<String>) {
		self.request_id = request_id;
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn request_keeps_provider_acronyms() {
		let request = CreateDeliveryRequest {
			merchant_order_id: "order-42".into(),
			payment_method: Some(PaymentMethod::Cash),
			cash_on_delivery: Some(CashOnDelivery { amount: 25.0 }),
			..Default::default()
		};
		let wire = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(wire["merchantOrderID"], json!("order-42"));
		assert_eq!(wire["serviceType"], json!("INSTANT"));
		assert_eq!(wire["paymentMethod"], json!("CASH"));
		assert_eq!(wire["cashOnDelivery"], json!({ "amount": 25.0 }));
		assert!(wire.get("schedule").is_none());
	}

	#[test]
	fn delivery_decodes_tracking_fields() {
		let delivery: Delivery = serde_json::from_value(json!({
			"deliveryID": "IN-2-0000",
			"merchantOrderID": "order-42",
			"status": "IN_DELIVERY",
			"trackingURL": "https://express.grab.com/track/IN-2-0000",
			"courier": {
				"name": "Budi",
				"phone": "628111",
				"pictureURL": "https://example.com/budi.png",
				"vehicle": { "licensePlate": "B 1234 XYZ", "model": "Honda Beat" }
			},
			"timeline": { "create": "2025-03-01T08:00:00Z" },
			"pickupPin": "1234"
		}))
		.expect("A tracking payload should decode.");

		assert_eq!(delivery.delivery_id, "IN-2-0000");
		assert_eq!(delivery.status, DeliveryStatus::InDelivery);
		assert_eq!(
			delivery.tracking_url.as_deref(),
			Some("https://express.grab.com/track/IN-2-0000")
		);

		let courier = delivery.courier.expect("Courier should be present.");

		assert_eq!(courier.picture_url.as_deref(), Some("https://example.com/budi.png"));
		assert_eq!(courier.vehicle.map(|vehicle| vehicle.license_plate), Some("B 1234 XYZ".into()));
		assert_eq!(delivery.pickup_pin.as_deref(), Some("1234"));
	}
}
