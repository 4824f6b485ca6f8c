//! The four GrabExpress delivery operations.

// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	client::Client,
	context::CallContext,
	decode::{Discard, Expectation},
	http::HttpTransport,
	model::{CreateDeliveryRequest, CreateQuotesRequest, CreateQuotesResponse, Delivery},
	oauth::TransportErrorMapper,
	obs::OperationKind,
};

const NO_BODY: Option<&()> = None;

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Requests delivery quotes for every service tier available between two waypoints.
	pub async fn create_quotes(
		&self,
		ctx: &CallContext,
		request: &CreateQuotesRequest,
	) -> Result<CreateQuotesResponse> {
		self.dispatch(
			ctx,
			OperationKind::CreateQuotes,
			Method::POST,
			&["deliveries", "quotes"],
			Some(request),
			Expectation::Body,
		)
		.await
	}

	/// Books a delivery.
	pub async fn create_delivery(
		&self,
		ctx: &CallContext,
		request: &CreateDeliveryRequest,
	) -> Result<Delivery> {
		self.dispatch(
			ctx,
			OperationKind::CreateDelivery,
			Method::POST,
			&["deliveries"],
			Some(request),
			Expectation::Body,
		)
		.await
	}

	/// Fetches the current state of a delivery.
	pub async fn get_delivery(&self, ctx: &CallContext, delivery_id: &str) -> Result<Delivery> {
		self.dispatch(
			ctx,
			OperationKind::GetDelivery,
			Method::GET,
			&["deliveries", delivery_id],
			NO_BODY,
			Expectation::Body,
		)
		.await
	}

	/// Cancels a delivery.
	///
	/// Under `v1` a `200` body must still be valid JSON, although its content is discarded;
	/// `204` needs no body. Under `v2` any success body is ignored.
	pub async fn cancel_delivery(&self, ctx: &CallContext, delivery_id: &str) -> Result<()> {
		self.dispatch::<(), Discard>(
			ctx,
			OperationKind::CancelDelivery,
			Method::DELETE,
			&["deliveries", delivery_id],
			NO_BODY,
			Expectation::Empty,
		)
		.await
		.map(|Discard| ())
	}
}
