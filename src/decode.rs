//! Response decoding and error classification.
//!
//! [`decode_response`] is the single seam between the transport and the typed API surface.
//! It dispatches on [`ApiRevision`] because the two GrabExpress API generations report
//! failures differently: `v1` returns free text for every non-success status, while `v2`
//! classifies failures by status code and ships a structured payload for some of them.
//! Supporting a new revision means adding a variant and a branch here; the request builder
//! and transport stay untouched.

// crates.io
use oauth2::{HttpResponse, http::HeaderMap};
use serde::de::{DeserializeOwned, Deserializer, IgnoredAny};
// self
use crate::{
	_prelude::*,
	error::{DecodeError, UpstreamError},
	http,
};

/// Header carrying the provider's per-response correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-grabkit-grab-requestid";

/// GrabExpress API generation a client speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRevision {
	/// Paths under `/v1`.
	///
	/// `200` decodes the body, `204` succeeds without a body, and every other status becomes
	/// an [`UpstreamError`] carrying the status, raw body text, and correlation identifier.
	#[default]
	V1,
	/// Paths under `/v2`.
	///
	/// `429`, `401`, `402`/`409`, and other `>= 400` statuses are classified into dedicated
	/// [`Error`] variants; any status below `400` is a success.
	V2,
}
impl ApiRevision {
	/// Returns the path segment that prefixes every endpoint of this revision.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::V1 => "v1",
			Self::V2 => "v2",
		}
	}
}
impl Display for ApiRevision {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Typed response payload that can carry the response's correlation identifier.
///
/// `Default` supplies the value returned when a success response has no body.
pub trait ApiPayload
where
	Self: DeserializeOwned + Default,
{
	/// Stores the correlation identifier reported alongside the payload.
	fn attach_request_id(&mut self, request_id: Option<String>) {
		let _ = request_id;
	}
}

/// Payload that accepts and drops any JSON body; used where the caller only needs the status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Discard;
impl<'de> Deserialize<'de> for Discard {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		IgnoredAny::deserialize(deserializer).map(|_| Self)
	}
}
impl ApiPayload for Discard {}

/// Whether the caller needs a decoded body from a successful response.
///
/// Only `v2` honors [`Expectation::Empty`]; `v1` decodes every `200` body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expectation {
	/// Decode the body into the payload type.
	Body,
	/// Ignore any body on success.
	Empty,
}

#[derive(Deserialize)]
struct ErrorPayload {
	message: String,
}

/// Turns a buffered response into a typed payload or a classified [`Error`].
pub fn decode_response<T>(
	revision: ApiRevision,
	expectation: Expectation,
	response: HttpResponse,
) -> Result<T>
where
	T: ApiPayload,
{
	let request_id = request_id(response.headers());

	match revision {
		ApiRevision::V1 => decode_v1(response, request_id),
		ApiRevision::V2 => decode_v2(expectation, response, request_id),
	}
}

/// Extracts the correlation identifier, ignoring empty or non-ASCII values.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
	headers
		.get(REQUEST_ID_HEADER)
		.and_then(|value| value.to_str().ok())
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(ToOwned::to_owned)
}

fn decode_v1<T>(response: HttpResponse, request_id: Option<String>) -> Result<T>
where
	T: ApiPayload,
{
	match response.status().as_u16() {
		200 => decode_json(200, response.body(), request_id.clone()).map(|mut payload: T| {
			payload.attach_request_id(request_id);

			payload
		}),
		204 => Ok(empty_payload(request_id)),
		status => Err(UpstreamError {
			status,
			message: String::from_utf8_lossy(response.body()).into_owned(),
			request_id,
		}
		.into()),
	}
}

fn decode_v2<T>(
	expectation: Expectation,
	response: HttpResponse,
	request_id: Option<String>,
) -> Result<T>
where
	T: ApiPayload,
{
	match response.status().as_u16() {
		429 => Err(Error::TooManyRequests {
			retry_after: http::parse_retry_after(response.headers()),
			request_id,
		}),
		401 => Err(Error::Unauthorized { request_id }),
		status @ (402 | 409) => {
			let payload: ErrorPayload = decode_json(status, response.body(), request_id.clone())?;

			Err(Error::Api { status, message: payload.message, request_id })
		},
		status if status >= 400 => Err(Error::Unknown { status, request_id }),
		_ if expectation == Expectation::Empty => Ok(empty_payload(request_id)),
		status => decode_json(status, response.body(), request_id.clone()).map(|mut payload: T| {
			payload.attach_request_id(request_id);

			payload
		}),
	}
}

fn empty_payload<T>(request_id: Option<String>) -> T
where
	T: ApiPayload,
{
	let mut payload = T::default();

	payload.attach_request_id(request_id);

	payload
}

fn decode_json<T>(status: u16, body: &[u8], request_id: Option<String>) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError { status, request_id, source }.into())
}
