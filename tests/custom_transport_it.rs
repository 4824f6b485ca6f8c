// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex},
};
// self
use grabexpress::{
	ApiRevision, CallContext, Client, Error,
	error::{AuthenticationError, TransportError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http},
	},
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionReset,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Answers token requests and resets every API connection after recording a 503.
#[derive(Clone, Copy)]
struct FlakyTransport {
	token_ok: bool,
}
impl HttpTransport for FlakyTransport {
	type Handle = FlakyHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FlakyHandle { slot, token_ok: self.token_ok }
	}
}

struct FlakyHandle {
	slot: ResponseMetadataSlot,
	token_ok: bool,
}
impl<'a> AsyncHttpClient<'a> for FlakyHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let token_ok = self.token_ok;

		Box::pin(async move {
			assert!(slot.take().is_none(), "Metadata slot must be clear before dispatch.");

			if token_ok && request.uri().path() == "/token" {
				let response = http::Response::builder()
					.status(200)
					.header("content-type", "application/json")
					.body(br#"{"access_token":"fake","token_type":"bearer"}"#.to_vec())
					.expect("Token response fixture should build.");

				return Ok(response);
			}

			slot.store(ResponseMetadata { status: Some(503), retry_after: None });

			Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionReset)))
		})
	}
}

#[derive(Clone, Default)]
struct RecordingMapper {
	statuses: Arc<Mutex<Vec<Option<u16>>>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingMapper {
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<FakeTransportError>,
	) -> TransportError {
		self.statuses
			.lock()
			.expect("Recorder lock should not be poisoned.")
			.push(metadata.and_then(|meta| meta.status));

		match error {
			HttpClientError::Reqwest(inner) => TransportError::network(*inner),
			other => TransportError::Other { message: other.to_string() },
		}
	}
}

fn build(token_ok: bool, mapper: RecordingMapper) -> Client<FlakyTransport, RecordingMapper> {
	Client::builder()
		.api_key("key")
		.secret("secret")
		.base_url("https://api.example.test")
		.token_url("https://auth.example.test/token")
		.revision(ApiRevision::V2)
		.build_with_transport(FlakyTransport { token_ok }, mapper)
		.expect("Client should build on a custom transport.")
}

#[tokio::test]
async fn api_transport_failures_pass_through_the_mapper() {
	let mapper = RecordingMapper::default();
	let client = build(true, mapper.clone());
	let err = client
		.get_delivery(&CallContext::new(), "D1")
		.await
		.expect_err("A reset connection should fail the call.");

	match err {
		Error::Transport(TransportError::Network { source }) => {
			assert_eq!(source.to_string(), "Connection reset by peer.");
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	let statuses = mapper.statuses.lock().expect("Recorder lock should not be poisoned.").clone();

	assert_eq!(statuses, vec![Some(503)]);
}

#[tokio::test]
async fn token_transport_failures_become_unreachable() {
	let mapper = RecordingMapper::default();
	let client = build(false, mapper.clone());
	let err = client
		.cancel_delivery(&CallContext::new(), "D1")
		.await
		.expect_err("A failing token exchange should fail the call.");

	assert!(matches!(
		err,
		Error::Authentication(AuthenticationError::Unreachable(TransportError::Network { .. }))
	));
	assert_eq!(mapper.statuses.lock().expect("Recorder lock should not be poisoned.").len(), 1);
}
