//! Request assembly, execution, and decoding shared by every operation.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::Client,
	context::CallContext,
	decode::{self, ApiPayload, Expectation},
	error::ConfigError,
	http::{HttpTransport, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, OperationKind, OperationSpan},
};

const JSON: &str = "application/json";

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Runs one API call end to end inside `ctx`.
	///
	/// The body is serialized before a token is requested, so encoding failures never reach
	/// the token endpoint.
	pub(crate) async fn dispatch<B, T>(
		&self,
		ctx: &CallContext,
		kind: OperationKind,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
		expectation: Expectation,
	) -> Result<T>
	where
		B: ?Sized + Serialize + Sync,
		T: ApiPayload,
	{
		let span = OperationSpan::new(kind, "dispatch");

		obs::record_operation_attempt(kind);

		let result = span
			.instrument(ctx.run(async {
				let request = self.build_request(method, segments, body).await?;
				let response = self.execute(request).await?;

				decode::decode_response(self.inner.revision, expectation, response)
			}))
			.await;

		span.record_result(&result);
		obs::record_operation_result(kind, &result);

		result
	}

	pub(crate) async fn build_request<B>(
		&self,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<HttpRequest>
	where
		B: ?Sized + Serialize,
	{
		let body = encode_body(body)?;
		let url = self.endpoint(segments)?;
		let token = self.inner.tokens.token().await?;

		Ok(assemble_request(method, &url, body, &token)?)
	}

	/// Resolves `segments` under the revision prefix, percent-encoding each segment.
	///
	/// Rejects empty, `.`, and `..` segments, which would otherwise resolve to a parent
	/// resource.
	pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
		let base = &self.inner.base_url;

		if segments.iter().any(|segment| matches!(*segment, "" | "." | "..")) {
			let base = base.as_str().trim_end_matches('/');
			let raw = format!("{base}/{}/{}", self.inner.revision, segments.join("/"));

			return Err(ConfigError::invalid_url(raw, None));
		}

		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::invalid_url(base.as_str(), None))?
			.pop_if_empty()
			.push(self.inner.revision.as_str())
			.extend(segments);

		Ok(url)
	}

	async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		let slot = ResponseMetadataSlot::default();
		let handle = self.inner.http_client.with_metadata(slot.clone());

		handle.call(request).await.map_err(|err| {
			Error::from(self.inner.transport_mapper.map_transport_error(slot.take().as_ref(), err))
		})
	}
}

fn encode_body<B>(body: Option<&B>) -> Result<Option<Vec<u8>>, ConfigError>
where
	B: ?Sized + Serialize,
{
	body.map(serde_json::to_vec).transpose().map_err(ConfigError::EncodeBody)
}

fn assemble_request(
	method: Method,
	url: &Url,
	body: Option<Vec<u8>>,
	token: &TokenSecret,
) -> Result<HttpRequest, ConfigError> {
	let mut builder = Request::builder()
		.method(method)
		.uri(url.as_str())
		.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
		.header(ACCEPT, JSON);
	let body = match body {
		Some(bytes) => {
			builder = builder.header(CONTENT_TYPE, JSON);

			bytes
		},
		None => Vec::new(),
	};

	Ok(builder.body(body)?)
}
