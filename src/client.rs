//! GrabExpress API client: shared state, construction, and the public operations.
//!
//! A [`Client`] owns the HTTP transport, the transport error mapper, and the bearer token
//! cache. Clones share all three, so one client can serve every task in a process.

mod api;
mod config;
mod request;

pub use config::*;

// self
use crate::{
	_prelude::*,
	auth::TokenProvider,
	decode::ApiRevision,
	http::{HttpTransport, ReqwestHttpClient},
	oauth::{ReqwestTransportErrorMapper, TransportErrorMapper},
};

/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Authenticated GrabExpress delivery API client.
///
/// Build one with [`Client::builder`]; use [`ClientBuilder::build_with_transport`] to plug in
/// a custom [`HttpTransport`].
pub struct Client<C = ReqwestHttpClient, M = ReqwestTransportErrorMapper>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	inner: Arc<ClientInner<C, M>>,
}
impl ReqwestApiClient {
	/// Starts configuring a client backed by the default reqwest transport.
	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}
}
impl<C, M> Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// API revision every request is issued against.
	pub fn revision(&self) -> ApiRevision {
		self.inner.revision
	}

	/// Base URL the revision prefix and endpoint paths are appended to.
	pub fn base_url(&self) -> &Url {
		&self.inner.base_url
	}

	/// Drops the cached bearer token so the next call exchanges credentials again.
	pub async fn invalidate_token(&self) {
		self.inner.tokens.invalidate().await;
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self { inner: Arc::clone(&self.inner) }
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api_key", &self.inner.api_key)
			.field("base_url", &self.inner.base_url.as_str())
			.field("revision", &self.inner.revision)
			.finish()
	}
}

struct ClientInner<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	api_key: String,
	base_url: Url,
	revision: ApiRevision,
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	tokens: TokenProvider<C, M>,
}
