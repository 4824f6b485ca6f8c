//! OAuth 2.0 client-credentials facade over the `oauth2` crate.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{BearerToken, TokenSecret},
	error::{AuthenticationError, ConfigError, TransportError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
};

/// Scope requested for every GrabExpress partner token.
pub const DELIVERY_SCOPE: &str = "grab_express.partner_deliveries";

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Maps HTTP transport failures into client [`TransportError`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a transport error.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> TransportError;
}

/// Default mapper for reqwest-backed transports.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		_metadata: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> TransportError {
		match err {
			HttpClientError::Reqwest(inner) => TransportError::from(*inner),
			HttpClientError::Http(inner) => TransportError::InvalidRequest(inner),
			HttpClientError::Io(inner) => TransportError::Io(inner),
			HttpClientError::Other(message) => TransportError::Other { message },
			_ => TransportError::Other { message: "unrecognized HTTP client failure".into() },
		}
	}
}

/// How the client authenticates itself at the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// HTTP Basic with the API key and secret.
	ClientSecretBasic,
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
}

pub(crate) struct TokenFacade<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> TokenFacade<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(
		api_key: &str,
		secret: &TokenSecret,
		token_url: &Url,
		method: ClientAuthMethod,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Result<Self, ConfigError> {
		let token_url = TokenUrl::new(token_url.to_string())
			.map_err(|source| ConfigError::invalid_url(token_url.as_str(), Some(source)))?;
		let mut oauth_client = BasicClient::new(ClientId::new(api_key.to_owned()))
			.set_client_secret(ClientSecret::new(secret.expose().to_owned()))
			.set_token_uri(token_url);

		if matches!(method, ClientAuthMethod::ClientSecretPost) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self { oauth_client, http_client, error_mapper })
	}

	/// Runs one client-credentials exchange; caching is the caller's concern.
	pub(crate) fn exchange_client_credentials(&self) -> FacadeFuture<'_, BearerToken> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let response = self
				.oauth_client
				.exchange_client_credentials()
				.add_scope(Scope::new(DELIVERY_SCOPE.to_owned()))
				.request_async(&instrumented)
				.await
				.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

			bearer_from_response(&response)
		})
	}
}

fn bearer_from_response(response: &BasicTokenResponse) -> Result<BearerToken> {
	let issued_at = OffsetDateTime::now_utc();
	// A missing or zero `expires_in` means the provider did not bound the token lifetime.
	let expires_at = match response.expires_in() {
		Some(lifetime) if !lifetime.is_zero() => {
			let expiry = i64::try_from(lifetime.as_secs())
				.ok()
				.and_then(|secs| issued_at.checked_add(Duration::seconds(secs)))
				.ok_or_else(|| AuthenticationError::UnexpectedResponse {
					message: "expires_in exceeds the supported range".into(),
					status: None,
				})?;

			Some(expiry)
		},
		_ => None,
	};

	Ok(BearerToken::new(response.access_token().secret().to_owned(), issued_at, expires_at))
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let status = meta.as_ref().and_then(|value| value.status);
	let err = match err {
		RequestTokenError::ServerResponse(response) => AuthenticationError::Rejected {
			error: response.error().as_ref().to_owned(),
			description: response.error_description().cloned(),
			status,
		},
		RequestTokenError::Request(error) =>
			AuthenticationError::Unreachable(mapper.map_transport_error(meta.as_ref(), error)),
		RequestTokenError::Parse(source, _body) =>
			AuthenticationError::MalformedResponse { source, status },
		RequestTokenError::Other(message) =>
			AuthenticationError::UnexpectedResponse { message, status },
	};

	err.into()
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::{AccessToken, EmptyExtraTokenFields, basic::BasicTokenType};
	// self
	use super::*;
	use crate::http::ReqwestHttpClient;

	fn facade(
		token_url: &str,
		method: ClientAuthMethod,
	) -> Result<TokenFacade<ReqwestHttpClient, ReqwestTransportErrorMapper>, ConfigError> {
		let url = Url::parse(token_url).expect("Token URL fixture should parse.");

		TokenFacade::new(
			"api-key",
			&TokenSecret::new("secret"),
			&url,
			method,
			Arc::new(ReqwestHttpClient::default()),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}

	#[test]
	fn builds_basic_and_post_facades() {
		let url = "https://example.com/oauth2/token";

		assert!(facade(url, ClientAuthMethod::ClientSecretBasic).is_ok());
		assert!(facade(url, ClientAuthMethod::ClientSecretPost).is_ok());
	}

	#[test]
	fn reqwest_mapper_keeps_other_messages() {
		let mapped = ReqwestTransportErrorMapper
			.map_transport_error(None, HttpClientError::Other("connection reset".into()));

		assert!(matches!(mapped, TransportError::Other { message } if message == "connection reset"));
	}

	#[test]
	fn zero_or_missing_lifetime_means_no_expiry() {
		let mut response = BasicTokenResponse::new(
			AccessToken::new("access".into()),
			BasicTokenType::Bearer,
			EmptyExtraTokenFields {},
		);
		let unbounded = bearer_from_response(&response).expect("Token should convert.");

		assert!(unbounded.expires_at.is_none());

		response.set_expires_in(Some(&std::time::Duration::ZERO));

		let zero = bearer_from_response(&response).expect("Token should convert.");

		assert!(zero.expires_at.is_none());

		response.set_expires_in(Some(&std::time::Duration::from_secs(600)));

		let bounded = bearer_from_response(&response).expect("Token should convert.");

		assert_eq!(bounded.expires_at, Some(bounded.issued_at + Duration::minutes(10)));
		assert_eq!(bounded.secret.expose(), "access");
	}
}
