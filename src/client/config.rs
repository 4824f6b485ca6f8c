//! Client construction and validation.

// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_REFRESH_SKEW, TokenProvider, TokenSecret},
	client::{Client, ClientInner, ReqwestApiClient},
	decode::ApiRevision,
	error::ConfigError,
	http::{HttpTransport, ReqwestHttpClient},
	oauth::{ClientAuthMethod, ReqwestTransportErrorMapper, TokenFacade, TransportErrorMapper},
};

/// Builder collecting the settings a [`Client`] needs.
///
/// `api_key`, `secret`, `base_url`, and `token_url` are required; everything else has a
/// default. Validation happens in [`ClientBuilder::build`] and
/// [`ClientBuilder::build_with_transport`].
#[derive(Clone)]
pub struct ClientBuilder {
	api_key: Option<String>,
	secret: Option<TokenSecret>,
	base_url: Option<String>,
	token_url: Option<String>,
	revision: ApiRevision,
	http_client: Option<ReqwestClient>,
	client_auth_method: ClientAuthMethod,
	token_refresh_skew: Duration,
}
impl ClientBuilder {
	/// Creates a builder with default revision, auth method, and refresh skew.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the partner API key (OAuth client identifier).
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());

		self
	}

	/// Sets the partner secret (OAuth client secret).
	pub fn secret(mut self, secret: impl Into<String>) -> Self {
		self.secret = Some(TokenSecret::new(secret));

		self
	}

	/// Sets the API base URL, e.g. `https://partner-api.grab.com/grab-express`.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Sets the OAuth token endpoint.
	pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
		self.token_url = Some(token_url.into());

		self
	}

	/// Selects the API revision; defaults to [`ApiRevision::V1`].
	pub fn revision(mut self, revision: ApiRevision) -> Self {
		self.revision = revision;

		self
	}

	/// Uses a preconfigured reqwest client instead of the default one.
	///
	/// Only [`ClientBuilder::build`] consults this value.
	pub fn http_client(mut self, client: ReqwestClient) -> Self {
		self.http_client = Some(client);

		self
	}

	/// Chooses how credentials are presented to the token endpoint.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Sets how long before expiry a cached token is refreshed; defaults to 10 seconds.
	pub fn token_refresh_skew(mut self, skew: Duration) -> Self {
		self.token_refresh_skew = skew;

		self
	}

	/// Validates the settings and builds a client on the reqwest transport.
	pub fn build(mut self) -> Result<ReqwestApiClient> {
		let settings = self.validate()?;
		let transport = match self.http_client.take() {
			Some(client) => ReqwestHttpClient::with_client(client),
			None => ReqwestHttpClient::new()?,
		};

		Ok(Client::assemble(settings, Arc::new(transport), Arc::new(ReqwestTransportErrorMapper))?)
	}

	/// Validates the settings and builds a client on a caller-provided transport + mapper.
	pub fn build_with_transport<C, M>(
		self,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Client<C, M>>
	where
		C: ?Sized + HttpTransport,
		M: ?Sized + TransportErrorMapper<C::TransportError>,
	{
		let settings = self.validate()?;

		Ok(Client::assemble(settings, http_client.into(), mapper.into())?)
	}

	fn validate(&self) -> Result<Settings, ConfigError> {
		let api_key = non_blank(self.api_key.as_deref()).ok_or(ConfigError::CredentialsMissing)?;
		let secret = self
			.secret
			.clone()
			.filter(|secret| !secret.expose().trim().is_empty())
			.ok_or(ConfigError::CredentialsMissing)?;
		let base_url =
			parse_url(non_blank(self.base_url.as_deref()).ok_or(ConfigError::BaseUrlMissing)?)?;
		let token_url =
			parse_url(non_blank(self.token_url.as_deref()).ok_or(ConfigError::TokenUrlMissing)?)?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::invalid_url(base_url.as_str(), None));
		}

		Ok(Settings {
			api_key: api_key.to_owned(),
			secret,
			base_url,
			token_url,
			revision: self.revision,
			client_auth_method: self.client_auth_method,
			token_refresh_skew: self.token_refresh_skew,
		})
	}
}
impl Default for ClientBuilder {
	fn default() -> Self {
		Self {
			api_key: None,
			secret: None,
			base_url: None,
			token_url: None,
			revision: ApiRevision::default(),
			http_client: None,
			client_auth_method: ClientAuthMethod::default(),
			token_refresh_skew: DEFAULT_REFRESH_SKEW,
		}
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("api_key", &self.api_key)
			.field("secret_set", &self.secret.is_some())
			.field("base_url", &self.base_url)
			.field("token_url", &self.token_url)
			.field("revision", &self.revision)
			.field("custom_http_client", &self.http_client.is_some())
			.field("client_auth_method", &self.client_auth_method)
			.field("token_refresh_skew", &self.token_refresh_skew)
			.finish()
	}
}

struct Settings {
	api_key: String,
	secret: TokenSecret,
	base_url: Url,
	token_url: Url,
	revision: ApiRevision,
	client_auth_method: ClientAuthMethod,
	token_refresh_skew: Duration,
}

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn assemble(
		settings: Settings,
		http_client: Arc<C>,
		transport_mapper: Arc<M>,
	) -> Result<Self, ConfigError> {
		let facade = TokenFacade::new(
			&settings.api_key,
			&settings.secret,
			&settings.token_url,
			settings.client_auth_method,
			Arc::clone(&http_client),
			Arc::clone(&transport_mapper),
		)?;
		let tokens = TokenProvider::new(facade, settings.token_refresh_skew);

		Ok(Self {
			inner: Arc::new(ClientInner {
				api_key: settings.api_key,
				base_url: settings.base_url,
				revision: settings.revision,
				http_client,
				transport_mapper,
				tokens,
			}),
		})
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.trim().is_empty())
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
	let raw = raw.trim();

	Url::parse(raw).map_err(|source| ConfigError::invalid_url(raw, Some(source)))
}
