//! Client-level error types shared by the token provider, transport, and decoder.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by every public operation.
///
/// Lower-layer failures (serialization, token acquisition, transport, decoding) are folded
/// into this enum before they cross the API surface. Server-reported failures take one of two
/// shapes depending on the [`ApiRevision`](crate::ApiRevision) the client was built for:
/// [`Error::Upstream`] for `v1`, and the status-classified variants for `v2`.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-assembly problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Bearer token could not be obtained from the token endpoint.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Transport failure (network, timeout, cancellation).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// `v1` server-reported failure carrying the raw response text.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),

	/// `v2` rate limit signal (HTTP 429).
	#[error("GrabExpress is rate limiting this client.")]
	TooManyRequests {
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Correlation identifier of the rejected request.
		request_id: Option<String>,
	},
	/// `v2` bearer token rejected by the API (HTTP 401).
	#[error("GrabExpress rejected the bearer token.")]
	Unauthorized {
		/// Correlation identifier of the rejected request.
		request_id: Option<String>,
	},
	/// `v2` structured API failure (HTTP 402 or 409).
	#[error("GrabExpress API error: {message}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Provider-supplied message.
		message: String,
		/// Correlation identifier of the failed request.
		request_id: Option<String>,
	},
	/// `v2` failure without a recognized classification.
	#[error("GrabExpress returned an unexpected status {status}.")]
	Unknown {
		/// HTTP status code.
		status: u16,
		/// Correlation identifier of the failed request.
		request_id: Option<String>,
	},
}
impl Error {
	/// HTTP status reported by the GrabExpress API or token endpoint, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Authentication(e) => e.status(),
			Self::Decode(e) => Some(e.status),
			Self::Upstream(e) => Some(e.status),
			Self::TooManyRequests { .. } => Some(429),
			Self::Unauthorized { .. } => Some(401),
			Self::Api { status, .. } | Self::Unknown { status, .. } => Some(*status),
			Self::Config(_) | Self::Transport(_) => None,
		}
	}

	/// Correlation identifier (`X-Grabkit-Grab-Requestid`) of the failed request, if any.
	pub fn request_id(&self) -> Option<&str> {
		match self {
			Self::Decode(e) => e.request_id.as_deref(),
			Self::Upstream(e) => e.request_id.as_deref(),
			Self::TooManyRequests { request_id, .. }
			| Self::Unauthorized { request_id }
			| Self::Api { request_id, .. }
			| Self::Unknown { request_id, .. } => request_id.as_deref(),
			Self::Config(_) | Self::Authentication(_) | Self::Transport(_) => None,
		}
	}
}

/// Configuration and request-assembly failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// API key or secret is empty.
	#[error("API key credentials are missing.")]
	CredentialsMissing,
	/// Base URL is empty.
	#[error("Base URL is missing.")]
	BaseUrlMissing,
	/// Token URL is empty.
	#[error("Token URL is missing.")]
	TokenUrlMissing,
	/// A configured or derived URL cannot be used.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure, when the URL did not parse at all.
		#[source]
		source: Option<url::ParseError>,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized to JSON.")]
	EncodeBody(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_url(url: impl Into<String>, source: Option<url::ParseError>) -> Self {
		Self::InvalidUrl { url: url.into(), source }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token acquisition failures.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint answered with an OAuth error (bad key/secret, unsupported scope, ...).
	#[error("Token endpoint rejected the client credentials: {error}.")]
	Rejected {
		/// OAuth `error` code.
		error: String,
		/// OAuth `error_description`, when supplied.
		description: Option<String>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint could not be reached.
	#[error("Token endpoint is unreachable.")]
	Unreachable(#[source] TransportError),
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned something the client cannot use.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl AuthenticationError {
	/// HTTP status returned by the token endpoint, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. }
			| Self::MalformedResponse { status, .. }
			| Self::UnexpectedResponse { status, .. } => *status,
			Self::Unreachable(_) => None,
		}
	}
}

/// Transport-level failures (network, IO, caller-imposed limits).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling GrabExpress.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling GrabExpress.")]
	Io(#[from] std::io::Error),
	/// The transport could not turn the request into a wire request.
	#[error("HTTP request could not be dispatched.")]
	InvalidRequest(#[source] oauth2::http::Error),
	/// The call exceeded its deadline.
	#[error("Call timed out before GrabExpress responded.")]
	Timeout,
	/// The caller cancelled the call.
	#[error("Call was cancelled by the caller.")]
	Cancelled,
	/// Transport-specific failure without a richer classification.
	#[error("HTTP client error occurred while calling GrabExpress: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

/// Response body did not match the expected shape.
#[derive(Debug, ThisError)]
#[error("Response body with status {status} could not be decoded.")]
pub struct DecodeError {
	/// HTTP status code of the undecodable response.
	pub status: u16,
	/// Correlation identifier of the response.
	pub request_id: Option<String>,
	/// Structured parsing failure, including the path of the offending field.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

/// Uniform `v1` server error carrying the status, response text, and correlation identifier.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("GrabExpress returned status {status}: {message}")]
pub struct UpstreamError {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body text; empty when the response had no body.
	pub message: String,
	/// Correlation identifier of the failed request.
	pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accessors_expose_status_and_request_id() {
		let upstream: Error = UpstreamError {
			status: 404,
			message: "delivery not found".into(),
			request_id: Some("req-1".into()),
		}
		.into();

		assert_eq!(upstream.status(), Some(404));
		assert_eq!(upstream.request_id(), Some("req-1"));

		let throttled = Error::TooManyRequests { retry_after: None, request_id: None };

		assert_eq!(throttled.status(), Some(429));
		assert_eq!(throttled.request_id(), None);

		let config: Error = ConfigError::CredentialsMissing.into();

		assert_eq!(config.status(), None);
		assert_eq!(config.to_string(), "API key credentials are missing.");
	}

	#[test]
	fn authentication_error_keeps_transport_source() {
		let err: Error = AuthenticationError::Unreachable(TransportError::Timeout).into();
		let source = StdError::source(&err)
			.expect("Authentication error should expose the transport failure as its source.");

		assert_eq!(source.to_string(), TransportError::Timeout.to_string());
		assert_eq!(err.status(), None);
	}
}
