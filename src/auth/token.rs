//! Bearer token record and the per-client token cache.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	http::HttpTransport,
	oauth::{TokenFacade, TransportErrorMapper},
	obs::{self, OperationKind, OperationSpan},
};

/// How long before expiry a cached token stops being handed out.
pub(crate) const DEFAULT_REFRESH_SKEW: Duration = Duration::seconds(10);

/// Access token issued by the token endpoint.
#[derive(Clone)]
pub(crate) struct BearerToken {
	pub(crate) secret: TokenSecret,
	pub(crate) issued_at: OffsetDateTime,
	/// `None` when the provider did not bound the lifetime.
	pub(crate) expires_at: Option<OffsetDateTime>,
}
impl BearerToken {
	pub(crate) fn new(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_at: Option<OffsetDateTime>,
	) -> Self {
		Self { secret: TokenSecret::new(secret), issued_at, expires_at }
	}

	/// Whether the token can still be attached to a request issued at `instant`.
	pub(crate) fn is_usable_at(&self, instant: OffsetDateTime, skew: Duration) -> bool {
		match self.expires_at {
			None => true,
			Some(expires_at) =>
				instant.checked_add(skew).is_some_and(|deadline| deadline < expires_at),
		}
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BearerToken")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Client-credentials token source with a singleflight cache.
///
/// The cache lock is held across the exchange, so concurrent callers that find the cache
/// empty or stale wait for the first caller's exchange instead of hitting the token
/// endpoint themselves.
pub(crate) struct TokenProvider<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	facade: TokenFacade<C, M>,
	cache: AsyncMutex<Option<BearerToken>>,
	refresh_skew: Duration,
}
impl<C, M> TokenProvider<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(facade: TokenFacade<C, M>, refresh_skew: Duration) -> Self {
		Self { facade, cache: AsyncMutex::new(None), refresh_skew }
	}

	/// Returns a usable bearer token, exchanging credentials when the cache is empty or stale.
	pub(crate) async fn token(&self) -> Result<TokenSecret> {
		const KIND: OperationKind = OperationKind::Token;

		let mut cached = self.cache.lock().await;
		let now = OffsetDateTime::now_utc();

		if let Some(current) =
			cached.as_ref().filter(|token| token.is_usable_at(now, self.refresh_skew))
		{
			return Ok(current.secret.clone());
		}

		let span = OperationSpan::new(KIND, "exchange");

		obs::record_operation_attempt(KIND);

		let result = span.instrument(self.facade.exchange_client_credentials()).await;

		span.record_result(&result);
		obs::record_operation_result(KIND, &result);

		let fresh = result?;
		let secret = fresh.secret.clone();

		*cached = Some(fresh);

		Ok(secret)
	}

	/// Drops the cached token so the next call performs a new exchange.
	pub(crate) async fn invalidate(&self) {
		*self.cache.lock().await = None;
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn usability_honors_skew_and_missing_expiry() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token =
			BearerToken::new("access", issued, Some(macros::datetime!(2025-01-01 01:00 UTC)));

		assert!(token.is_usable_at(macros::datetime!(2025-01-01 00:59:00 UTC), Duration::ZERO));
		assert!(!token.is_usable_at(
			macros::datetime!(2025-01-01 00:59:55 UTC),
			Duration::seconds(10)
		));
		assert!(!token.is_usable_at(macros::datetime!(2025-01-01 01:00 UTC), Duration::ZERO));

		let unbounded = BearerToken::new("access", issued, None);

		assert!(
			unbounded.is_usable_at(macros::datetime!(2999-01-01 00:00 UTC), DEFAULT_REFRESH_SKEW)
		);
	}

	#[test]
	fn debug_redacts_secret() {
		let token = BearerToken::new("super-secret", OffsetDateTime::UNIX_EPOCH, None);

		assert!(!format!("{token:?}").contains("super-secret"));
	}
}
