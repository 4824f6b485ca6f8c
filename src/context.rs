//! Per-call deadline and cancellation handling.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{_prelude::*, error::TransportError};

/// Caller-supplied limits applied to a single API call.
///
/// The limits cover the whole call: token acquisition, the HTTP exchange, and decoding.
/// Cancellation is checked before the call makes progress, so a token cancelled up front
/// never reaches the network.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	/// Deadline for the whole call.
	pub timeout: Option<StdDuration>,
	/// Token that aborts the call when cancelled.
	pub cancellation: Option<CancellationToken>,
}
impl CallContext {
	/// Creates a context without a deadline or cancellation token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Bounds the call by `timeout`.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Aborts the call once `token` is cancelled.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);

		self
	}

	/// Drives `fut` to completion unless the deadline passes or the call is cancelled.
	pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let bounded = async {
			match self.timeout {
				Some(limit) =>
					tokio::time::timeout(limit, fut).await.map_err(|_| TransportError::Timeout)?,
				None => fut.await,
			}
		};

		match &self.cancellation {
			Some(token) => tokio::select! {
				biased;

				_ = token.cancelled() => Err(TransportError::Cancelled.into()),
				result = bounded => result,
			},
			None => bounded.await,
		}
	}
}
