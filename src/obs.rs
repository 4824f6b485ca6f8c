//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `grabexpress.operation` with the
//!   `operation` and `stage` fields. Once the call finishes the span also carries `outcome`,
//!   and failed calls add `failure`, `status`, and `request_id`.
//! - Enable `metrics` to increment the `grabexpress_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation`, `outcome`, and `failure`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, error::TransportError};

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Client-credentials token exchange.
	Token,
	/// `POST deliveries/quotes`.
	CreateQuotes,
	/// `POST deliveries`.
	CreateDelivery,
	/// `GET deliveries/{id}`.
	GetDelivery,
	/// `DELETE deliveries/{id}`.
	CancelDelivery,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Token => "token",
			OperationKind::CreateQuotes => "create_quotes",
			OperationKind::CreateDelivery => "create_delivery",
			OperationKind::GetDelivery => "get_delivery",
			OperationKind::CancelDelivery => "cancel_delivery",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}

	/// Maps a finished call onto its outcome label.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Coarse classification of a failed operation, derived from [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureClass {
	/// Local configuration or request assembly.
	Config,
	/// Token acquisition.
	Authentication,
	/// Caller deadline expired.
	Timeout,
	/// Caller cancelled the call.
	Cancelled,
	/// Any other transport failure.
	Transport,
	/// Undecodable response body.
	Decode,
	/// `v1` server-reported failure.
	Upstream,
	/// `v2` HTTP 429.
	TooManyRequests,
	/// `v2` HTTP 401.
	Unauthorized,
	/// `v2` HTTP 402 or 409.
	Api,
	/// `v2` unclassified failure.
	Unknown,
}
impl FailureClass {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureClass::Config => "config",
			FailureClass::Authentication => "authentication",
			FailureClass::Timeout => "timeout",
			FailureClass::Cancelled => "cancelled",
			FailureClass::Transport => "transport",
			FailureClass::Decode => "decode",
			FailureClass::Upstream => "upstream",
			FailureClass::TooManyRequests => "too_many_requests",
			FailureClass::Unauthorized => "unauthorized",
			FailureClass::Api => "api",
			FailureClass::Unknown => "unknown",
		}
	}
}
impl From<&Error> for FailureClass {
	fn from(err: &Error) -> Self {
		match err {
			Error::Config(_) => Self::Config,
			Error::Authentication(_) => Self::Authentication,
			Error::Transport(TransportError::Timeout) => Self::Timeout,
			Error::Transport(TransportError::Cancelled) => Self::Cancelled,
			Error::Transport(_) => Self::Transport,
			Error::Decode(_) => Self::Decode,
			Error::Upstream(_) => Self::Upstream,
			Error::TooManyRequests { .. } => Self::TooManyRequests,
			Error::Unauthorized { .. } => Self::Unauthorized,
			Error::Api { .. } => Self::Api,
			Error::Unknown { .. } => Self::Unknown,
		}
	}
}
impl Display for FailureClass {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
