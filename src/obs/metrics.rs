// self
use crate::{
	_prelude::*,
	obs::{OperationKind, OperationOutcome},
};

const NO_FAILURE: &str = "none";

/// Records that an operation is about to run.
pub fn record_operation_attempt(kind: OperationKind) {
	increment(kind, OperationOutcome::Attempt, NO_FAILURE);
}

/// Records how an operation ended, labelling failures by their [`FailureClass`].
///
/// [`FailureClass`]: crate::obs::FailureClass
pub fn record_operation_result<T>(kind: OperationKind, result: &Result<T>) {
	let failure = match result {
		Ok(_) => NO_FAILURE,
		Err(err) => crate::obs::FailureClass::from(err).as_str(),
	};

	increment(kind, OperationOutcome::of(result), failure);
}

fn increment(kind: OperationKind, outcome: OperationOutcome, failure: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"grabexpress_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str(),
			"failure" => failure
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome, failure);
	}
}
