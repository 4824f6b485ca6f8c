// self
use crate::{_prelude::*, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one client operation.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the operation kind + stage.
	///
	/// The `outcome`, `failure`, `status`, and `request_id` fields start empty and are filled by
	/// [`OperationSpan::record_result`].
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"grabexpress.operation",
				operation = kind.as_str(),
				stage,
				outcome = tracing::field::Empty,
				failure = tracing::field::Empty,
				status = tracing::field::Empty,
				request_id = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments a future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records how the operation ended.
	///
	/// Failures carry their [`FailureClass`] plus the HTTP status and request id reported by
	/// GrabExpress, when the error holds them.
	pub fn record_result<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			use crate::obs::{FailureClass, OperationOutcome};

			self.span.record("outcome", OperationOutcome::of(result).as_str());

			if let Err(err) = result {
				self.span.record("failure", FailureClass::from(err).as_str());

				if let Some(status) = err.status() {
					self.span.record("status", u64::from(status));
				}
				if let Some(request_id) = err.request_id() {
					self.span.record("request_id", request_id);
				}
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[cfg(feature = "tracing")]
	mod capture {
		// crates.io
		use tracing::{
			Event, Metadata, Subscriber,
			field::{Field, Visit},
			span::{Attributes, Id, Record},
		};
		// self
		use crate::_prelude::*;

		/// Subscriber that keeps every span field it sees as `(name, value)` pairs.
		#[derive(Clone, Default)]
		pub(super) struct FieldCapture(pub(super) Arc<Mutex<Vec<(String, String)>>>);
		impl FieldCapture {
			pub(super) fn get(&self, name: &str) -> Option<String> {
				let fields = self.0.lock();

				fields.iter().rev().find(|(field, _)| field == name).map(|(_, value)| value.clone())
			}
		}
		impl Subscriber for FieldCapture {
			fn enabled(&self, _: &Metadata<'_>) -> bool {
				true
			}

			fn new_span(&self, span: &Attributes<'_>) -> Id {
				span.record(&mut FieldVisitor(&self.0));

				Id::from_u64(1)
			}

			fn record(&self, _: &Id, values: &Record<'_>) {
				values.record(&mut FieldVisitor(&self.0));
			}

			fn record_follows_from(&self, _: &Id, _: &Id) {}

			fn event(&self, _: &Event<'_>) {}

			fn enter(&self, _: &Id) {}

			fn exit(&self, _: &Id) {}
		}

		struct FieldVisitor<'a>(&'a Mutex<Vec<(String, String)>>);
		impl Visit for FieldVisitor<'_> {
			fn record_str(&mut self, field: &Field, value: &str) {
				self.0.lock().push((field.name().to_owned(), value.to_owned()));
			}

			fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
				self.0.lock().push((field.name().to_owned(), format!("{value:?}")));
			}
		}
	}

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = OperationSpan::new(OperationKind::Token, "instrument");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn record_result_accepts_both_outcomes() {
		let span = OperationSpan::new(OperationKind::GetDelivery, "dispatch");

		span.record_result(&Ok::<_, Error>(()));
		span.record_result::<()>(&Err(Error::Unauthorized { request_id: None }));
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn failures_record_status_and_request_id() {
		let capture = capture::FieldCapture::default();

		tracing::subscriber::with_default(capture.clone(), || {
			let span = OperationSpan::new(OperationKind::CancelDelivery, "dispatch");

			span.record_result::<()>(&Err(Error::Api {
				status: 409,
				message: "Delivery already picked up".into(),
				request_id: Some("req-409".into()),
			}));
		});

		assert_eq!(capture.get("operation").as_deref(), Some("cancel_delivery"));
		assert_eq!(capture.get("outcome").as_deref(), Some("failure"));
		assert_eq!(capture.get("failure").as_deref(), Some("api"));
		assert_eq!(capture.get("status").as_deref(), Some("409"));
		assert_eq!(capture.get("request_id").as_deref(), Some("req-409"));
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn successes_leave_failure_fields_empty() {
		let capture = capture::FieldCapture::default();

		tracing::subscriber::with_default(capture.clone(), || {
			let span = OperationSpan::new(OperationKind::CreateQuotes, "dispatch");

			span.record_result(&Ok::<_, Error>(()));
		});

		assert_eq!(capture.get("outcome").as_deref(), Some("success"));
		assert_eq!(capture.get("status"), None);
		assert_eq!(capture.get("request_id"), None);
	}
}
