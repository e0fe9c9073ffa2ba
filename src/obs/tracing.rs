// self
use crate::_prelude::*;
#[cfg(feature = "tracing")] use crate::obs::RequestOutcome;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping a single token request task.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("quickbin.token_request", stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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
}

/// Logs a finished request inside the current span (when enabled).
pub fn log_request_outcome(result: &Result<()>) {
	#[cfg(feature = "tracing")]
	{
		match result {
			Ok(()) =>
				tracing::debug!(outcome = RequestOutcome::Success.as_str(), "Token requested."),
			Err(e) => tracing::warn!(
				outcome = RequestOutcome::of(result).as_str(),
				error = %e,
				"Token request failed."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = result;
	}
}
