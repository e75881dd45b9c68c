// self
use crate::{_prelude::*, auth::ProviderId, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapping one service operation.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind, provider, and stage.
	pub fn new(kind: FlowKind, provider: &ProviderId, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth1_broker.flow",
				flow = kind.as_str(),
				provider = provider.as_ref(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, provider, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
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

/// Emits a `warn` event for a refresh attempted after its window closed.
pub fn refresh_window_expired(provider: &ProviderId, expired_at: OffsetDateTime) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			provider = provider.as_ref(),
			%expired_at,
			"Refresh window closed; stored token cleared."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (provider, expired_at);
	}
}

/// Emits a `debug` event describing a provider response that failed to parse.
pub fn token_response_rejected(kind: FlowKind, status: u16, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(flow = kind.as_str(), status, %reason, "Token endpoint response rejected.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, status, reason);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider() -> ProviderId {
		ProviderId::new("tracing-test").expect("Provider fixture should be valid.")
	}

	#[test]
	fn events_are_noops_without_a_subscriber() {
		refresh_window_expired(&provider(), OffsetDateTime::UNIX_EPOCH);
		token_response_rejected(FlowKind::AccessToken, 400, &"error=invalid_grant");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Refresh, &provider(), "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
