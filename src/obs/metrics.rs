// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_broker_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts refreshes rejected because the refresh window had already closed.
pub fn record_refresh_expired() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oauth1_broker_refresh_expired_total").increment(1);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_noops_without_an_exporter() {
		record_flow_outcome(FlowKind::AccessToken, FlowOutcome::Failure);
		record_refresh_expired();
	}
}
