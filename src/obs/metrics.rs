// self
use crate::{migration::Region, obs::RewriteOutcome};

/// Records a rewrite outcome via the global metrics recorder (when enabled).
pub fn record_rewrite_outcome(region: Region, outcome: RewriteOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"azuread_graph_migration_rewrite_total",
			"region" => region.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (region, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_rewrite_outcome_noop_without_metrics() {
		record_rewrite_outcome(Region::China, RewriteOutcome::Refused);
	}
}
