// self
use crate::{_prelude::*, migration::Region};

/// A span wrapping one rewrite attempt.
#[derive(Clone, Debug)]
pub struct RewriteSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RewriteSpan {
	/// Creates a new span tagged with the provided region + stage.
	pub fn new(region: Region, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"azuread_graph_migration.rewrite",
				region = region.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (region, stage);

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> RewriteSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RewriteSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RewriteSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RewriteSpan::entered`].
pub struct RewriteSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RewriteSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RewriteSpanGuard(..)")
	}
}

/// Emits the trace event for a record whose migration annotation is missing or not `"true"`.
pub fn trace_annotation_missing(config: &str, annotation: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::trace!(
			config,
			annotation,
			"Could not find the {annotation} annotation that specifies whether the Graph Endpoint has been migrated, or its value is not \"true\"; the old endpoint stays in use."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (config, annotation);
	}
}

/// Emits the info event for a rewrite refused because the graph endpoint is not deprecated.
pub fn info_rewrite_refused(config: &str, graph_endpoint: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(
			config,
			graph_endpoint,
			"Refusing to upgrade because the Graph Endpoint {graph_endpoint} is not deprecated."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (config, graph_endpoint);
	}
}
