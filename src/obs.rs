//! Optional observability helpers for the endpoint migration.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to emit the diagnostic events operators rely on: a trace event
//!   when the migration annotation is missing or not `"true"`, and an info event when a rewrite
//!   is refused. Rewrites run inside a span named `azuread_graph_migration.rewrite` with the
//!   `region` and `stage` fields.
//! - Enable `metrics` to increment the `azuread_graph_migration_rewrite_total` counter for every
//!   rewrite attempt, labeled by `region` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Result of a single rewrite attempt, as recorded by observability hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RewriteOutcome {
	/// The graph endpoint matched the deprecated value and was replaced.
	Rewritten,
	/// The graph endpoint did not match; nothing changed.
	Refused,
}
impl RewriteOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RewriteOutcome::Rewritten => "rewritten",
			RewriteOutcome::Refused => "refused",
		}
	}
}
impl Display for RewriteOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
