//! Typed access to the migration annotation.

// self
use crate::{_prelude::*, config::AzureAdConfig};

/// Annotation whose value `"true"` marks a record as migrated to Microsoft Graph.
///
/// Missing, or present with any other value, means the deprecated Azure AD Graph flow stays in
/// effect. This crate only ever reads it.
pub const GRAPH_ENDPOINT_MIGRATED_ANNOTATION: &str = "auth.cattle.io/azuread-endpoint-migrated";

/// Interpretation of the migration annotation on a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationMark {
	/// Annotation present with the exact value `"true"`.
	Migrated,
	/// Annotation present with any other value, including `""` and `"TRUE"`.
	NotMigrated,
	/// Annotation absent.
	Absent,
}
impl MigrationMark {
	/// Interprets a raw annotation value.
	pub fn from_annotation(value: Option<&str>) -> Self {
		match value {
			Some("true") => MigrationMark::Migrated,
			Some(_) => MigrationMark::NotMigrated,
			None => MigrationMark::Absent,
		}
	}

	/// Returns true only for [`MigrationMark::Migrated`].
	pub const fn is_migrated(self) -> bool {
		matches!(self, MigrationMark::Migrated)
	}
}

impl AzureAdConfig {
	/// Reads the migration annotation as a [`MigrationMark`].
	pub fn migration_mark(&self) -> MigrationMark {
		MigrationMark::from_annotation(self.annotation(GRAPH_ENDPOINT_MIGRATED_ANNOTATION))
	}
}
