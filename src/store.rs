//! Storage contracts and built-in store implementations for auth config records.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	config::{AzureAdConfig, ConfigName},
};

/// Boxed future returned by [`ConfigStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by auth config stores.
///
/// Every successful write bumps `metadata.resource_version` so concurrent writers can detect
/// each other through [`ConfigStore::compare_and_swap`].
pub trait ConfigStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the record stored under its name and returns the stored copy.
	fn save(&self, config: AzureAdConfig) -> StoreFuture<'_, AzureAdConfig>;

	/// Fetches the record stored under `name`, if present.
	fn fetch<'a>(&'a self, name: &'a ConfigName) -> StoreFuture<'a, Option<AzureAdConfig>>;

	/// Replaces the record only if its stored resource version equals `expected_version`.
	fn compare_and_swap<'a>(
		&'a self,
		name: &'a ConfigName,
		expected_version: u64,
		replacement: AzureAdConfig,
	) -> StoreFuture<'a, CompareAndSwapOutcome>;
}

/// Result of a compare-and-swap attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareAndSwapOutcome {
	/// The versions matched and the record was replaced.
	Updated,
	/// The record exists but was written since it was read.
	VersionMismatch,
	/// No record is stored under the name.
	Missing,
}

/// Error type produced by [`ConfigStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

type Records = HashMap<ConfigName, AzureAdConfig>;

fn upsert(records: &mut Records, mut config: AzureAdConfig) -> AzureAdConfig {
	let previous = records.get(config.name()).map_or(0, |c| c.metadata.resource_version);

	config.metadata.resource_version = previous + 1;
	records.insert(config.name().clone(), config.clone());

	config
}

fn swap(
	records: &mut Records,
	name: &ConfigName,
	expected_version: u64,
	mut replacement: AzureAdConfig,
) -> CompareAndSwapOutcome {
	match records.get(name) {
		Some(existing) if existing.metadata.resource_version == expected_version => {
			replacement.metadata.name = name.clone();
			replacement.metadata.resource_version = expected_version + 1;
			records.insert(name.clone(), replacement);

			CompareAndSwapOutcome::Updated
		},
		Some(_) => CompareAndSwapOutcome::VersionMismatch,
		None => CompareAndSwapOutcome::Missing,
	}
}
