//! Thread-safe in-memory [`ConfigStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	config::{AzureAdConfig, ConfigName},
	store::{self, CompareAndSwapOutcome, ConfigStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<ConfigName, AzureAdConfig>>>;

/// Storage backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the number of stored records.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl ConfigStore for MemoryStore {
	fn save(&self, config: AzureAdConfig) -> StoreFuture<'_, AzureAdConfig> {
		let map = self.0.clone();

		Box::pin(async move { Ok(store::upsert(&mut map.write(), config)) })
	}

	fn fetch<'a>(&'a self, name: &'a ConfigName) -> StoreFuture<'a, Option<AzureAdConfig>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(name).cloned()) })
	}

	fn compare_and_swap<'a>(
		&'a self,
		name: &'a ConfigName,
		expected_version: u64,
		replacement: AzureAdConfig,
	) -> StoreFuture<'a, CompareAndSwapOutcome> {
		let map = self.0.clone();

		Box::pin(
			async move { Ok(store::swap(&mut map.write(), name, expected_version, replacement)) },
		)
	}
}
