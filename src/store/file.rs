//! Simple file-backed [`ConfigStore`] for single-node deployments.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	config::{AzureAdConfig, ConfigName},
	store::{self, CompareAndSwapOutcome, ConfigStore, StoreError, StoreFuture},
};

/// Persists records to a JSON file after each mutation.
///
/// A mutation only becomes visible in memory once the snapshot containing it is on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<ConfigName, AzureAdConfig>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<ConfigName, AzureAdConfig>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(HashMap::new());
		}

		let de = &mut serde_json::Deserializer::from_slice(&bytes);
		let records: Vec<AzureAdConfig> =
			serde_path_to_error::deserialize(de).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {} at `{}`: {}", path.display(), e.path(), e.inner()),
			})?;

		Ok(records.into_iter().map(|c| (c.name().clone(), c)).collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &HashMap<ConfigName, AzureAdConfig>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let mut snapshot: Vec<_> = contents.values().collect();

		snapshot.sort_by(|a, b| a.name().cmp(b.name()));

		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl ConfigStore for FileStore {
	fn save(&self, config: AzureAdConfig) -> StoreFuture<'_, AzureAdConfig> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();
			let stored = store::upsert(&mut next, config);

			self.persist_locked(&next)?;

			*guard = next;

			Ok(stored)
		})
	}

	fn fetch<'a>(&'a self, name: &'a ConfigName) -> StoreFuture<'a, Option<AzureAdConfig>> {
		Box::pin(async move { Ok(self.inner.read().get(name).cloned()) })
	}

	fn compare_and_swap<'a>(
		&'a self,
		name: &'a ConfigName,
		expected_version: u64,
		replacement: AzureAdConfig,
	) -> StoreFuture<'a, CompareAndSwapOutcome> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut next = guard.clone();
			let outcome = store::swap(&mut next, name, expected_version, replacement);

			if matches!(outcome, CompareAndSwapOutcome::Updated) {
				self.persist_locked(&next)?;

				*guard = next;
			}

			Ok(outcome)
		})
	}
}
