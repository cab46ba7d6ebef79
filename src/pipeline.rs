//! Store-backed orchestration around the migration core.
//!
//! [`Migrator`] is what an authentication pipeline calls: [`Migrator::graph_flow`] at login time
//! to pick the graph service, and [`Migrator::upgrade`] when an administrator asks for the
//! endpoints to be upgraded. Marking a record as migrated (the annotation) stays with the
//! caller.

// self
use crate::{
	_prelude::*,
	config::{AzureAdConfig, ConfigName},
	migration::{self, EndpointState, Region},
	store::{CompareAndSwapOutcome, ConfigStore},
};

/// Graph service a login against the record should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFlow {
	/// Provider is disabled or has no graph endpoint.
	Disabled,
	/// Deprecated Azure AD Graph flow.
	AzureAdGraph,
	/// Microsoft Graph flow.
	MicrosoftGraph,
}
impl GraphFlow {
	/// Decides the flow for an already-loaded record.
	pub fn for_config(config: &AzureAdConfig) -> Self {
		if !migration::auth_provider_enabled(config) {
			GraphFlow::Disabled
		} else if migration::is_config_deprecated(config) {
			GraphFlow::AzureAdGraph
		} else {
			GraphFlow::MicrosoftGraph
		}
	}
}

/// What [`Migrator::upgrade`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeOutcome {
	/// Endpoints were rewritten and persisted.
	Rewritten,
	/// The graph endpoint was not the deprecated value; nothing was written.
	Refused,
	/// Provider is disabled or has no graph endpoint.
	SkippedDisabled,
	/// The migration annotation is already `"true"`.
	SkippedAlreadyMigrated,
}

/// Summary of a single [`Migrator::upgrade`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
	/// Record that was inspected.
	pub name: ConfigName,
	/// Region classified from the graph endpoint before the call.
	pub region: Region,
	/// Endpoint state before the call.
	pub before: EndpointState,
	/// Endpoint state after the call.
	pub after: EndpointState,
	/// What happened.
	pub outcome: UpgradeOutcome,
	/// When the record was inspected.
	#[serde(with = "time::serde::rfc3339")]
	pub observed_at: OffsetDateTime,
}

/// Runs the migration core against records held in a [`ConfigStore`].
///
/// Upgrades of the same record are serialized through a per-name async mutex that is dropped
/// again once idle, and the write goes through compare-and-swap so a concurrent writer outside
/// this process surfaces as [`Error::Conflict`] instead of being overwritten.
#[derive(Clone)]
pub struct Migrator {
	/// Store holding the auth config records.
	pub store: Arc<dyn ConfigStore>,
	upgrade_guards: Arc<Mutex<HashMap<ConfigName, Arc<AsyncMutex<()>>>>>,
}
impl Migrator {
	/// Creates a migrator over the provided store.
	pub fn new(store: Arc<dyn ConfigStore>) -> Self {
		Self { store, upgrade_guards: Default::default() }
	}

	/// Loads the record and decides which graph service logins should use.
	pub async fn graph_flow(&self, name: &ConfigName) -> Result<GraphFlow> {
		let config = self.load(name).await?;

		Ok(GraphFlow::for_config(&config))
	}

	/// Upgrades the record's endpoints to Microsoft Graph when it is enabled and not yet marked.
	pub async fn upgrade(&self, name: &ConfigName) -> Result<MigrationReport> {
		let guard = self.upgrade_guard(name);
		let result = {
			let _lock = guard.lock().await;

			self.upgrade_locked(name).await
		};

		self.release_upgrade_guard(name, guard);

		result
	}

	async fn upgrade_locked(&self, name: &ConfigName) -> Result<MigrationReport> {
		let stored = self.load(name).await?;
		let region = Region::of(&stored);
		let before = migration::endpoint_state(&stored);
		let report = |outcome: UpgradeOutcome, after: EndpointState| MigrationReport {
			name: name.clone(),
			region,
			before,
			after,
			outcome,
			observed_at: OffsetDateTime::now_utc(),
		};

		if !migration::auth_provider_enabled(&stored) {
			return Ok(report(UpgradeOutcome::SkippedDisabled, before));
		}
		if !migration::is_config_deprecated(&stored) {
			return Ok(report(UpgradeOutcome::SkippedAlreadyMigrated, before));
		}

		let mut upgraded = stored.clone();

		migration::update_azure_ad_endpoints(&mut upgraded);

		if upgraded == stored {
			return Ok(report(UpgradeOutcome::Refused, before));
		}

		let expected = stored.metadata.resource_version;

		match self.store.compare_and_swap(name, expected, upgraded.clone()).await? {
			CompareAndSwapOutcome::Updated =>
				Ok(report(UpgradeOutcome::Rewritten, migration::endpoint_state(&upgraded))),
			CompareAndSwapOutcome::VersionMismatch =>
				Err(Error::Conflict { name: name.clone(), expected }),
			CompareAndSwapOutcome::Missing => Err(Error::ConfigNotFound { name: name.clone() }),
		}
	}

	async fn load(&self, name: &ConfigName) -> Result<AzureAdConfig> {
		self.store.fetch(name).await?.ok_or_else(|| Error::ConfigNotFound { name: name.clone() })
	}

	fn upgrade_guard(&self, name: &ConfigName) -> Arc<AsyncMutex<()>> {
		self.upgrade_guards.lock().entry(name.clone()).or_default().clone()
	}

	// Drops the map entry once no other upgrade of `name` holds or awaits it.
	fn release_upgrade_guard(&self, name: &ConfigName, guard: Arc<AsyncMutex<()>>) {
		let mut guards = self.upgrade_guards.lock();

		if guards.get(name).is_some_and(|held| Arc::ptr_eq(held, &guard))
			&& Arc::strong_count(&guard) == 2
		{
			guards.remove(name);
		}
	}
}
impl Debug for Migrator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Migrator")
			.field("tracked_guards", &self.upgrade_guards.lock().len())
			.finish()
	}
}
