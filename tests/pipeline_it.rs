// self
use azuread_graph_migration::{
	_preludet::*,
	config::{AzureAdConfig, ConfigName},
	migration::{EndpointState, Region},
	pipeline::{GraphFlow, Migrator, UpgradeOutcome},
	store::{CompareAndSwapOutcome, ConfigStore, MemoryStore, StoreError, StoreFuture},
};

#[tokio::test]
async fn upgrade_rewrites_and_persists_legacy_record() {
	let (migrator, store) = build_test_migrator();
	let name = config_name("azuread");

	store
		.save(enabled_config("azuread", "https://graph.windows.net/", "https://login.microsoftonline.com/", "tid1"))
		.await
		.expect("Seeding the store should succeed.");

	assert_eq!(migrator.graph_flow(&name).await.expect("Flow lookup should succeed."), GraphFlow::AzureAdGraph);

	let report = migrator.upgrade(&name).await.expect("Upgrade should succeed.");

	assert_eq!(report.outcome, UpgradeOutcome::Rewritten);
	assert_eq!(report.region, Region::Global);
	assert_eq!(report.before, EndpointState::Deprecated);
	assert_eq!(report.after, EndpointState::Current);

	let stored = store
		.fetch(&name)
		.await
		.expect("Fetching upgraded record should succeed.")
		.expect("Upgraded record should remain present.");

	assert_eq!(stored.graph_endpoint, "https://graph.microsoft.com");
	assert_eq!(stored.auth_endpoint, "https://login.microsoftonline.com/tid1/oauth2/v2.0/authorize");
	assert_eq!(stored.metadata.resource_version, 2);
	// Marking the record as migrated is left to the caller.
	assert!(stored.metadata.annotations.is_empty());
	assert_eq!(migrator.graph_flow(&name).await.expect("Flow lookup should succeed."), GraphFlow::AzureAdGraph);

	let again = migrator.upgrade(&name).await.expect("Second upgrade should succeed.");

	assert_eq!(again.outcome, UpgradeOutcome::Refused);
	assert_eq!(
		store.fetch(&name).await.expect("Fetch should succeed.").map(|c| c.metadata.resource_version),
		Some(2)
	);
}

#[tokio::test]
async fn upgrade_skips_disabled_and_marked_records() {
	let (migrator, store) = build_test_migrator();
	let mut disabled =
		enabled_config("azuread", "https://graph.windows.net/", "https://login.microsoftonline.com/", "tid1");

	disabled.enabled = false;

	let disabled = store.save(disabled).await.expect("Seeding the store should succeed.");
	let report = migrator.upgrade(disabled.name()).await.expect("Upgrade should succeed.");

	assert_eq!(report.outcome, UpgradeOutcome::SkippedDisabled);
	assert_eq!(migrator.graph_flow(disabled.name()).await.expect("Flow lookup should succeed."), GraphFlow::Disabled);

	let marked = annotate(
		enabled_config("azuread-cn", "https://graph.chinacloudapi.cn/", "https://login.chinacloudapi.cn/", "tid2"),
		"true",
	);

	let marked = store.save(marked).await.expect("Seeding the store should succeed.");
	let report = migrator.upgrade(marked.name()).await.expect("Upgrade should succeed.");

	assert_eq!(report.outcome, UpgradeOutcome::SkippedAlreadyMigrated);
	assert_eq!(report.region, Region::China);
	assert_eq!(report.after, EndpointState::Deprecated);
	assert_eq!(
		migrator.graph_flow(marked.name()).await.expect("Flow lookup should succeed."),
		GraphFlow::MicrosoftGraph
	);
	assert_eq!(store.fetch(marked.name()).await.expect("Fetch should succeed."), Some(marked.clone()));
}

#[tokio::test]
async fn unknown_record_is_reported() {
	let (migrator, _store) = build_test_migrator();
	let error = migrator.upgrade(&config_name("missing")).await.expect_err("Upgrade must fail.");

	assert!(matches!(error, Error::ConfigNotFound { ref name } if name.to_string() == "missing"));
}

/// Store that lets reads through but always loses the write race.
#[derive(Default)]
struct RacingStore(MemoryStore);
impl ConfigStore for RacingStore {
	fn save(&self, config: AzureAdConfig) -> StoreFuture<'_, AzureAdConfig> {
		self.0.save(config)
	}

	fn fetch<'a>(&'a self, name: &'a ConfigName) -> StoreFuture<'a, Option<AzureAdConfig>> {
		self.0.fetch(name)
	}

	fn compare_and_swap<'a>(
		&'a self,
		_name: &'a ConfigName,
		_expected_version: u64,
		_replacement: AzureAdConfig,
	) -> StoreFuture<'a, CompareAndSwapOutcome> {
		Box::pin(async { Ok::<_, StoreError>(CompareAndSwapOutcome::VersionMismatch) })
	}
}

#[tokio::test]
async fn lost_write_race_surfaces_conflict() {
	let backend = Arc::new(RacingStore::default());
	let store: Arc<dyn ConfigStore> = backend.clone();
	let migrator = Migrator::new(store);
	let seeded = backend
		.save(enabled_config("azuread", "https://graph.windows.net/", "https://login.microsoftonline.com/", "t"))
		.await
		.expect("Seeding the store should succeed.");
	let error = migrator.upgrade(seeded.name()).await.expect_err("Upgrade must lose the race.");

	assert!(matches!(error, Error::Conflict { expected: 1, .. }));
}

#[tokio::test]
async fn concurrent_upgrades_rewrite_once() {
	let (migrator, store) = build_test_migrator();
	let name = config_name("azuread");

	store
		.save(enabled_config("azuread", "https://graph.chinacloudapi.cn/", "https://login.chinacloudapi.cn/", "t"))
		.await
		.expect("Seeding the store should succeed.");

	let mut handles = Vec::new();

	for _ in 0..8 {
		let migrator = migrator.clone();
		let name = name.clone();

		handles.push(tokio::spawn(async move { migrator.upgrade(&name).await }));
	}

	let mut rewritten = 0;

	for handle in handles {
		let report = handle.await.expect("Upgrade task should not panic.").expect("Upgrade should succeed.");

		match report.outcome {
			UpgradeOutcome::Rewritten => rewritten += 1,
			UpgradeOutcome::Refused => {},
			other => panic!("Unexpected outcome {other:?}."),
		}
	}

	assert_eq!(rewritten, 1);
	assert_eq!(
		store.fetch(&name).await.expect("Fetch should succeed.").map(|c| c.endpoint),
		Some("https://login.partner.microsoftonline.cn/".to_owned())
	);
}
