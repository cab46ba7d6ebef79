//! Detect Azure AD auth configs that still point at the deprecated Azure AD Graph service and
//! upgrade their endpoints to Microsoft Graph in place, idempotently, and only when the stored
//! values match the known pre-migration URLs.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod config;
pub mod error;
pub mod migration;
pub mod obs;
pub mod pipeline;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{AzureAdConfig, ConfigName},
		migration::GRAPH_ENDPOINT_MIGRATED_ANNOTATION,
		pipeline::Migrator,
		store::{ConfigStore, MemoryStore},
	};

	/// Deprecated Azure AD Graph endpoint used by global fixtures.
	pub const GLOBAL_LEGACY_GRAPH: &str = "https://graph.windows.net/";
	/// Global login endpoint used by fixtures.
	pub const GLOBAL_LOGIN: &str = "https://login.microsoftonline.com/";
	/// Deprecated Azure AD Graph endpoint used by China fixtures.
	pub const CHINA_LEGACY_GRAPH: &str = "https://graph.chinacloudapi.cn/";
	/// Deprecated China login endpoint used by fixtures.
	pub const CHINA_LEGACY_LOGIN: &str = "https://login.chinacloudapi.cn/";

	/// Parses a config name fixture.
	pub fn config_name(value: &str) -> ConfigName {
		ConfigName::new(value).expect("Config name fixture should be valid.")
	}

	/// Builds an enabled config with the given endpoints and tenant.
	pub fn enabled_config(
		name: &str,
		graph_endpoint: &str,
		endpoint: &str,
		tenant_id: &str,
	) -> AzureAdConfig {
		AzureAdConfig::builder(config_name(name))
			.enabled(true)
			.graph_endpoint(graph_endpoint)
			.endpoint(endpoint)
			.tenant_id(tenant_id)
			.auth_endpoint(format!("{endpoint}{tenant_id}/oauth2/authorize"))
			.token_endpoint(format!("{endpoint}{tenant_id}/oauth2/token"))
			.build()
	}

	/// Builds an enabled global config still targeting Azure AD Graph.
	pub fn legacy_global_config(name: &str) -> AzureAdConfig {
		enabled_config(name, GLOBAL_LEGACY_GRAPH, GLOBAL_LOGIN, "tid1")
	}

	/// Builds an enabled China config still targeting Azure AD Graph.
	pub fn legacy_china_config(name: &str) -> AzureAdConfig {
		enabled_config(name, CHINA_LEGACY_GRAPH, CHINA_LEGACY_LOGIN, "tid-cn")
	}

	/// Sets the migration annotation to the provided raw value.
	pub fn annotate(mut config: AzureAdConfig, value: &str) -> AzureAdConfig {
		config
			.metadata
			.annotations
			.insert(GRAPH_ENDPOINT_MIGRATED_ANNOTATION.to_owned(), value.to_owned());

		config
	}

	/// Constructs a [`Migrator`] backed by a fresh in-memory store.
	pub fn build_test_migrator() -> (Migrator, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn ConfigStore> = store_backend.clone();

		(Migrator::new(store), store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		ops::Deref,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

