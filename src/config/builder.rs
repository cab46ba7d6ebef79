// self
use crate::{
	_prelude::*,
	config::{AzureAdConfig, ConfigName, ObjectMeta},
};

/// Builder for [`AzureAdConfig`] values.
///
/// Endpoint values are accepted as-is; the migration core compares them literally and never
/// parses them.
#[derive(Debug)]
pub struct AzureAdConfigBuilder {
	config: AzureAdConfig,
}
impl AzureAdConfigBuilder {
	/// Creates a disabled, empty record with the provided name.
	pub fn new(name: ConfigName) -> Self {
		Self {
			config: AzureAdConfig {
				metadata: ObjectMeta::new(name),
				enabled: false,
				endpoint: String::new(),
				graph_endpoint: String::new(),
				tenant_id: String::new(),
				auth_endpoint: String::new(),
				token_endpoint: String::new(),
				application_id: String::new(),
				rancher_url: String::new(),
				extra: Default::default(),
			},
		}
	}

	/// Sets whether the provider is active.
	pub fn enabled(mut self, enabled: bool) -> Self {
		self.config.enabled = enabled;

		self
	}

	/// Sets the login authority URL.
	pub fn endpoint(mut self, url: impl Into<String>) -> Self {
		self.config.endpoint = url.into();

		self
	}

	/// Sets the graph service URL.
	pub fn graph_endpoint(mut self, url: impl Into<String>) -> Self {
		self.config.graph_endpoint = url.into();

		self
	}

	/// Sets the tenant identifier.
	pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
		self.config.tenant_id = tenant_id.into();

		self
	}

	/// Sets the stored authorization URL.
	pub fn auth_endpoint(mut self, url: impl Into<String>) -> Self {
		self.config.auth_endpoint = url.into();

		self
	}

	/// Sets the stored token URL.
	pub fn token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.config.token_endpoint = url.into();

		self
	}

	/// Sets the application (client) identifier.
	pub fn application_id(mut self, application_id: impl Into<String>) -> Self {
		self.config.application_id = application_id.into();

		self
	}

	/// Sets the redirect base URL.
	pub fn rancher_url(mut self, url: impl Into<String>) -> Self {
		self.config.rancher_url = url.into();

		self
	}

	/// Adds or replaces an annotation.
	pub fn annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.config.metadata.annotations.insert(key.into(), value.into());

		self
	}

	/// Consumes the builder and returns the record.
	pub fn build(self) -> AzureAdConfig {
		self.config
	}
}
