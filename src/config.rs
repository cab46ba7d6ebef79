//! Stored Azure AD auth config records.
//!
//! The record shape mirrors what the external store persists: object metadata carrying the
//! annotations, the enabled flag, and the endpoint strings the migration core rewrites. Fields
//! this crate does not understand are kept verbatim so a load/modify/save cycle is lossless.

/// Builder API for assembling auth config records.
pub mod builder;
/// Validated record names.
pub mod name;

pub use builder::*;
pub use name::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Object metadata attached to every stored record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
	/// Record name used as the store key.
	pub name: ConfigName,
	/// Free-form annotations owned by external tooling.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub annotations: BTreeMap<String, String>,
	/// Monotonic version bumped by the store on every write.
	#[serde(default)]
	pub resource_version: u64,
}
impl ObjectMeta {
	/// Creates metadata with no annotations at resource version zero.
	pub fn new(name: ConfigName) -> Self {
		Self { name, annotations: BTreeMap::new(), resource_version: 0 }
	}
}

/// Azure AD auth provider settings as persisted by the external store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAdConfig {
	/// Object metadata.
	pub metadata: ObjectMeta,
	/// Whether the provider is active.
	#[serde(default)]
	pub enabled: bool,
	/// Base login authority URL, e.g. `https://login.microsoftonline.com/`.
	#[serde(default)]
	pub endpoint: String,
	/// Directory graph service URL.
	#[serde(default)]
	pub graph_endpoint: String,
	/// Azure AD tenant identifier, interpolated into the derived OAuth 2.0 URLs.
	#[serde(default)]
	pub tenant_id: String,
	/// OAuth 2.0 authorization URL derived from `endpoint` and `tenant_id`.
	#[serde(default)]
	pub auth_endpoint: String,
	/// OAuth 2.0 token URL derived from `endpoint` and `tenant_id`.
	#[serde(default)]
	pub token_endpoint: String,
	/// Registered application (client) identifier.
	#[serde(default)]
	pub application_id: String,
	/// Public URL the identity provider redirects back to.
	#[serde(default)]
	pub rancher_url: String,
	/// Fields owned by other components, preserved untouched.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}
impl AzureAdConfig {
	/// Creates a new builder for the provided record name.
	pub fn builder(name: ConfigName) -> AzureAdConfigBuilder {
		AzureAdConfigBuilder::new(name)
	}

	/// Parses a record from its JSON representation.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_slice(bytes);

		Ok(serde_path_to_error::deserialize(de)?)
	}

	/// Serializes the record into pretty-printed JSON.
	pub fn to_json_vec(&self) -> Result<Vec<u8>, ConfigError> {
		serde_json::to_vec_pretty(self).map_err(ConfigError::Serialize)
	}

	/// Returns the record name.
	pub fn name(&self) -> &ConfigName {
		&self.metadata.name
	}

	/// Returns the raw annotation value for `key`, if present.
	pub fn annotation(&self, key: &str) -> Option<&str> {
		self.metadata.annotations.get(key).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const STORED: &str = r#"{
		"metadata": {
			"name": "azuread",
			"annotations": { "auth.cattle.io/azuread-endpoint-migrated": "true" },
			"resourceVersion": 7
		},
		"enabled": true,
		"endpoint": "https://login.microsoftonline.com/",
		"graphEndpoint": "https://graph.microsoft.com",
		"tenantId": "tid1",
		"authEndpoint": "https://login.microsoftonline.com/tid1/oauth2/v2.0/authorize",
		"tokenEndpoint": "https://login.microsoftonline.com/tid1/oauth2/v2.0/token",
		"applicationId": "app-1",
		"accessMode": "unrestricted",
		"allowedPrincipalIds": ["azuread_user://u1"]
	}"#;

	#[test]
	fn parses_stored_record_and_keeps_unknown_fields() {
		let config = AzureAdConfig::from_json_slice(STORED.as_bytes())
			.expect("Stored record fixture should parse.");

		assert_eq!(&**config.name(), "azuread");
		assert_eq!(config.metadata.resource_version, 7);
		assert_eq!(config.annotation("auth.cattle.io/azuread-endpoint-migrated"), Some("true"));
		assert_eq!(config.tenant_id, "tid1");
		assert_eq!(config.rancher_url, "");
		assert_eq!(config.extra.get("accessMode"), Some(&serde_json::json!("unrestricted")));

		let bytes = config.to_json_vec().expect("Record should serialize.");
		let reparsed =
			AzureAdConfig::from_json_slice(&bytes).expect("Serialized record should parse again.");

		assert_eq!(reparsed, config);
		assert!(reparsed.extra.contains_key("allowedPrincipalIds"));
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let config = AzureAdConfig::from_json_slice(br#"{"metadata":{"name":"azuread"}}"#)
			.expect("Minimal record should parse.");

		assert!(!config.enabled);
		assert!(config.graph_endpoint.is_empty());
		assert!(config.metadata.annotations.is_empty());
		assert_eq!(config.metadata.resource_version, 0);
	}

	#[test]
	fn invalid_name_is_rejected() {
		assert!(AzureAdConfig::from_json_slice(br#"{"metadata":{"name":"with space"}}"#).is_err());
	}
}
