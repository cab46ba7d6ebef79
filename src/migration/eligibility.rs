//! Readiness and deprecation predicates.

// self
use crate::{
	config::AzureAdConfig,
	migration::{GRAPH_ENDPOINT_MIGRATED_ANNOTATION, MigrationMark},
	obs,
};

/// Returns true when the provider is enabled and has a graph endpoint configured.
///
/// Independent of the migration annotation.
pub fn auth_provider_enabled(config: &AzureAdConfig) -> bool {
	config.enabled && !config.graph_endpoint.is_empty()
}

/// Returns true while the deprecated Azure AD Graph flow should remain in effect.
///
/// A disabled provider is never deprecated. An enabled one is deprecated unless the migration
/// annotation is exactly `"true"`; the missing or invalid case emits a trace event.
pub fn is_config_deprecated(config: &AzureAdConfig) -> bool {
	if !config.enabled {
		return false;
	}

	match config.migration_mark() {
		MigrationMark::Migrated => false,
		MigrationMark::NotMigrated | MigrationMark::Absent => {
			obs::trace_annotation_missing(config.name(), GRAPH_ENDPOINT_MIGRATED_ANNOTATION);

			true
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn disabled_provider_is_never_deprecated() {
		let mut config = legacy_global_config("azuread");

		config.enabled = false;

		assert!(!is_config_deprecated(&config));
		assert!(!is_config_deprecated(&annotate(config.clone(), "true")));
		assert!(!is_config_deprecated(&annotate(config, "false")));
	}

	#[test]
	fn enabled_provider_is_deprecated_unless_marked_true() {
		let config = legacy_global_config("azuread");

		assert!(is_config_deprecated(&config));
		assert!(!is_config_deprecated(&annotate(config.clone(), "true")));

		for raw in ["", "false", "TRUE"] {
			assert!(is_config_deprecated(&annotate(config.clone(), raw)), "{raw:?}");
		}
	}

	#[test]
	fn deprecation_check_does_not_mutate() {
		let config = legacy_global_config("azuread");
		let before = config.clone();

		is_config_deprecated(&config);

		assert_eq!(config, before);
	}

	#[test]
	fn activation_requires_enabled_and_graph_endpoint() {
		let config = legacy_global_config("azuread");

		assert!(auth_provider_enabled(&config));
		// Annotation state is irrelevant.
		assert!(auth_provider_enabled(&annotate(config.clone(), "true")));

		let mut no_graph = config.clone();

		no_graph.graph_endpoint.clear();

		assert!(!auth_provider_enabled(&no_graph));

		let mut disabled = config;

		disabled.enabled = false;

		assert!(!auth_provider_enabled(&disabled));
	}
}
