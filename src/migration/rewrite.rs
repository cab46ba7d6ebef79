//! Guarded endpoint rewrites and the dispatching entry point.
//!
//! A rewrite only happens when the graph endpoint equals the deprecated constant for its region.
//! Any other value leaves the record untouched and emits an info event, so repeated calls are
//! safe and a second call is always a no-op.

// self
use crate::{
	config::AzureAdConfig,
	migration::{CHINA_AZURE_AD_LOGIN_ENDPOINT, CHINA_AZURE_MS_LOGIN_ENDPOINT, Region},
	obs::{self, RewriteOutcome, RewriteSpan},
};

const AUTHORIZE_SUFFIX: &str = "/oauth2/v2.0/authorize";
const TOKEN_SUFFIX: &str = "/oauth2/v2.0/token";

/// Upgrades the record's endpoints using the policy of the region its graph endpoint belongs to.
///
/// Performs no eligibility check; callers consult
/// [`is_config_deprecated`](crate::migration::is_config_deprecated) first. Success and refusal are
/// only distinguishable through the record's fields afterwards.
pub fn update_azure_ad_endpoints(config: &mut AzureAdConfig) {
	match Region::of(config) {
		Region::Global => update_endpoints_for_global(config),
		Region::China => update_endpoints_for_china(config),
	}
}

/// Global policy: swap the graph endpoint and recompute the derived OAuth 2.0 URLs.
///
/// The login endpoint is left as is.
pub fn update_endpoints_for_global(config: &mut AzureAdConfig) {
	let _guard = RewriteSpan::new(Region::Global, "update_endpoints").entered();

	if !guard_deprecated(config, Region::Global) {
		return;
	}

	config.graph_endpoint = Region::Global.current_graph_endpoint().to_owned();

	recompute_oauth2_endpoints(config);
	obs::record_rewrite_outcome(Region::Global, RewriteOutcome::Rewritten);
}

/// China policy: like the global one, plus the login endpoint moves to the partner authority
/// when it still holds the deprecated value.
///
/// The derived URLs are recomputed from whatever `endpoint` holds afterwards, even when it was
/// neither the deprecated nor the replacement login URL.
pub fn update_endpoints_for_china(config: &mut AzureAdConfig) {
	let _guard = RewriteSpan::new(Region::China, "update_endpoints").entered();

	if !guard_deprecated(config, Region::China) {
		return;
	}

	config.graph_endpoint = Region::China.current_graph_endpoint().to_owned();

	if config.endpoint == CHINA_AZURE_AD_LOGIN_ENDPOINT {
		config.endpoint = CHINA_AZURE_MS_LOGIN_ENDPOINT.to_owned();
	}

	recompute_oauth2_endpoints(config);
	obs::record_rewrite_outcome(Region::China, RewriteOutcome::Rewritten);
}

/// Builds `<endpoint><tenant_id>/oauth2/v2.0/authorize`.
pub fn oauth2_authorize_url(endpoint: &str, tenant_id: &str) -> String {
	format!("{endpoint}{tenant_id}{AUTHORIZE_SUFFIX}")
}

/// Builds `<endpoint><tenant_id>/oauth2/v2.0/token`.
pub fn oauth2_token_url(endpoint: &str, tenant_id: &str) -> String {
	format!("{endpoint}{tenant_id}{TOKEN_SUFFIX}")
}

fn guard_deprecated(config: &AzureAdConfig, region: Region) -> bool {
	if config.graph_endpoint == region.deprecated_graph_endpoint() {
		return true;
	}

	obs::info_rewrite_refused(config.name(), &config.graph_endpoint);
	obs::record_rewrite_outcome(region, RewriteOutcome::Refused);

	false
}

fn recompute_oauth2_endpoints(config: &mut AzureAdConfig) {
	config.auth_endpoint = oauth2_authorize_url(&config.endpoint, &config.tenant_id);
	config.token_endpoint = oauth2_token_url(&config.endpoint, &config.tenant_id);
}
