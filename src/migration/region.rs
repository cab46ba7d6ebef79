//! Region classification and per-region endpoint constants.

// self
use crate::{_prelude::*, config::AzureAdConfig};

/// Deprecated Azure AD Graph endpoint for the global cloud.
pub const GLOBAL_AZURE_AD_GRAPH_ENDPOINT: &str = "https://graph.windows.net/";
/// Microsoft Graph endpoint for the global cloud.
pub const GLOBAL_MS_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com";
/// Deprecated Azure AD Graph endpoint for Azure China.
pub const CHINA_AZURE_AD_GRAPH_ENDPOINT: &str = "https://graph.chinacloudapi.cn/";
/// Microsoft Graph endpoint for Azure China.
pub const CHINA_MS_GRAPH_ENDPOINT: &str = "https://microsoftgraph.chinacloudapi.cn";
/// Deprecated Azure China login endpoint.
pub const CHINA_AZURE_AD_LOGIN_ENDPOINT: &str = "https://login.chinacloudapi.cn/";
/// Azure China login endpoint used with Microsoft Graph.
pub const CHINA_AZURE_MS_LOGIN_ENDPOINT: &str = "https://login.partner.microsoftonline.cn/";

/// Deployment market selecting which rewrite policy applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
	/// Global Azure cloud.
	Global,
	/// Azure operated in China.
	China,
}
impl Region {
	/// Classifies a graph endpoint by suffix: `.cn` or `.cn/` selects [`Region::China`].
	///
	/// The test is purely syntactic; malformed URLs fall through to [`Region::Global`].
	pub fn classify(graph_endpoint: &str) -> Self {
		if graph_endpoint.ends_with(".cn") || graph_endpoint.ends_with(".cn/") {
			Region::China
		} else {
			Region::Global
		}
	}

	/// Classifies the record's current graph endpoint.
	pub fn of(config: &AzureAdConfig) -> Self {
		Self::classify(&config.graph_endpoint)
	}

	/// Deprecated graph endpoint that guards rewrites in this region.
	pub const fn deprecated_graph_endpoint(self) -> &'static str {
		match self {
			Region::Global => GLOBAL_AZURE_AD_GRAPH_ENDPOINT,
			Region::China => CHINA_AZURE_AD_GRAPH_ENDPOINT,
		}
	}

	/// Replacement graph endpoint written by a successful rewrite.
	pub const fn current_graph_endpoint(self) -> &'static str {
		match self {
			Region::Global => GLOBAL_MS_GRAPH_ENDPOINT,
			Region::China => CHINA_MS_GRAPH_ENDPOINT,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Region::Global => "global",
			Region::China => "china",
		}
	}
}
impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Observable migration state of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointState {
	/// Graph endpoint equals the deprecated constant of its region.
	Deprecated,
	/// Anything else, including already-migrated and unrecognized values.
	Current,
}

/// Returns the record's [`EndpointState`], judged solely by its graph endpoint.
pub fn endpoint_state(config: &AzureAdConfig) -> EndpointState {
	if config.graph_endpoint == Region::of(config).deprecated_graph_endpoint() {
		EndpointState::Deprecated
	} else {
		EndpointState::Current
	}
}
