//! Error types shared by the config model, stores, and the upgrade pipeline.
//!
//! The endpoint migration core itself never fails; refusals are reported through diagnostics.

// self
use crate::{_prelude::*, config::ConfigName};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Stored record could not be parsed or serialized.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// No record is stored under the requested name.
	#[error("Auth config `{name}` does not exist.")]
	ConfigNotFound {
		/// Name that was looked up.
		name: ConfigName,
	},
	/// Record changed between load and save.
	#[error("Auth config `{name}` was modified concurrently (expected resource version {expected}).")]
	Conflict {
		/// Name of the contended record.
		name: ConfigName,
		/// Resource version observed when the record was loaded.
		expected: u64,
	},
}

/// Parsing and validation failures for stored auth config records.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// JSON payload does not describe an auth config.
	#[error("Auth config JSON is invalid at `{path}`.")]
	Parse {
		/// JSON path of the failing field.
		path: String,
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Record could not be serialized.
	#[error("Auth config could not be serialized.")]
	Serialize(#[source] serde_json::Error),
	/// Config name failed validation.
	#[error(transparent)]
	InvalidName(#[from] crate::config::ConfigNameError),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}
