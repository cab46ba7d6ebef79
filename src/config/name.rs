//! Strongly typed record names used as store keys.

// self
use crate::_prelude::*;

const CONFIG_NAME_MAX_BYTES: usize = 253;

/// Error returned when record name validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ConfigNameError {
	/// The name was empty.
	#[error("Config name cannot be empty.")]
	Empty,
	/// The name contains whitespace characters.
	#[error("Config name contains whitespace.")]
	ContainsWhitespace,
	/// The name exceeded the allowed length in bytes.
	#[error("Config name exceeds {max} bytes.")]
	TooLong {
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// Name of a stored auth config record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigName(String);
impl ConfigName {
	/// Creates a new name after validation.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigNameError> {
		Self::try_from(value.into())
	}
}
impl Deref for ConfigName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Display for ConfigName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<ConfigName> for String {
	fn from(value: ConfigName) -> Self {
		value.0
	}
}
impl TryFrom<String> for ConfigName {
	type Error = ConfigNameError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		if value.is_empty() {
			return Err(ConfigNameError::Empty);
		}
		if value.chars().any(char::is_whitespace) {
			return Err(ConfigNameError::ContainsWhitespace);
		}
		if value.len() > CONFIG_NAME_MAX_BYTES {
			return Err(ConfigNameError::TooLong { max: CONFIG_NAME_MAX_BYTES });
		}

		Ok(Self(value))
	}
}
