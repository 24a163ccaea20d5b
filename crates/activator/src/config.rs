//! Activation options.
//!
//! Options are fixed per cache: changing them means building a new
//! [`crate::ActivationCache`], since already-published constructor sets are
//! never rebuilt.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivatorOptions {
	/// Also consider constructors registered without `pub` visibility.
	pub include_non_public: bool,
	/// Synthesize a parameterless constructor from the default-value table.
	pub default_value_fallback: bool,
	/// Synthesize an enum's zero member from its underlying primitive's default.
	pub enum_fallback: bool,
}

impl Default for ActivatorOptions {
	fn default() -> Self {
		Self {
			include_non_public: false,
			default_value_fallback: true,
			enum_fallback: true,
		}
	}
}

impl ActivatorOptions {
	/// Parses options from TOML; missing keys keep their defaults.
	///
	/// ```toml
	/// include_non_public = true
	/// enum_fallback = false
	/// ```
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}
}
