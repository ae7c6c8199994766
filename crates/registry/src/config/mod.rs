//! Registry configuration.
//!
//! Configuration is format-neutral; [`RegistryConfig::from_toml_str`] loads it
//! from TOML:
//!
//! ```toml
//! container-policy = "last-wins"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;


/// What discovery does when two container types serve the same key domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerPolicy {
	/// Keep the container registered first; drop later ones.
	#[default]
	FirstWins,
	/// Replace the registered container with the later one.
	LastWins,
}

/// Tunables for [`Registry`](crate::Registry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
	pub container_policy: ContainerPolicy,
}

impl RegistryConfig {
	/// Parses a TOML document. Missing fields take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub fn with_container_policy(mut self, policy: ContainerPolicy) -> Self {
		self.container_policy = policy;
		self
	}
}
