//! Error types.
//!
//! None of these escape [`Registry::initialize`](crate::Registry::initialize):
//! discovery records them as [`SkipReason`]s and continues.

use crate::key::TypeIdent;

/// A catalog entry could not be enumerated.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
	#[error("catalog entry unavailable: {0}")]
	Unavailable(String),
}

/// A catalog type's default constructor failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConstructError {
	/// The constructor returned an error.
	#[error("{0}")]
	Failed(String),
	/// The constructor panicked.
	#[error("constructor panicked: {0}")]
	Panicked(String),
}

impl ConstructError {
	pub fn failed(reason: impl Into<String>) -> Self {
		Self::Failed(reason.into())
	}
}

/// Why discovery passed over a catalog entry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SkipReason {
	#[error(transparent)]
	Enumerate(#[from] CatalogError),

	#[error("construction failed: {0}")]
	Construct(#[from] ConstructError),

	#[error("no default constructor")]
	NotConstructible,

	/// Lineage says profile, constructor built a container (or the reverse).
	#[error("declared as {declared} but constructed a {built}")]
	KindMismatch { declared: &'static str, built: &'static str },

	/// Lineage has no key-domain parameter.
	#[error("no key type in declared lineage")]
	MissingKeyType,

	/// Declared key domain disagrees with the instance's own.
	#[error("declared key type {declared} but instance reports {actual}")]
	KeyTypeMismatch { declared: TypeIdent, actual: TypeIdent },

	/// Another container already owns the key domain.
	#[error("key type {key_type} already served by {existing}")]
	DuplicateContainer { key_type: TypeIdent, existing: &'static str },

	/// No container serves the profile's key domain.
	#[error("no container for key type {0}")]
	NoContainer(TypeIdent),

	/// Profile has no effective key.
	#[error("profile has no effective key")]
	MissingKey,

	/// The container already holds a profile under this key.
	#[error("key {0:?} already registered")]
	DuplicateKey(String),
}

/// Registry configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid registry config: {0}")]
	Toml(#[from] toml::de::Error),
}
