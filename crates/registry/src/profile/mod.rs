//! Profiles: named, described configuration values stored under a key.
//!
//! A profile belongs to one key domain and carries a numeric key (the ordinal
//! of a domain member) plus its canonical string form. Its *effective key* is
//! what containers store it under:
//!
//! * non-zero numeric key: the canonical string key,
//! * zero numeric key: the string override from [`ProfileMeta::key_override`],
//! * otherwise none, and the profile cannot be registered.

use std::any::Any;
use std::fmt;

use crate::key::{KeyDomain, TypeIdent};
use crate::lineage::KeyTyped;


/// Descriptive fields shared by every profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMeta {
	/// Human-readable name.
	pub name: Option<String>,
	/// Description for help text.
	pub description: Option<String>,
	/// Storage key used when the numeric key is zero.
	pub key_override: Option<String>,
}

impl ProfileMeta {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn described(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_key_override(mut self, key: impl Into<String>) -> Self {
		self.key_override = Some(key.into());
		self
	}
}

/// A named, keyed configuration value.
///
/// Key fields are fixed at construction; nothing in the registry mutates them.
pub trait Profile: KeyTyped + Any + Send + Sync + fmt::Debug {
	/// Returns the descriptive metadata.
	fn meta(&self) -> &ProfileMeta;

	/// Integer key; zero means "unset, use the string override".
	fn key_value(&self) -> i64;

	/// Canonical string form of a non-zero key.
	fn string_key_value(&self) -> Option<&str>;

	fn name(&self) -> Option<&str> {
		self.meta().name.as_deref()
	}

	fn description(&self) -> Option<&str> {
		self.meta().description.as_deref()
	}

	fn string_key_value_override(&self) -> Option<&str> {
		self.meta().key_override.as_deref()
	}

	/// Key this profile is stored under, or `None` if it has no usable key.
	fn effective_key(&self) -> Option<&str> {
		let key = if self.key_value() != 0 {
			self.string_key_value()
		} else {
			self.string_key_value_override()
		};
		key.filter(|key| !key.is_empty())
	}
}

/// A profile statically bound to key domain [`Self::Key`].
///
/// The key is a plain value of the domain, so a typed profile can never be
/// without one. Implement this and use [`impl_typed_profile!`](crate::impl_typed_profile)
/// to derive the untyped [`Profile`] surface from it.
pub trait TypedProfile: Profile + Sized {
	type Key: KeyDomain;

	fn key(&self) -> Self::Key;
}

/// Implements [`Profile`] and [`KeyTyped`] for a [`TypedProfile`] with a
/// `meta: ProfileMeta` field.
#[macro_export]
macro_rules! impl_typed_profile {
	($type:ty) => {
		impl $crate::KeyTyped for $type {
			fn key_type(&self) -> $crate::TypeIdent {
				<<$type as $crate::TypedProfile>::Key as $crate::KeyDomain>::ident()
			}
		}

		impl $crate::Profile for $type {
			fn meta(&self) -> &$crate::ProfileMeta {
				&self.meta
			}

			fn key_value(&self) -> i64 {
				$crate::KeyDomain::ordinal($crate::TypedProfile::key(self))
			}

			fn string_key_value(&self) -> ::core::option::Option<&str> {
				::core::option::Option::Some($crate::KeyDomain::name($crate::TypedProfile::key(self)))
			}
		}
	};
}

/// Narrows a profile to its concrete type.
pub fn downcast_ref<P: Profile>(profile: &dyn Profile) -> Option<&P> {
	let any: &dyn Any = profile;
	any.downcast_ref::<P>()
}

pub(crate) fn downcast_box<P: Profile>(profile: Box<dyn Profile>) -> Option<Box<P>> {
	let any: Box<dyn Any> = profile;
	any.downcast::<P>().ok()
}

/// Returns the key-domain identity of a profile type.
pub fn key_type_of<P: TypedProfile>() -> TypeIdent {
	P::Key::ident()
}
