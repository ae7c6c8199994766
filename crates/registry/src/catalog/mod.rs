//! Type catalog: the set of profile and container types known to the process.
//!
//! # Role
//!
//! Discovery does not scan the running program. Instead every concrete type
//! registers a [`CatalogType`] at link time through [`profile!`](crate::profile)
//! or [`profile_container!`](crate::profile_container), collected by
//! `inventory` into [`InventoryCatalog`]. [`StaticCatalog`] serves embedders
//! and tests that want an explicit, ordered list.
//!
//! A catalog entry can fail at each step the registry performs on it:
//! enumeration ([`CatalogError`]), construction ([`ConstructError`]) or
//! introspection (lineage that does not resolve). The registry skips such
//! entries and keeps going.

use std::fmt;

use crate::container::ProfileContainer;
use crate::error::{CatalogError, ConstructError};
use crate::key::KeyDomain;
use crate::lineage::TypeInfo;
use crate::profile::{Profile, TypedProfile};

mod macros;

#[cfg(test)]
mod tests;

/// A freshly constructed catalog type.
#[derive(Debug)]
pub enum Instance {
	Container(ProfileContainer),
	Profile(Box<dyn Profile>),
}

impl Instance {
	pub fn profile<P: Profile>(profile: P) -> Self {
		Self::Profile(Box::new(profile))
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Self::Container(_) => "container",
			Self::Profile(_) => "profile",
		}
	}
}

/// Default constructor for a catalog type.
pub type Constructor = fn() -> Result<Instance, ConstructError>;

/// A type registered with the catalog.
pub struct CatalogType {
	/// Declared lineage.
	pub info: &'static TypeInfo,
	/// Default constructor; `None` for types that cannot be instantiated.
	pub construct: Option<Constructor>,
	/// Crate that registered the type.
	pub source: &'static str,
}

impl CatalogType {
	pub const fn new(info: &'static TypeInfo, construct: Constructor, source: &'static str) -> Self {
		Self {
			info,
			construct: Some(construct),
			source,
		}
	}

	/// Registers lineage only; discovery classifies the type but never builds it.
	pub const fn without_constructor(info: &'static TypeInfo, source: &'static str) -> Self {
		Self {
			info,
			construct: None,
			source,
		}
	}

	pub fn name(&self) -> &'static str {
		self.info.name()
	}
}

impl fmt::Debug for CatalogType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalogType")
			.field("type", &self.info.name())
			.field("constructible", &self.construct.is_some())
			.field("source", &self.source)
			.finish()
	}
}

inventory::collect!(CatalogType);

/// One enumerated catalog entry.
pub type CatalogEntry = Result<&'static CatalogType, CatalogError>;

/// Enumerates the types available for discovery.
pub trait TypeCatalog: Send + Sync {
	/// Yields every known type. Entries that cannot be enumerated yield an error.
	fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + '_>;
}

/// Catalog of every type registered with [`profile!`](crate::profile) or
/// [`profile_container!`](crate::profile_container) in the linked binary.
///
/// Link order is unspecified, so entries are yielded sorted by type name.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryCatalog;

impl TypeCatalog for InventoryCatalog {
	fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + '_> {
		let mut types: Vec<&'static CatalogType> = inventory::iter::<CatalogType>.into_iter().collect();
		types.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.source.cmp(b.source)));
		Box::new(types.into_iter().map(Ok))
	}
}

/// Explicit, ordered catalog.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
	entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a type.
	pub fn with(mut self, ty: &'static CatalogType) -> Self {
		self.entries.push(Ok(ty));
		self
	}

	/// Appends an entry that fails to enumerate.
	pub fn with_error(mut self, error: CatalogError) -> Self {
		self.entries.push(Err(error));
		self
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<&'static CatalogType> for StaticCatalog {
	fn from_iter<I: IntoIterator<Item = &'static CatalogType>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(Ok).collect(),
		}
	}
}

impl TypeCatalog for StaticCatalog {
	fn entries(&self) -> Box<dyn Iterator<Item = CatalogEntry> + '_> {
		Box::new(self.entries.iter().cloned())
	}
}

#[doc(hidden)]
pub fn default_profile<P: Default>() -> Result<P, ConstructError> {
	Ok(P::default())
}

#[doc(hidden)]
pub fn typed_profile_instance<K: KeyDomain, P: TypedProfile<Key = K>>(profile: P) -> Instance {
	Instance::profile(profile)
}

#[doc(hidden)]
pub fn typed_container_instance<K: KeyDomain, P: TypedProfile<Key = K>>(label: &'static str) -> Instance {
	Instance::Container(ProfileContainer::of::<P>(label))
}
