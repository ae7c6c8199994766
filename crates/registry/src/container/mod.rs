//! Profile containers.
//!
//! A [`ProfileContainer`] holds the profiles of one key domain, keyed by their
//! effective key. The first profile stored under a key keeps it; later
//! profiles with the same effective key are dropped. Typed access lives in
//! [`crate::typed`].

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap as HashMap;

use crate::key::{KeyDomain, TypeIdent};
use crate::lineage::KeyTyped;
use crate::profile::{Profile, TypedProfile};
use crate::typed::{TypedContainer, TypedContainerMut};


/// Result of [`ProfileContainer::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
	/// Key was new; profile inserted.
	Inserted,
	/// Key was taken; the existing profile was kept and the new one dropped.
	KeptExisting,
	/// Profile has no effective key; nothing was stored.
	MissingKey,
}

impl AddOutcome {
	pub fn is_inserted(self) -> bool {
		self == Self::Inserted
	}
}

/// Unordered collection of profiles sharing one key domain.
pub struct ProfileContainer {
	label: &'static str,
	key_type: TypeIdent,
	profile_type: TypeIdent,
	entries: HashMap<Box<str>, Box<dyn Profile>>,
}

impl ProfileContainer {
	/// Creates an empty container accepting `profile_type` profiles of `key_type`.
	pub fn new(label: &'static str, key_type: TypeIdent, profile_type: TypeIdent) -> Self {
		Self {
			label,
			key_type,
			profile_type,
			entries: HashMap::default(),
		}
	}

	/// Creates an empty container for profiles of type `P`.
	pub fn of<P: TypedProfile>(label: &'static str) -> Self {
		Self::new(label, P::Key::ident(), TypeIdent::of::<P>())
	}

	/// Name of the container type this instance was created for.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Key domain this container accepts.
	pub fn key_type(&self) -> TypeIdent {
		self.key_type
	}

	/// Declared profile type; enforced only through the typed views.
	pub fn profile_type(&self) -> TypeIdent {
		self.profile_type
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Stores `profile` under its effective key unless the key is missing or taken.
	pub fn add(&mut self, profile: Box<dyn Profile>) -> AddOutcome {
		let Some(key) = profile.effective_key() else {
			return AddOutcome::MissingKey;
		};
		match self.entries.entry(Box::from(key)) {
			Entry::Occupied(_) => AddOutcome::KeptExisting,
			Entry::Vacant(slot) => {
				slot.insert(profile);
				AddOutcome::Inserted
			}
		}
	}

	/// Boxes and stores `profile`; see [`Self::add`].
	pub fn add_profile<P: Profile>(&mut self, profile: P) -> AddOutcome {
		self.add(Box::new(profile))
	}

	/// Exact lookup by effective key.
	pub fn get(&self, key: &str) -> Option<&dyn Profile> {
		if key.is_empty() {
			return None;
		}
		self.entries.get(key).map(|profile| &**profile)
	}

	/// Lookup by domain member.
	///
	/// A non-zero member is looked up by its name. The zero member addresses
	/// profiles through `key_override` (empty when absent), because its name is
	/// shared by every "unset" profile.
	pub fn get_by_key<K: KeyDomain>(&self, key: K, key_override: Option<&str>) -> Option<&dyn Profile> {
		self.get(key.lookup_key(key_override))
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Removes and returns the profile stored under `key`.
	pub fn remove(&mut self, key: &str) -> Option<Box<dyn Profile>> {
		if key.is_empty() {
			return None;
		}
		self.entries.remove(key)
	}

	/// Iterates every stored profile in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &dyn Profile> + Clone {
		self.entries.values().map(|profile| -> &dyn Profile { &**profile })
	}

	/// Iterates every effective key in no particular order.
	pub fn keys(&self) -> impl Iterator<Item = &str> + Clone {
		self.entries.keys().map(|key| &**key)
	}

	/// Typed read view, if this container's key domain is `P::Key`.
	pub fn typed<P: TypedProfile>(&self) -> Option<TypedContainer<'_, P>> {
		TypedContainer::new(self)
	}

	/// Typed mutable view, if this container's key domain is `P::Key`.
	pub fn typed_mut<P: TypedProfile>(&mut self) -> Option<TypedContainerMut<'_, P>> {
		TypedContainerMut::new(self)
	}
}

impl KeyTyped for ProfileContainer {
	fn key_type(&self) -> TypeIdent {
		ProfileContainer::key_type(self)
	}
}

impl fmt::Debug for ProfileContainer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProfileContainer")
			.field("label", &self.label)
			.field("key_type", &self.key_type)
			.field("profile_type", &self.profile_type)
			.field("len", &self.entries.len())
			.finish()
	}
}
