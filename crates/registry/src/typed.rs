//! Typed views over [`ProfileContainer`].
//!
//! A view narrows a container to the profile type it was declared for. It
//! shares the container's storage and only adds type-checked accessors; the
//! mutable view is the one place that guarantees a container holds nothing
//! but its declared profile type.

use std::marker::PhantomData;

use crate::container::{AddOutcome, ProfileContainer};
use crate::key::{KeyDomain, TypeIdent};
use crate::profile::{TypedProfile, downcast_box, downcast_ref};

fn accepts<P: TypedProfile>(container: &ProfileContainer) -> bool {
	container.key_type() == P::Key::ident() && container.profile_type() == TypeIdent::of::<P>()
}

/// Read-only view of a container holding `P` profiles.
pub struct TypedContainer<'a, P> {
	inner: &'a ProfileContainer,
	_marker: PhantomData<fn() -> P>,
}

impl<P> Clone for TypedContainer<'_, P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<P> Copy for TypedContainer<'_, P> {}

impl<'a, P: TypedProfile> TypedContainer<'a, P> {
	/// Narrows `inner`, or returns `None` if it was not declared for `P`.
	pub fn new(inner: &'a ProfileContainer) -> Option<Self> {
		accepts::<P>(inner).then_some(Self {
			inner,
			_marker: PhantomData,
		})
	}

	/// Returns the untyped container.
	pub fn untyped(self) -> &'a ProfileContainer {
		self.inner
	}

	pub fn get(self, key: &str) -> Option<&'a P> {
		self.inner.get(key).and_then(downcast_ref::<P>)
	}

	/// Domain-keyed lookup; see [`ProfileContainer::get_by_key`].
	pub fn get_by_key(self, key: P::Key, key_override: Option<&str>) -> Option<&'a P> {
		self.inner.get_by_key(key, key_override).and_then(downcast_ref::<P>)
	}

	/// Iterates every stored `P`, in no particular order.
	pub fn iter(self) -> impl Iterator<Item = &'a P> + Clone {
		self.inner.iter().filter_map(downcast_ref::<P>)
	}

	pub fn len(self) -> usize {
		self.iter().count()
	}

	pub fn is_empty(self) -> bool {
		self.iter().next().is_none()
	}
}

/// Mutable view of a container holding `P` profiles.
pub struct TypedContainerMut<'a, P> {
	inner: &'a mut ProfileContainer,
	_marker: PhantomData<fn() -> P>,
}

impl<'a, P: TypedProfile> TypedContainerMut<'a, P> {
	/// Narrows `inner`, or returns `None` if it was not declared for `P`.
	pub fn new(inner: &'a mut ProfileContainer) -> Option<Self> {
		if !accepts::<P>(inner) {
			return None;
		}
		Some(Self {
			inner,
			_marker: PhantomData,
		})
	}

	/// Reborrows as a read-only view.
	pub fn as_view(&self) -> TypedContainer<'_, P> {
		TypedContainer {
			inner: &*self.inner,
			_marker: PhantomData,
		}
	}

	pub fn add(&mut self, profile: P) -> AddOutcome {
		self.inner.add(Box::new(profile))
	}

	pub fn get(&self, key: &str) -> Option<&P> {
		self.inner.get(key).and_then(downcast_ref::<P>)
	}

	pub fn get_by_key(&self, key: P::Key, key_override: Option<&str>) -> Option<&P> {
		self.inner.get_by_key(key, key_override).and_then(downcast_ref::<P>)
	}

	/// Removes the `P` stored under `key`. Entries of another type are left in place.
	pub fn remove(&mut self, key: &str) -> Option<Box<P>> {
		self.get(key)?;
		self.inner.remove(key).and_then(downcast_box::<P>)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::profile::{Profile, ProfileMeta};
	use crate::{KeyDomain, impl_typed_profile};

	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KeyDomain)]
	enum Shade {
		Unset = 0,
		Light = 1,
		Dark = 2,
	}

	#[derive(Debug)]
	struct ShadeProfile {
		meta: ProfileMeta,
		shade: Shade,
	}

	impl TypedProfile for ShadeProfile {
		type Key = Shade;

		fn key(&self) -> Shade {
			self.shade
		}
	}

	impl_typed_profile!(ShadeProfile);

	#[derive(Debug)]
	struct StrayProfile {
		meta: ProfileMeta,
	}

	impl TypedProfile for StrayProfile {
		type Key = Shade;

		fn key(&self) -> Shade {
			Shade::Dark
		}
	}

	impl_typed_profile!(StrayProfile);

	fn shade(shade: Shade) -> ShadeProfile {
		ShadeProfile {
			meta: ProfileMeta::new().named(format!("shade-{}", shade.name())),
			shade,
		}
	}

	#[test]
	fn view_rejects_other_profile_type() {
		let container = ProfileContainer::of::<ShadeProfile>("shades");
		assert!(container.typed::<ShadeProfile>().is_some());
		assert!(container.typed::<StrayProfile>().is_none());
	}

	#[test]
	fn typed_get_narrows_to_declared_type() {
		let mut container = ProfileContainer::of::<ShadeProfile>("shades");
		container.add_profile(shade(Shade::Light));
		// untyped layer accepts foreign profiles; typed layer skips them
		container.add_profile(StrayProfile { meta: ProfileMeta::new() });

		let view = container.typed::<ShadeProfile>().unwrap();
		assert_eq!(view.get("Light").map(|p| p.shade), Some(Shade::Light));
		assert!(view.get("Dark").is_none());
		assert!(view.untyped().get("Dark").is_some());
		assert_eq!(view.len(), 1);
	}

	#[test]
	fn typed_get_by_key_honors_override() {
		let mut container = ProfileContainer::of::<ShadeProfile>("shades");
		let mut unset = shade(Shade::Unset);
		unset.meta = unset.meta.with_key_override("fallback");
		container.add_profile(unset);

		let view = container.typed::<ShadeProfile>().unwrap();
		assert!(view.get_by_key(Shade::Unset, Some("fallback")).is_some());
		assert!(view.get_by_key(Shade::Unset, None).is_none());
	}

	#[test]
	fn typed_remove_leaves_foreign_entries() {
		let mut container = ProfileContainer::of::<ShadeProfile>("shades");
		container.add_profile(StrayProfile { meta: ProfileMeta::new() });
		container.add_profile(shade(Shade::Light));

		let mut view = container.typed_mut::<ShadeProfile>().unwrap();
		assert!(view.remove("Dark").is_none());
		let removed = view.remove("Light").expect("light profile");
		assert_eq!(removed.shade, Shade::Light);
		assert!(view.as_view().is_empty());

		assert_eq!(container.len(), 1);
		assert!(container.get("Dark").is_some_and(|p| p.name().is_none()));
	}

	#[test]
	fn typed_add_is_first_write_wins() {
		let mut container = ProfileContainer::of::<ShadeProfile>("shades");
		let mut view = container.typed_mut::<ShadeProfile>().unwrap();
		assert_eq!(view.add(shade(Shade::Dark)), AddOutcome::Inserted);

		let mut second = shade(Shade::Dark);
		second.meta = ProfileMeta::new().named("second");
		assert_eq!(view.add(second), AddOutcome::KeptExisting);
		assert_eq!(view.get("Dark").and_then(|p| p.name()), Some("shade-Dark"));
	}
}
