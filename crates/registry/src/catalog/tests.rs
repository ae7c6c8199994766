use super::*;
use crate::key::TypeIdent;
use crate::lineage::{ANY_TYPED_CONTAINER, ANY_TYPED_PROFILE, PROFILE, TYPED_CONTAINER, TYPED_PROFILE};
use crate::profile::ProfileMeta;
use crate::{KeyDomain, KeyTyped, impl_typed_profile, profile, profile_container};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, KeyDomain)]
enum Lane {
	Idle,
	#[default]
	Fast,
	Slow,
}

#[derive(Debug, Default)]
struct LaneProfile {
	meta: ProfileMeta,
	lane: Lane,
}

impl TypedProfile for LaneProfile {
	type Key = Lane;

	fn key(&self) -> Lane {
		self.lane
	}
}

impl_typed_profile!(LaneProfile);

#[derive(Debug)]
struct SlowLaneProfile {
	meta: ProfileMeta,
}

impl SlowLaneProfile {
	fn load() -> Result<Self, ConstructError> {
		Ok(Self {
			meta: ProfileMeta::new().named("slow"),
		})
	}
}

impl TypedProfile for SlowLaneProfile {
	type Key = Lane;

	fn key(&self) -> Lane {
		Lane::Slow
	}
}

impl_typed_profile!(SlowLaneProfile);

#[derive(Debug, Default)]
struct DetachedProfile {
	meta: ProfileMeta,
}

impl KeyTyped for DetachedProfile {
	fn key_type(&self) -> TypeIdent {
		TypeIdent::of::<Self>()
	}
}

impl Profile for DetachedProfile {
	fn meta(&self) -> &ProfileMeta {
		&self.meta
	}

	fn key_value(&self) -> i64 {
		0
	}

	fn string_key_value(&self) -> Option<&str> {
		None
	}
}

struct Lanes;

profile!(LaneProfile: Lane);
profile!(SlowLaneProfile: Lane, with = SlowLaneProfile::load);
profile!(DetachedProfile);
profile_container!(Lanes: Lane => LaneProfile);

fn registered(ty: TypeIdent) -> &'static CatalogType {
	InventoryCatalog
		.entries()
		.filter_map(Result::ok)
		.find(|entry| entry.info.ident == ty)
		.expect("type registered with the inventory catalog")
}

#[test]
fn inventory_yields_registered_types_sorted() {
	let names: Vec<&str> = InventoryCatalog.entries().filter_map(Result::ok).map(CatalogType::name).collect();
	let mut sorted = names.clone();
	sorted.sort_unstable();
	assert_eq!(names, sorted);

	for ty in [
		TypeIdent::of::<LaneProfile>(),
		TypeIdent::of::<SlowLaneProfile>(),
		TypeIdent::of::<DetachedProfile>(),
		TypeIdent::of::<Lanes>(),
	] {
		let entry = registered(ty);
		assert_eq!(entry.source, "keel-registry");
		assert!(entry.construct.is_some());
	}
}

#[test]
fn typed_profile_macro_declares_key_domain() {
	let entry = registered(TypeIdent::of::<LaneProfile>());
	assert!(entry.info.inherits_from(&ANY_TYPED_PROFILE));
	assert!(!entry.info.inherits_from(&ANY_TYPED_CONTAINER));
	let generic = entry.info.find_parameterization(TYPED_PROFILE).expect("typed profile lineage");
	assert_eq!(generic.param(0), Some(Lane::ident()));

	let Ok(Instance::Profile(profile)) = (entry.construct.unwrap())() else {
		panic!("expected a profile instance");
	};
	assert_eq!(profile.effective_key(), Some("Fast"));
}

#[test]
fn custom_constructor_is_used() {
	let entry = registered(TypeIdent::of::<SlowLaneProfile>());
	let Ok(Instance::Profile(profile)) = (entry.construct.unwrap())() else {
		panic!("expected a profile instance");
	};
	assert_eq!(profile.name(), Some("slow"));
	assert_eq!(profile.effective_key(), Some("Slow"));
}

#[test]
fn untyped_profile_has_no_key_domain() {
	let entry = registered(TypeIdent::of::<DetachedProfile>());
	assert!(entry.info.inherits_from(&PROFILE));
	assert!(!entry.info.inherits_from(&ANY_TYPED_PROFILE));
	assert!(entry.info.find_parameterization(TYPED_PROFILE).is_none());
}

#[test]
fn container_macro_binds_key_and_profile() {
	let entry = registered(TypeIdent::of::<Lanes>());
	assert!(entry.info.inherits_from(&ANY_TYPED_CONTAINER));
	let generic = entry.info.find_parameterization(TYPED_CONTAINER).expect("typed container lineage");
	assert_eq!(generic.param(0), Some(Lane::ident()));
	assert_eq!(generic.param(1), Some(TypeIdent::of::<LaneProfile>()));

	let Ok(Instance::Container(container)) = (entry.construct.unwrap())() else {
		panic!("expected a container instance");
	};
	assert_eq!(container.label(), "Lanes");
	assert_eq!(container.key_type(), Lane::ident());
	assert!(container.typed::<LaneProfile>().is_some());
}

#[test]
fn static_catalog_keeps_order_and_errors() {
	let catalog = StaticCatalog::new()
		.with(registered(TypeIdent::of::<Lanes>()))
		.with_error(CatalogError::Unavailable("broken".into()))
		.with(registered(TypeIdent::of::<LaneProfile>()));
	assert_eq!(catalog.len(), 3);

	for _ in 0..2 {
		let entries: Vec<_> = catalog.entries().collect();
		assert!(entries[0].as_ref().is_ok_and(|ty| ty.info.ident.is::<Lanes>()));
		assert!(matches!(entries[1], Err(CatalogError::Unavailable(_))));
		assert!(entries[2].as_ref().is_ok_and(|ty| ty.info.ident.is::<LaneProfile>()));
	}
}
