//! Integration tests for link-time registration and discovery.
//!
//! Every type below registers itself with the inventory catalog, so these tests
//! exercise the same path a downstream crate takes.

use std::any::type_name;
use std::sync::Mutex;

use keel_registry::{
	ConstructError, InventoryCatalog, KeyDomain, Profile, ProfileMeta, Registry, SkipReason, TypeIdent, TypeInfo,
	TypedProfile, impl_typed_profile, profile, profile_container,
};
// Library and dev dependencies this test binary links without naming.
use {inventory as _, keel_macros as _, proptest as _, rustc_hash as _, serde as _, thiserror as _, toml as _, tracing as _};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, KeyDomain)]
pub enum Color {
	#[default]
	None = 0,
	Red = 1,
	Blue = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, KeyDomain)]
pub enum Theme {
	#[default]
	Unset = 0,
	Dark = 1,
}

#[derive(Debug)]
pub struct ColorProfile {
	meta: ProfileMeta,
	color: Color,
}

impl Default for ColorProfile {
	fn default() -> Self {
		Self {
			meta: ProfileMeta::new().named("red").described("Primary red"),
			color: Color::Red,
		}
	}
}

impl TypedProfile for ColorProfile {
	type Key = Color;

	fn key(&self) -> Color {
		self.color
	}
}

impl_typed_profile!(ColorProfile);

#[derive(Debug)]
pub struct BlueProfile {
	meta: ProfileMeta,
}

impl BlueProfile {
	fn load() -> Result<Self, ConstructError> {
		Ok(Self {
			meta: ProfileMeta::new().named("blue"),
		})
	}
}

impl TypedProfile for BlueProfile {
	type Key = Color;

	fn key(&self) -> Color {
		Color::Blue
	}
}

impl_typed_profile!(BlueProfile);

#[derive(Debug)]
pub struct FlakyProfile {
	meta: ProfileMeta,
}

impl FlakyProfile {
	fn load() -> Result<Self, ConstructError> {
		Err(ConstructError::failed("settings file missing"))
	}
}

impl TypedProfile for FlakyProfile {
	type Key = Color;

	fn key(&self) -> Color {
		Color::Red
	}
}

impl_typed_profile!(FlakyProfile);

#[derive(Debug)]
pub struct ThemeProfile {
	meta: ProfileMeta,
}

impl Default for ThemeProfile {
	fn default() -> Self {
		Self {
			meta: ProfileMeta::new().named("solarized").with_key_override("solarized"),
		}
	}
}

impl TypedProfile for ThemeProfile {
	type Key = Theme;

	fn key(&self) -> Theme {
		Theme::Unset
	}
}

impl_typed_profile!(ThemeProfile);

#[derive(Debug, Default)]
pub struct AuditProfile {
	meta: ProfileMeta,
}

impl keel_registry::KeyTyped for AuditProfile {
	fn key_type(&self) -> TypeIdent {
		TypeIdent::of::<Self>()
	}
}

impl Profile for AuditProfile {
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

pub struct Colors;
pub struct Themes;

profile!(ColorProfile: Color);
profile!(BlueProfile: Color, with = BlueProfile::load);
profile!(FlakyProfile: Color, with = FlakyProfile::load);
profile!(ThemeProfile: Theme);
profile!(AuditProfile);
profile_container!(Colors: Color => ColorProfile);
profile_container!(Themes: Theme => ThemeProfile);

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn red_profile_is_found_by_enum_and_string_key() {
	init_tracing();
	let registry = Registry::new(InventoryCatalog);
	registry.initialize(&[]);

	let by_enum: Vec<&dyn Profile> = registry.profiles_by_enum_key(Color::Red, None).collect();
	assert_eq!(by_enum.len(), 1);
	assert!(keel_registry::profile::downcast_ref::<ColorProfile>(by_enum[0]).is_some());

	let by_string: Vec<&dyn Profile> = registry.profiles_by_string_key("Red").collect();
	assert_eq!(by_string.len(), 1);
	assert!(std::ptr::addr_eq(by_enum[0], by_string[0]));
	assert_eq!(by_string[0].description(), Some("Primary red"));
}

#[test]
fn typed_queries_resolve_through_key_domain() {
	let registry = Registry::new(InventoryCatalog);
	registry.initialize(&[]);

	let red = registry.profile::<ColorProfile>(Color::Red, None).expect("red profile");
	assert_eq!(red.name(), Some("red"));
	assert_eq!(red.key(), Color::Red);

	assert_eq!(registry.all_profiles::<ColorProfile>().count(), 1);
	assert_eq!(registry.all_profiles::<BlueProfile>().count(), 1);
	assert_eq!(registry.all_profiles_by_key_type::<Color>().count(), 2);
	assert_eq!(registry.typed::<ColorProfile>().map(|view| view.len()), Some(1));

	let theme = registry.profile::<ThemeProfile>(Theme::Unset, Some("solarized"));
	assert!(theme.is_some());
	assert!(registry.profile::<ThemeProfile>(Theme::Unset, Some("monokai")).is_none());
	assert_eq!(registry.profiles_by_enum_key(Theme::Dark, None).count(), 0);
}

#[test]
fn report_explains_unwired_types() {
	let registry = Registry::new(InventoryCatalog);
	let report = registry.initialize(&[]);

	assert_eq!(report.containers.len(), 2);
	assert_eq!(report.profile_types, 5);
	assert_eq!(report.profiles.len(), 3);

	let flaky = report.skip_for(type_name::<FlakyProfile>()).expect("flaky profile skipped");
	assert!(matches!(&flaky.reason, SkipReason::Construct(ConstructError::Failed(reason)) if reason == "settings file missing"));

	let audit = report.skip_for(type_name::<AuditProfile>()).expect("audit profile skipped");
	assert!(matches!(audit.reason, SkipReason::MissingKeyType));
}

#[test]
fn hooks_see_every_profile_type() {
	let registry = Registry::new(InventoryCatalog);
	let seen = Mutex::new(Vec::new());
	let hook = |ty: &'static TypeInfo| -> anyhow::Result<()> {
		seen.lock().unwrap().push(ty.name());
		Ok(())
	};
	registry.initialize(&[&hook]);

	let mut seen = seen.into_inner().unwrap();
	seen.sort_unstable();
	let mut expected = vec![
		type_name::<AuditProfile>(),
		type_name::<BlueProfile>(),
		type_name::<ColorProfile>(),
		type_name::<FlakyProfile>(),
		type_name::<ThemeProfile>(),
	];
	expected.sort_unstable();
	assert_eq!(seen, expected);
}

#[test]
fn reset_then_initialize_reaches_same_state() {
	let mut registry = Registry::new(InventoryCatalog);
	let first = {
		let report = registry.initialize(&[]);
		(report.containers.len(), report.profiles.len(), report.skipped.len())
	};

	registry.reset();
	assert!(!registry.is_initialized());
	assert_eq!(registry.profiles_by_string_key("Red").count(), 0);

	let report = registry.initialize(&[]);
	assert_eq!((report.containers.len(), report.profiles.len(), report.skipped.len()), first);
	assert_eq!(registry.profiles_by_string_key("Red").count(), 1);
}

#[test]
fn global_registry_initializes_once_across_threads() {
	let reports: Vec<usize> = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| scope.spawn(|| Registry::global().initialize(&[]) as *const _ as usize))
			.collect();
		handles.into_iter().map(|handle| handle.join().unwrap()).collect()
	});

	assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
	assert!(Registry::global().is_initialized());
	assert_eq!(Registry::global().profiles_by_string_key("Blue").count(), 1);
}

#[test]
fn key_domain_derive_matches_declaration() {
	assert_eq!(Color::members(), &[Color::None, Color::Red, Color::Blue]);
	assert_eq!(Color::Blue.ordinal(), 2);
	assert_eq!(Color::Red.name(), "Red");
	assert_eq!(Color::from_name("Blue"), Some(Color::Blue));
	assert_eq!(Color::from_name("Green"), None);
	assert!(Color::None.is_unset());
	assert_eq!(Color::ident(), TypeIdent::of::<Color>());
	assert_eq!(Color::None.lookup_key(Some("custom")), "custom");
	assert_eq!(Color::Red.lookup_key(Some("custom")), "Red");
}
