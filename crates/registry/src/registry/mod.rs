//! The profile registry.
//!
//! # Role
//!
//! [`Registry`] maps each key domain to the one [`ProfileContainer`] serving
//! it. The map is built by a single discovery run over a [`TypeCatalog`] and
//! is read-only afterwards, apart from explicit mutation through
//! [`Registry::container_mut`].
//!
//! # Lifecycle
//!
//! ```text
//! new ──► initialize ──► queries ──► reset (&mut) ──► initialize ...
//! ```
//!
//! * [`Registry::initialize`] runs discovery at most once. Concurrent callers
//!   block until the winning call finishes; none of them sees a partial map.
//! * Queries never initialize. Before [`Registry::initialize`] they yield
//!   nothing.
//! * [`Registry::reset`] and [`Registry::container_mut`] need `&mut self`, so
//!   they cannot overlap with readers.
//!
//! # Invariants
//!
//! * At most one container per key domain. Collisions follow
//!   [`ContainerPolicy`](crate::ContainerPolicy).
//! * A profile is only ever stored in the container of its own key domain.
//! * Discovery never fails as a whole; see [`DiscoveryReport`].

use std::sync::OnceLock;

use rustc_hash::FxHashMap as HashMap;

use crate::catalog::{InventoryCatalog, TypeCatalog};
use crate::config::RegistryConfig;
use crate::container::ProfileContainer;
use crate::key::{KeyDomain, TypeIdent};
use crate::lineage::TypeInfo;
use crate::profile::{Profile, TypedProfile, downcast_ref};
use crate::typed::{TypedContainer, TypedContainerMut};

mod discovery;
pub mod report;


pub use report::DiscoveryReport;

/// Callback invoked once per discovered profile type.
///
/// Errors and panics are recorded in the [`DiscoveryReport`] and otherwise
/// ignored.
///
/// # Deadlocks
///
/// Discovery holds the registry's initialization lock while hooks run. A hook
/// that calls [`Registry::initialize`] on the registry it is running for never
/// returns (the standard library may panic instead). Queries from inside a hook
/// do not block, but they see an uninitialized, empty registry.
pub type DiscoveryHook<'a> = dyn Fn(&'static TypeInfo) -> anyhow::Result<()> + 'a;

/// Discovered state.
#[derive(Debug, Default)]
pub(crate) struct Pool {
	containers: HashMap<TypeIdent, ProfileContainer>,
	report: DiscoveryReport,
}

/// Key-domain indexed registry of profile containers.
pub struct Registry {
	catalog: Box<dyn TypeCatalog>,
	config: RegistryConfig,
	state: OnceLock<Pool>,
}

impl Registry {
	/// Creates an uninitialized registry over `catalog`.
	pub fn new(catalog: impl TypeCatalog + 'static) -> Self {
		Self::with_config(catalog, RegistryConfig::default())
	}

	pub fn with_config(catalog: impl TypeCatalog + 'static, config: RegistryConfig) -> Self {
		Self {
			catalog: Box::new(catalog),
			config,
			state: OnceLock::new(),
		}
	}

	/// Process-wide registry over every type registered in this binary.
	///
	/// Still needs an explicit [`Self::initialize`].
	pub fn global() -> &'static Registry {
		static GLOBAL: OnceLock<Registry> = OnceLock::new();
		GLOBAL.get_or_init(|| Registry::new(InventoryCatalog))
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Runs discovery unless it has already run, then returns its report.
	///
	/// `hooks` are called in order for every discovered profile type, whether
	/// or not the type ends up wired. They are ignored when discovery has
	/// already run.
	///
	/// # Deadlocks
	///
	/// Must not be called from a [`DiscoveryHook`] running for this registry.
	pub fn initialize(&self, hooks: &[&DiscoveryHook<'_>]) -> &DiscoveryReport {
		&self
			.state
			.get_or_init(|| discovery::discover(self.catalog.as_ref(), &self.config, hooks))
			.report
	}

	pub fn is_initialized(&self) -> bool {
		self.state.get().is_some()
	}

	/// Report of the last discovery run, if initialized.
	pub fn report(&self) -> Option<&DiscoveryReport> {
		self.state.get().map(|pool| &pool.report)
	}

	/// Drops every container and returns to the uninitialized state.
	///
	/// Intended for test isolation.
	pub fn reset(&mut self) {
		if let Some(pool) = self.state.take() {
			tracing::info!(containers = pool.containers.len(), "profile registry reset");
		}
	}

	/// Iterates every registered container in no particular order.
	pub fn containers(&self) -> impl Iterator<Item = &ProfileContainer> {
		self.state.get().into_iter().flat_map(|pool| pool.containers.values())
	}

	/// Container registered for `key_type`.
	pub fn container_for(&self, key_type: TypeIdent) -> Option<&ProfileContainer> {
		self.state.get()?.containers.get(&key_type)
	}

	/// Container registered for key domain `K`.
	pub fn container<K: KeyDomain>(&self) -> Option<&ProfileContainer> {
		self.container_for(K::ident())
	}

	/// Mutable access to the container for `K`.
	pub fn container_mut<K: KeyDomain>(&mut self) -> Option<&mut ProfileContainer> {
		self.state.get_mut()?.containers.get_mut(&K::ident())
	}

	/// Typed view of the container declared for `P`.
	pub fn typed<P: TypedProfile>(&self) -> Option<TypedContainer<'_, P>> {
		self.container::<P::Key>()?.typed::<P>()
	}

	/// Typed mutable view of the container declared for `P`.
	pub fn typed_mut<P: TypedProfile>(&mut self) -> Option<TypedContainerMut<'_, P>> {
		self.container_mut::<P::Key>()?.typed_mut::<P>()
	}

	/// Profiles stored under `key`, across all containers.
	pub fn profiles_by_string_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a dyn Profile> + 'a {
		self.containers().filter_map(move |container| container.get(key))
	}

	/// Profiles stored under domain member `key`, across all containers.
	///
	/// See [`ProfileContainer::get_by_key`] for how the zero member and
	/// `key_override` interact.
	pub fn profiles_by_enum_key<'a, K: KeyDomain>(
		&'a self,
		key: K,
		key_override: Option<&'a str>,
	) -> impl Iterator<Item = &'a dyn Profile> + 'a {
		self.containers()
			.filter_map(move |container| container.get_by_key(key, key_override))
	}

	/// Every profile of runtime type `P` in the container for `P::Key`.
	pub fn all_profiles<P: TypedProfile>(&self) -> impl Iterator<Item = &P> {
		self.container::<P::Key>()
			.into_iter()
			.flat_map(|container| container.iter().filter_map(downcast_ref::<P>))
	}

	/// Every profile in the container for `key_type`.
	pub fn profiles_by_key_type(&self, key_type: TypeIdent) -> impl Iterator<Item = &dyn Profile> {
		self.container_for(key_type)
			.into_iter()
			.flat_map(|container| container.iter())
	}

	/// Every profile in the container for key domain `K`.
	pub fn all_profiles_by_key_type<K: KeyDomain>(&self) -> impl Iterator<Item = &dyn Profile> {
		self.profiles_by_key_type(K::ident())
	}

	/// The `P` stored under domain member `key`.
	pub fn profile<P: TypedProfile>(&self, key: P::Key, key_override: Option<&str>) -> Option<&P> {
		self.container::<P::Key>()?
			.get_by_key(key, key_override)
			.and_then(downcast_ref::<P>)
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("config", &self.config)
			.field("initialized", &self.is_initialized())
			.field("containers", &self.state.get().map(|pool| pool.containers.len()))
			.finish_non_exhaustive()
	}
}

/// Read-only profile queries, usable as a trait object.
///
/// This is the surface external consumers (tenant and persistence contexts)
/// see; [`Registry`] implements it.
pub trait ProfileLookup: Send + Sync {
	fn is_initialized(&self) -> bool;

	fn profiles_by_string_key<'a>(&'a self, key: &'a str) -> Box<dyn Iterator<Item = &'a dyn Profile> + 'a>;

	fn profiles_by_key_type(&self, key_type: TypeIdent) -> Box<dyn Iterator<Item = &dyn Profile> + '_>;

	fn profile_by_key(&self, key_type: TypeIdent, key: &str) -> Option<&dyn Profile>;
}

impl ProfileLookup for Registry {
	fn is_initialized(&self) -> bool {
		Registry::is_initialized(self)
	}

	fn profiles_by_string_key<'a>(&'a self, key: &'a str) -> Box<dyn Iterator<Item = &'a dyn Profile> + 'a> {
		Box::new(Registry::profiles_by_string_key(self, key))
	}

	fn profiles_by_key_type(&self, key_type: TypeIdent) -> Box<dyn Iterator<Item = &dyn Profile> + '_> {
		Box::new(Registry::profiles_by_key_type(self, key_type))
	}

	fn profile_by_key(&self, key_type: TypeIdent, key: &str) -> Option<&dyn Profile> {
		self.container_for(key_type)?.get(key)
	}
}
