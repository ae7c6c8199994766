//! Declared type lineage.
//!
//! # Role
//!
//! Rust has no runtime inheritance, so every type that takes part in discovery
//! declares its ancestry up front as a static [`TypeInfo`]: its base type, the
//! interfaces it satisfies, and (for parameterizations of a generic definition)
//! the definition it instantiates together with the bound type parameters.
//!
//! The helpers here answer "does A inherit from / implement B". Parameterized
//! types match by their definition, not by parameter equality, so
//! `ProfileContainer<Color, ColorProfile>` satisfies a query for any
//! `ProfileContainer<_, _>`. Lineage is walked once per type while the registry
//! is discovering; queries never touch it.

use std::fmt;
use std::marker::PhantomData;

use crate::container::ProfileContainer;
use crate::key::TypeIdent;
use crate::profile::Profile;


/// Identity of a generic definition, independent of its parameters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefinitionId(&'static str);

impl DefinitionId {
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	pub fn as_str(&self) -> &'static str {
		self.0
	}
}

impl fmt::Debug for DefinitionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "DefinitionId({})", self.0)
	}
}

/// `Profile<K>`: a profile bound to key domain `K`.
pub const TYPED_PROFILE: DefinitionId = DefinitionId::new("keel::Profile<K>");

/// `ProfileContainer<K, P>`: a container for key domain `K` holding profiles `P`.
pub const TYPED_CONTAINER: DefinitionId = DefinitionId::new("keel::ProfileContainer<K, P>");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	Class,
	Interface,
}

/// A generic definition together with the parameters bound to it.
#[derive(Debug, Clone, Copy)]
pub struct Parameterization {
	pub definition: DefinitionId,
	pub params: &'static [TypeIdent],
}

impl Parameterization {
	/// Returns the `index`-th bound parameter.
	pub fn param(&self, index: usize) -> Option<TypeIdent> {
		self.params.get(index).copied()
	}
}

/// Static description of a type and its declared ancestry.
#[derive(Debug)]
pub struct TypeInfo {
	pub ident: TypeIdent,
	pub kind: TypeKind,
	pub is_abstract: bool,
	/// Set when this type is a parameterization of a generic definition.
	pub generic: Option<Parameterization>,
	pub base: Option<&'static TypeInfo>,
	pub interfaces: &'static [&'static TypeInfo],
}

impl TypeInfo {
	/// Describes a concrete class with no declared ancestry.
	pub const fn class(ident: TypeIdent) -> Self {
		Self {
			ident,
			kind: TypeKind::Class,
			is_abstract: false,
			generic: None,
			base: None,
			interfaces: &[],
		}
	}

	/// Describes an interface.
	pub const fn interface(ident: TypeIdent) -> Self {
		Self {
			ident,
			kind: TypeKind::Interface,
			is_abstract: true,
			generic: None,
			base: None,
			interfaces: &[],
		}
	}

	/// Marks the type as abstract; discovery never constructs abstract types.
	pub const fn abstract_(mut self) -> Self {
		self.is_abstract = true;
		self
	}

	pub const fn with_base(mut self, base: &'static TypeInfo) -> Self {
		self.base = Some(base);
		self
	}

	pub const fn implementing(mut self, interfaces: &'static [&'static TypeInfo]) -> Self {
		self.interfaces = interfaces;
		self
	}

	/// Binds this type to `definition` with the given parameters.
	pub const fn parameterized(mut self, definition: DefinitionId, params: &'static [TypeIdent]) -> Self {
		self.generic = Some(Parameterization { definition, params });
		self
	}

	pub fn name(&self) -> &'static str {
		self.ident.name()
	}

	/// Iterates the type itself followed by its base chain up to the root.
	pub fn ancestors(&self) -> impl Iterator<Item = &TypeInfo> {
		std::iter::successors(Some(self), |ty| ty.base)
	}

	/// Returns true if both describe the same type, or both are
	/// parameterizations of the same generic definition.
	pub fn matches(&self, other: &TypeInfo) -> bool {
		if self.ident == other.ident {
			return true;
		}
		match (self.generic, other.generic) {
			(Some(a), Some(b)) => a.definition == b.definition,
			_ => false,
		}
	}

	/// Returns true if `candidate` appears in this type's base chain (the type
	/// itself included). Interfaces are delegated to [`Self::implements_interface`].
	pub fn inherits_from(&self, candidate: &TypeInfo) -> bool {
		if candidate.kind == TypeKind::Interface {
			return self.implements_interface(candidate);
		}
		self.ancestors().any(|ty| ty.matches(candidate))
	}

	/// Returns true if any level of the base chain satisfies `interface`,
	/// directly or through an interface it extends.
	pub fn implements_interface(&self, interface: &TypeInfo) -> bool {
		if interface.kind != TypeKind::Interface {
			return false;
		}
		self.ancestors()
			.any(|ty| ty.interfaces.iter().any(|iface| interface_satisfies(iface, interface)))
	}

	/// Finds the first ancestor that parameterizes `definition`.
	pub fn find_parameterization(&self, definition: DefinitionId) -> Option<Parameterization> {
		self.ancestors()
			.filter_map(|ty| ty.generic)
			.find(|generic| generic.definition == definition)
	}

	/// Key domain bound by the nearest `Profile<K>` ancestor, if any.
	pub fn profile_key_type(&self) -> Option<TypeIdent> {
		self.find_parameterization(TYPED_PROFILE)?.param(0)
	}

	/// Key domain bound by the nearest `ProfileContainer<K, P>` ancestor, if any.
	pub fn container_key_type(&self) -> Option<TypeIdent> {
		self.find_parameterization(TYPED_CONTAINER)?.param(0)
	}
}

fn interface_satisfies(declared: &TypeInfo, wanted: &TypeInfo) -> bool {
	declared.matches(wanted) || declared.interfaces.iter().any(|parent| interface_satisfies(parent, wanted))
}

/// Types that belong to exactly one key domain.
pub trait KeyTyped {
	fn key_type(&self) -> TypeIdent;
}

/// Lineage marker for `Profile<K>`.
pub struct ProfileOf<K>(PhantomData<fn() -> K>);

/// Lineage marker for `ProfileContainer<K, P>`.
pub struct ContainerOf<K, P>(PhantomData<fn() -> (K, P)>);

#[doc(hidden)]
pub enum Open {}

/// The [`KeyTyped`] interface.
pub static KEY_TYPED: TypeInfo = TypeInfo::interface(TypeIdent::of::<dyn KeyTyped>());

static ROOT_INTERFACES: [&TypeInfo; 1] = [&KEY_TYPED];

/// Root of every profile type.
pub static PROFILE: TypeInfo = TypeInfo::class(TypeIdent::of::<dyn Profile>())
	.abstract_()
	.implementing(&ROOT_INTERFACES);

/// Root of every container type.
pub static CONTAINER: TypeInfo = TypeInfo::class(TypeIdent::of::<ProfileContainer>())
	.abstract_()
	.implementing(&ROOT_INTERFACES);

/// `Profile<_>` with no parameter bound; matches every typed profile.
pub static ANY_TYPED_PROFILE: TypeInfo = TypeInfo::class(TypeIdent::of::<ProfileOf<Open>>())
	.abstract_()
	.parameterized(TYPED_PROFILE, &[])
	.with_base(&PROFILE);

/// `ProfileContainer<_, _>` with no parameters bound; matches every typed container.
pub static ANY_TYPED_CONTAINER: TypeInfo = TypeInfo::class(TypeIdent::of::<ContainerOf<Open, Open>>())
	.abstract_()
	.parameterized(TYPED_CONTAINER, &[])
	.with_base(&CONTAINER);
