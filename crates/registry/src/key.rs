//! Key-type identities and enumerated key domains.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type, usable in `static` tables.
///
/// Holds function pointers rather than a resolved [`TypeId`] so that it can be
/// built in const context (`TypeIdent::of::<T>()`). Equality and hashing go
/// through the [`TypeId`]; the type name is only used for display.
#[derive(Clone, Copy)]
pub struct TypeIdent {
	id: fn() -> TypeId,
	name: fn() -> &'static str,
}

impl TypeIdent {
	/// Returns the identity of `T`.
	pub const fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>,
			name: std::any::type_name::<T>,
		}
	}

	/// Returns the underlying [`TypeId`].
	#[inline]
	pub fn type_id(&self) -> TypeId {
		(self.id)()
	}

	/// Returns the fully qualified type name.
	#[inline]
	pub fn name(&self) -> &'static str {
		(self.name)()
	}

	/// Returns the type name without its module path.
	pub fn short_name(&self) -> &'static str {
		let name = self.name();
		let base = name.split('<').next().unwrap_or(name);
		match base.rfind("::") {
			Some(idx) => &name[idx + 2..],
			None => name,
		}
	}

	/// Returns true if this is the identity of `T`.
	#[inline]
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.type_id() == TypeId::of::<T>()
	}
}

impl PartialEq for TypeIdent {
	fn eq(&self, other: &Self) -> bool {
		self.type_id() == other.type_id()
	}
}

impl Eq for TypeIdent {}

impl Hash for TypeIdent {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id().hash(state);
	}
}

impl fmt::Debug for TypeIdent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeIdent({})", self.name())
	}
}

impl fmt::Display for TypeIdent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A closed, enumerated key domain.
///
/// Every container in the registry is partitioned by one key domain. Members
/// map to an integer ordinal and a canonical name; the member with ordinal
/// zero is the "unset" key, and profiles keyed by it are addressed through a
/// string override instead of the member name.
///
/// Usually derived with `#[derive(KeyDomain)]` on a fieldless enum.
pub trait KeyDomain: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
	/// Underlying integer value of this member.
	fn ordinal(self) -> i64;

	/// Canonical name of this member.
	fn name(self) -> &'static str;

	/// All members of the domain, in declaration order.
	fn members() -> &'static [Self];

	/// Looks up a member by its canonical name.
	fn from_name(name: &str) -> Option<Self> {
		Self::members().iter().copied().find(|member| member.name() == name)
	}

	/// Returns true for the zero-valued ("unset") member.
	#[inline]
	fn is_unset(self) -> bool {
		self.ordinal() == 0
	}

	/// Identity of the domain type.
	#[inline]
	fn ident() -> TypeIdent {
		TypeIdent::of::<Self>()
	}

	/// Storage key used for this member, honoring the zero-key override.
	///
	/// Non-zero members resolve to their name. The zero member resolves to
	/// `key_override`, or the empty string when no override is given.
	fn lookup_key(self, key_override: Option<&str>) -> &str {
		if self.is_unset() { key_override.unwrap_or("") } else { self.name() }
	}
}
