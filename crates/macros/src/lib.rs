//! Procedural macros for the keel profile registry.
//!
//! Provides derive macros:
//! * `#[derive(KeyDomain)]` - ordinal and member-name tables for key enums

use proc_macro::TokenStream;

/// Key domain derive implementation.
mod key_domain;

/// Derives `keel_registry::KeyDomain` for a fieldless enum.
///
/// The ordinal of each member is its discriminant and its name is the variant
/// identifier, so zero-valued members act as the "unset" key.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KeyDomain)]
/// pub enum Color {
///     None = 0,
///     Red = 1,
///     Blue = 2,
/// }
/// ```
///
/// Generic enums, enums without variants and variants carrying data are rejected.
#[proc_macro_derive(KeyDomain)]
pub fn derive_key_domain(input: TokenStream) -> TokenStream {
	key_domain::derive_key_domain(input)
}
