//! Typed profile registry.
//!
//! A *profile* is a named, described configuration value stored under a key
//! from an enumerated *key domain*. Profiles of one domain live in a
//! [`ProfileContainer`]; the [`Registry`] maps each domain to its container.
//!
//! Types take part in discovery by registering at link time:
//!
//! ```ignore
//! use keel_registry::{KeyDomain, ProfileMeta, TypedProfile, impl_typed_profile, profile, profile_container};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KeyDomain)]
//! pub enum Color { None = 0, Red = 1, Blue = 2 }
//!
//! #[derive(Debug, Default)]
//! pub struct ColorProfile { meta: ProfileMeta, key: Color }
//!
//! impl TypedProfile for ColorProfile {
//!     type Key = Color;
//!     fn key(&self) -> Color { self.key }
//! }
//! impl_typed_profile!(ColorProfile);
//!
//! pub struct Colors;
//! profile_container!(Colors: Color => ColorProfile);
//! ```
//!
//! # Modules
//!
//! - [`key`] - key-type identity and enumerated key domains
//! - [`lineage`] - declared type lineage and inheritance queries
//! - [`profile`] - profiles and their effective key
//! - [`container`] - per-domain profile storage
//! - [`typed`] - typed container views
//! - [`catalog`] - link-time type catalog and registration macros
//! - [`registry`] - discovery and queries
//! - [`config`] - registry configuration
//! - [`error`] - error types

extern crate self as keel_registry;

pub mod catalog;
pub mod config;
pub mod container;
pub mod error;
pub mod key;
pub mod lineage;
pub mod profile;
pub mod registry;
pub mod typed;

pub use catalog::{CatalogType, InventoryCatalog, StaticCatalog, TypeCatalog};
pub use config::{ContainerPolicy, RegistryConfig};
pub use container::{AddOutcome, ProfileContainer};
pub use error::{CatalogError, ConfigError, ConstructError, SkipReason};
#[doc(hidden)]
pub use inventory;
pub use keel_macros::KeyDomain;
pub use key::{KeyDomain, TypeIdent};
pub use lineage::{KeyTyped, TypeInfo};
pub use profile::{Profile, ProfileMeta, TypedProfile};
pub use registry::{DiscoveryHook, DiscoveryReport, ProfileLookup, Registry};
pub use typed::{TypedContainer, TypedContainerMut};
