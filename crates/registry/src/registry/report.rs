//! Record of one discovery run.

use crate::error::SkipReason;
use crate::key::TypeIdent;

/// A container registered for a key domain.
#[derive(Debug, Clone)]
pub struct RegisteredContainer {
	pub ty: &'static str,
	pub key_type: TypeIdent,
}

/// A profile inserted into its container.
#[derive(Debug, Clone)]
pub struct WiredProfile {
	pub ty: &'static str,
	pub key_type: TypeIdent,
	pub key: String,
}

/// A candidate discovery passed over. `ty` is `None` when the catalog entry
/// could not be enumerated at all.
#[derive(Debug, Clone)]
pub struct Skip {
	pub ty: Option<&'static str>,
	pub reason: SkipReason,
}

/// A discovery hook that returned an error or panicked.
#[derive(Debug, Clone)]
pub struct HookFailure {
	/// Position of the hook in the slice passed to `initialize`.
	pub hook: usize,
	pub ty: &'static str,
	pub error: String,
}

/// Outcome of [`Registry::initialize`](crate::Registry::initialize).
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
	pub containers: Vec<RegisteredContainer>,
	pub profiles: Vec<WiredProfile>,
	pub skipped: Vec<Skip>,
	pub hook_failures: Vec<HookFailure>,
	/// Number of profile types handed to the discovery hooks.
	pub profile_types: usize,
}

impl DiscoveryReport {
	/// Profiles dropped because their container already held the key.
	pub fn duplicates(&self) -> impl Iterator<Item = &Skip> {
		self.skipped.iter().filter(|skip| matches!(skip.reason, SkipReason::DuplicateKey(_)))
	}

	/// Containers dropped because another one serves the same key domain.
	pub fn collisions(&self) -> impl Iterator<Item = &Skip> {
		self.skipped.iter().filter(|skip| matches!(skip.reason, SkipReason::DuplicateContainer { .. }))
	}

	/// Returns the skip recorded for the type named `ty`, if any.
	pub fn skip_for(&self, ty: &str) -> Option<&Skip> {
		self.skipped.iter().find(|skip| skip.ty == Some(ty))
	}

	/// Records a skip and logs it at `warn`.
	pub(crate) fn skip(&mut self, ty: Option<&'static str>, reason: SkipReason) {
		match ty {
			Some(ty) => tracing::warn!(ty, reason = %reason, "skipping catalog type"),
			None => tracing::warn!(reason = %reason, "skipping catalog entry"),
		}
		self.skipped.push(Skip { ty, reason });
	}

	/// Records a skip that is part of normal operation and logs it at `debug`.
	pub(crate) fn pass_over(&mut self, ty: &'static str, reason: SkipReason) {
		tracing::debug!(ty, reason = %reason, "catalog type not wired");
		self.skipped.push(Skip { ty: Some(ty), reason });
	}

	pub(crate) fn hook_failed(&mut self, hook: usize, ty: &'static str, error: String) {
		tracing::warn!(hook, ty, error = %error, "discovery hook failed");
		self.hook_failures.push(HookFailure { hook, ty, error });
	}
}
