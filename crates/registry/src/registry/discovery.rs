//! One-shot discovery over a [`TypeCatalog`].
//!
//! Runs in three passes: register containers, run the discovery hooks over
//! every profile type, then construct each profile and wire it into the
//! container for its key domain. No failure in one candidate stops the others.

use std::any::Any;
use std::collections::hash_map::Entry;
use std::panic::{self, AssertUnwindSafe};

use super::report::{DiscoveryReport, RegisteredContainer, WiredProfile};
use super::{DiscoveryHook, Pool};
use crate::catalog::{CatalogType, Instance, TypeCatalog};
use crate::config::{ContainerPolicy, RegistryConfig};
use crate::container::AddOutcome;
use crate::error::{ConstructError, SkipReason};
use crate::key::TypeIdent;
use crate::lineage::{CONTAINER, PROFILE, TypeKind};

pub(super) fn discover(catalog: &dyn TypeCatalog, config: &RegistryConfig, hooks: &[&DiscoveryHook<'_>]) -> Pool {
	let mut pool = Pool::default();
	let mut profile_types = Vec::new();

	for entry in catalog.entries() {
		let ty = match entry {
			Ok(ty) => ty,
			Err(error) => {
				pool.report.skip(None, error.into());
				continue;
			}
		};
		let info = ty.info;
		if info.is_abstract || info.kind == TypeKind::Interface {
			continue;
		}
		if info.inherits_from(&CONTAINER) {
			register_container(&mut pool, config.container_policy, ty);
		} else if info.inherits_from(&PROFILE) {
			profile_types.push(ty);
		} else {
			tracing::trace!(ty = ty.name(), "catalog type is neither container nor profile");
		}
	}

	pool.report.profile_types = profile_types.len();
	for &ty in &profile_types {
		run_hooks(&mut pool.report, hooks, ty);
	}

	for &ty in &profile_types {
		wire_profile(&mut pool, ty);
	}

	tracing::info!(
		containers = pool.containers.len(),
		profiles = pool.report.profiles.len(),
		skipped = pool.report.skipped.len(),
		hook_failures = pool.report.hook_failures.len(),
		"profile registry initialized"
	);
	pool
}

fn register_container(pool: &mut Pool, policy: ContainerPolicy, ty: &'static CatalogType) {
	let name = ty.name();
	let container = match construct(ty) {
		Ok(Instance::Container(container)) => container,
		Ok(other) => {
			pool.report.skip(
				Some(name),
				SkipReason::KindMismatch {
					declared: "container",
					built: other.kind(),
				},
			);
			return;
		}
		Err(reason) => {
			pool.report.skip(Some(name), reason);
			return;
		}
	};

	let Some(key_type) = ty.info.container_key_type() else {
		pool.report.skip(Some(name), SkipReason::MissingKeyType);
		return;
	};
	if container.key_type() != key_type {
		pool.report.skip(
			Some(name),
			SkipReason::KeyTypeMismatch {
				declared: key_type,
				actual: container.key_type(),
			},
		);
		return;
	}

	match pool.containers.entry(key_type) {
		Entry::Vacant(slot) => {
			slot.insert(container);
		}
		Entry::Occupied(mut slot) => match policy {
			ContainerPolicy::FirstWins => {
				let existing = owner(&pool.report, key_type);
				pool.report.skip(Some(name), SkipReason::DuplicateContainer { key_type, existing });
				return;
			}
			ContainerPolicy::LastWins => {
				slot.insert(container);
				let replaced = owner(&pool.report, key_type);
				pool.report.containers.retain(|registered| registered.key_type != key_type);
				pool.report.skip(Some(replaced), SkipReason::DuplicateContainer { key_type, existing: name });
			}
		},
	}

	tracing::debug!(ty = name, key_type = %key_type, "registered profile container");
	pool.report.containers.push(RegisteredContainer { ty: name, key_type });
}

fn owner(report: &DiscoveryReport, key_type: TypeIdent) -> &'static str {
	report
		.containers
		.iter()
		.find(|registered| registered.key_type == key_type)
		.map_or("<unknown>", |registered| registered.ty)
}

fn run_hooks(report: &mut DiscoveryReport, hooks: &[&DiscoveryHook<'_>], ty: &'static CatalogType) {
	for (index, hook) in hooks.iter().enumerate() {
		match panic::catch_unwind(AssertUnwindSafe(|| hook(ty.info))) {
			Ok(Ok(())) => {}
			Ok(Err(error)) => report.hook_failed(index, ty.name(), format!("{error:#}")),
			Err(payload) => report.hook_failed(index, ty.name(), format!("panicked: {}", panic_message(&*payload))),
		}
	}
}

fn wire_profile(pool: &mut Pool, ty: &'static CatalogType) {
	let name = ty.name();
	let profile = match construct(ty) {
		Ok(Instance::Profile(profile)) => profile,
		Ok(other) => {
			pool.report.skip(
				Some(name),
				SkipReason::KindMismatch {
					declared: "profile",
					built: other.kind(),
				},
			);
			return;
		}
		Err(reason) => {
			pool.report.skip(Some(name), reason);
			return;
		}
	};

	// Untyped profiles have no key domain and are left unwired.
	let Some(key_type) = ty.info.profile_key_type() else {
		pool.report.pass_over(name, SkipReason::MissingKeyType);
		return;
	};
	if profile.key_type() != key_type {
		pool.report.skip(
			Some(name),
			SkipReason::KeyTypeMismatch {
				declared: key_type,
				actual: profile.key_type(),
			},
		);
		return;
	}
	let Some(container) = pool.containers.get_mut(&key_type) else {
		pool.report.pass_over(name, SkipReason::NoContainer(key_type));
		return;
	};

	let key = profile.effective_key().map(str::to_owned);
	match (container.add(profile), key) {
		(AddOutcome::Inserted, Some(key)) => {
			tracing::debug!(ty = name, key_type = %key_type, key = %key, "wired profile");
			pool.report.profiles.push(WiredProfile { ty: name, key_type, key });
		}
		(AddOutcome::KeptExisting, Some(key)) => {
			pool.report.pass_over(name, SkipReason::DuplicateKey(key));
		}
		_ => pool.report.skip(Some(name), SkipReason::MissingKey),
	}
}

fn construct(ty: &CatalogType) -> Result<Instance, SkipReason> {
	let Some(construct) = ty.construct else {
		return Err(SkipReason::NotConstructible);
	};
	match panic::catch_unwind(construct) {
		Ok(result) => result.map_err(SkipReason::from),
		Err(payload) => Err(ConstructError::Panicked(panic_message(&*payload)).into()),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_owned()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"non-string panic payload".to_owned()
	}
}
