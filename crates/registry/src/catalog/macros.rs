//! Registration macros for the type catalog.

/// Registers a profile type with the inventory catalog.
///
/// ```ignore
/// profile!(RedProfile: Color);
/// profile!(BlueProfile: Color, with = BlueProfile::load);
/// profile!(LooseProfile);
/// ```
///
/// The typed forms declare `RedProfile : Profile<Color>`. The constructor
/// defaults to [`Default`]; `with` names a `fn() -> Result<Self, ConstructError>`
/// instead. The untyped form registers a profile with no key domain, which
/// discovery classifies as a profile and then skips when wiring.
#[macro_export]
macro_rules! profile {
	($type:ty : $key:ty) => {
		$crate::profile!($type : $key, with = $crate::catalog::default_profile::<$type>);
	};
	($type:ty : $key:ty, with = $ctor:path) => {
		const _: () = {
			static PARAMS: [$crate::TypeIdent; 1] = [$crate::TypeIdent::of::<$key>()];
			static BASE: $crate::lineage::TypeInfo =
				$crate::lineage::TypeInfo::class($crate::TypeIdent::of::<$crate::lineage::ProfileOf<$key>>())
					.abstract_()
					.parameterized($crate::lineage::TYPED_PROFILE, &PARAMS)
					.with_base(&$crate::lineage::PROFILE);
			static INFO: $crate::lineage::TypeInfo =
				$crate::lineage::TypeInfo::class($crate::TypeIdent::of::<$type>()).with_base(&BASE);

			fn construct() -> ::core::result::Result<$crate::catalog::Instance, $crate::ConstructError> {
				let profile: $type = $ctor()?;
				::core::result::Result::Ok($crate::catalog::typed_profile_instance::<$key, $type>(profile))
			}

			$crate::inventory::submit! {
				$crate::catalog::CatalogType::new(&INFO, construct, ::core::env!("CARGO_PKG_NAME"))
			}
		};
	};
	($type:ty) => {
		const _: () = {
			static INFO: $crate::lineage::TypeInfo =
				$crate::lineage::TypeInfo::class($crate::TypeIdent::of::<$type>()).with_base(&$crate::lineage::PROFILE);

			fn construct() -> ::core::result::Result<$crate::catalog::Instance, $crate::ConstructError> {
				let profile: $type = $crate::catalog::default_profile::<$type>()?;
				::core::result::Result::Ok($crate::catalog::Instance::profile(profile))
			}

			$crate::inventory::submit! {
				$crate::catalog::CatalogType::new(&INFO, construct, ::core::env!("CARGO_PKG_NAME"))
			}
		};
	};
}

/// Registers a profile container type with the inventory catalog.
///
/// ```ignore
/// pub struct ColorContainer;
/// profile_container!(ColorContainer: Color => ColorProfile);
/// ```
///
/// Declares `ColorContainer : ProfileContainer<Color, ColorProfile>`. The
/// marker type only names the container; discovery builds a
/// [`ProfileContainer`](crate::ProfileContainer) for it.
#[macro_export]
macro_rules! profile_container {
	($type:ty : $key:ty => $profile:ty) => {
		const _: () = {
			static PARAMS: [$crate::TypeIdent; 2] = [$crate::TypeIdent::of::<$key>(), $crate::TypeIdent::of::<$profile>()];
			static BASE: $crate::lineage::TypeInfo =
				$crate::lineage::TypeInfo::class($crate::TypeIdent::of::<$crate::lineage::ContainerOf<$key, $profile>>())
					.abstract_()
					.parameterized($crate::lineage::TYPED_CONTAINER, &PARAMS)
					.with_base(&$crate::lineage::CONTAINER);
			static INFO: $crate::lineage::TypeInfo =
				$crate::lineage::TypeInfo::class($crate::TypeIdent::of::<$type>()).with_base(&BASE);

			fn construct() -> ::core::result::Result<$crate::catalog::Instance, $crate::ConstructError> {
				::core::result::Result::Ok($crate::catalog::typed_container_instance::<$key, $profile>(
					$crate::TypeIdent::of::<$type>().short_name(),
				))
			}

			$crate::inventory::submit! {
				$crate::catalog::CatalogType::new(&INFO, construct, ::core::env!("CARGO_PKG_NAME"))
			}
		};
	};
}
