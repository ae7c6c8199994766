use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

pub fn derive_key_domain(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	let Data::Enum(data) = &input.data else {
		return syn::Error::new_spanned(&input.ident, "KeyDomain can only be derived for enums")
			.to_compile_error()
			.into();
	};

	if !input.generics.params.is_empty() {
		return syn::Error::new_spanned(&input.generics, "KeyDomain cannot be derived for generic enums")
			.to_compile_error()
			.into();
	}

	if data.variants.is_empty() {
		return syn::Error::new_spanned(&input.ident, "KeyDomain requires at least one variant")
			.to_compile_error()
			.into();
	}

	if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
		return syn::Error::new_spanned(variant, "KeyDomain variants cannot carry data")
			.to_compile_error()
			.into();
	}

	let ty = &input.ident;
	let idents: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
	let names: Vec<LitStr> = idents
		.iter()
		.map(|ident| LitStr::new(&ident.unraw().to_string(), Span::call_site()))
		.collect();

	let expanded = quote! {
		impl ::keel_registry::KeyDomain for #ty {
			#[inline]
			fn ordinal(self) -> i64 {
				self as i64
			}

			fn name(self) -> &'static str {
				match self {
					#( #ty::#idents => #names, )*
				}
			}

			fn members() -> &'static [Self] {
				const MEMBERS: &[#ty] = &[#( #ty::#idents ),*];
				MEMBERS
			}
		}
	};

	expanded.into()
}
