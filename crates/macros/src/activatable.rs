//! `#[derive(Activatable)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Ident, parse_macro_input};

const INTEGER_REPRS: &[&str] = &["i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize"];

#[derive(Default)]
struct Options {
	name: Option<String>,
	default_ctor: bool,
}

fn parse_options(input: &DeriveInput) -> syn::Result<Options> {
	let mut options = Options::default();
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("activatable")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("name") {
				let value: syn::LitStr = meta.value()?.parse()?;
				options.name = Some(value.value());
				Ok(())
			} else if meta.path.is_ident("default") {
				options.default_ctor = true;
				Ok(())
			} else {
				Err(meta.error("unknown activatable attribute"))
			}
		})?;
	}
	Ok(options)
}

/// Integer type from `#[repr(..)]`, `isize` when absent.
fn enum_repr(input: &DeriveInput) -> syn::Result<Ident> {
	let mut repr = None;
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
		attr.parse_nested_meta(|meta| {
			if let Some(ident) = meta.path.get_ident()
				&& INTEGER_REPRS.contains(&ident.to_string().as_str())
			{
				repr = Some(ident.clone());
			}
			if meta.input.peek(syn::token::Paren) {
				let content;
				syn::parenthesized!(content in meta.input);
				content.parse::<TokenStream2>()?;
			}
			Ok(())
		})?;
	}
	Ok(repr.unwrap_or_else(|| Ident::new("isize", proc_macro2::Span::call_site())))
}

pub fn derive_activatable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	match expand(&input) {
		Ok(tokens) => tokens.into(),
		Err(e) => e.to_compile_error().into(),
	}
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(&input.generics, "Activatable cannot be derived for generic types"));
	}
	let options = parse_options(input)?;
	let ident = &input.ident;
	let name = options.name.clone().unwrap_or_else(|| ident.to_string());

	let (kind, extra) = match &input.data {
		Data::Enum(data) => {
			if options.default_ctor {
				return Err(syn::Error::new_spanned(ident, "#[activatable(default)] applies to structs only"));
			}
			enum_kind(input, data)?
		}
		Data::Struct(_) => (quote!(::activator::TypeKind::Struct), default_ctor(ident, options.default_ctor)),
		Data::Union(_) => return Err(syn::Error::new_spanned(ident, "Activatable cannot be derived for unions")),
	};

	Ok(quote! {
		const _: () = {
			#extra

			#[allow(non_upper_case_globals)]
			static __ACTIVATOR_TYPE: ::activator::registry::TypeStatic = ::activator::registry::TypeStatic {
				key: ::activator::TypeKey::of::<#ident>,
				name: #name,
				kind: #kind,
				crate_name: ::core::env!("CARGO_PKG_NAME"),
			};

			::activator::inventory::submit! { ::activator::registry::TypeReg(&__ACTIVATOR_TYPE) }
		};
	})
}

fn enum_kind(input: &DeriveInput, data: &DataEnum) -> syn::Result<(TokenStream2, TokenStream2)> {
	let ident = &input.ident;
	if let Some(variant) = data.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
		return Err(syn::Error::new_spanned(variant, "Activatable enums must be fieldless"));
	}
	let repr = enum_repr(input)?;
	let checks = data.variants.iter().map(|v| {
		let variant = &v.ident;
		quote! {
			if literal == ::std::string::ToString::to_string(&(#ident::#variant as #repr)) {
				return ::core::option::Option::Some(::activator::Instance::new(#ident::#variant));
			}
		}
	});
	let parse = quote! {
		fn __activator_parse(literal: &str) -> ::core::option::Option<::activator::Instance> {
			#(#checks)*
			::core::option::Option::None
		}
	};
	let kind = quote! {
		::activator::TypeKind::Enum(::activator::EnumInfo {
			underlying: ::activator::TypeKey::of::<#repr>,
			parse: __activator_parse,
		})
	};
	Ok((kind, parse))
}

fn default_ctor(ident: &Ident, enabled: bool) -> TokenStream2 {
	if !enabled {
		return TokenStream2::new();
	}
	quote! {
		fn __activator_default(
			_: &mut ::activator::ArgList,
		) -> ::core::result::Result<::activator::Instance, ::activator::InvokeError> {
			::core::result::Result::Ok(::activator::Instance::new(<#ident as ::core::default::Default>::default()))
		}

		#[allow(non_upper_case_globals)]
		static __ACTIVATOR_DEFAULT_CTOR: ::activator::registry::ConstructorStatic = ::activator::registry::ConstructorStatic {
			owner: ::activator::TypeKey::of::<#ident>,
			name: "default",
			public: true,
			params: &[],
			invoke: __activator_default,
			crate_name: ::core::env!("CARGO_PKG_NAME"),
		};

		::activator::inventory::submit! { ::activator::registry::ConstructorReg(&__ACTIVATOR_DEFAULT_CTOR) }
	}
}
