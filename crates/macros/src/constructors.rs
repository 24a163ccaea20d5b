//! `#[constructors]` attribute implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{FnArg, GenericArgument, ImplItem, ImplItemFn, ItemImpl, Pat, PathArguments, ReturnType, Type, Visibility, parse_macro_input};

pub fn constructors(attr: TokenStream, item: TokenStream) -> TokenStream {
	if !attr.is_empty() {
		return syn::Error::new(proc_macro2::Span::call_site(), "#[constructors] takes no arguments")
			.to_compile_error()
			.into();
	}

	let mut item = parse_macro_input!(item as ItemImpl);

	if let Some((_, path, _)) = &item.trait_ {
		return syn::Error::new_spanned(path, "#[constructors] applies to inherent impl blocks only")
			.to_compile_error()
			.into();
	}
	if !item.generics.params.is_empty() {
		return syn::Error::new_spanned(&item.generics, "#[constructors] cannot register generic impl blocks")
			.to_compile_error()
			.into();
	}

	let self_ty = (*item.self_ty).clone();
	let mut registrations = Vec::new();

	for impl_item in &mut item.items {
		let ImplItem::Fn(func) = impl_item else {
			continue;
		};
		match take_skip_attr(func) {
			Ok(true) => continue,
			Ok(false) => {}
			Err(e) => return e.to_compile_error().into(),
		}
		let Some(returns) = constructor_return(func, &self_ty) else {
			continue;
		};
		match registration(func, &self_ty, returns, registrations.len()) {
			Ok(tokens) => registrations.push(tokens),
			Err(e) => return e.to_compile_error().into(),
		}
	}

	quote! {
		#item

		const _: () = {
			#(#registrations)*
		};
	}
	.into()
}

#[derive(Clone, Copy)]
enum Returns {
	Value,
	Fallible,
}

enum Shape {
	Value,
	Nullable,
	Dynamic,
	Pointer,
}

struct Param {
	name: String,
	ty: Type,
	shape: Shape,
}

/// Strips `#[activator(skip)]`, reporting whether it was present.
fn take_skip_attr(func: &mut ImplItemFn) -> syn::Result<bool> {
	let mut skip = false;
	let mut error = None;
	func.attrs.retain(|attr| {
		if !attr.path().is_ident("activator") {
			return true;
		}
		if let Err(e) = attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				skip = true;
				Ok(())
			} else {
				Err(meta.error("unknown activator attribute"))
			}
		}) {
			error = Some(e);
		}
		false
	});
	match error {
		Some(e) => Err(e),
		None => Ok(skip),
	}
}

/// Classifies the function as a constructor of `self_ty`, if it is one.
fn constructor_return(func: &ImplItemFn, self_ty: &Type) -> Option<Returns> {
	let sig = &func.sig;
	if sig.receiver().is_some() || sig.asyncness.is_some() || sig.unsafety.is_some() || !sig.generics.params.is_empty() {
		return None;
	}
	let ReturnType::Type(_, ty) = &sig.output else {
		return None;
	};
	if is_self(ty, self_ty) {
		return Some(Returns::Value);
	}
	let Type::Path(path) = &**ty else {
		return None;
	};
	let last = path.path.segments.last()?;
	if last.ident != "Result" {
		return None;
	}
	let PathArguments::AngleBracketed(args) = &last.arguments else {
		return None;
	};
	match args.args.first() {
		Some(GenericArgument::Type(ok)) if is_self(ok, self_ty) => Some(Returns::Fallible),
		_ => None,
	}
}

fn is_self(ty: &Type, self_ty: &Type) -> bool {
	if let Type::Path(path) = ty
		&& path.qself.is_none()
		&& path.path.is_ident("Self")
	{
		return true;
	}
	quote!(#ty).to_string() == quote!(#self_ty).to_string()
}

fn classify(ty: &Type) -> (Shape, Type) {
	match ty {
		Type::Ptr(_) => (Shape::Pointer, ty.clone()),
		Type::Path(path) if path.qself.is_none() => {
			let Some(last) = path.path.segments.last() else {
				return (Shape::Value, ty.clone());
			};
			if last.ident == "Arg" && last.arguments.is_empty() {
				return (Shape::Dynamic, ty.clone());
			}
			if last.ident == "Option"
				&& let PathArguments::AngleBracketed(args) = &last.arguments
				&& args.args.len() == 1
				&& let Some(GenericArgument::Type(inner)) = args.args.first()
			{
				return (Shape::Nullable, inner.clone());
			}
			(Shape::Value, ty.clone())
		}
		_ => (Shape::Value, ty.clone()),
	}
}

/// Rewrites `Self` to the implementing type so parameter types can be named
/// outside the impl block.
struct ReplaceSelf<'a>(&'a Type);

impl VisitMut for ReplaceSelf<'_> {
	fn visit_type_mut(&mut self, ty: &mut Type) {
		if let Type::Path(path) = ty
			&& path.qself.is_none()
			&& path.path.is_ident("Self")
		{
			*ty = self.0.clone();
			return;
		}
		visit_mut::visit_type_mut(self, ty);
	}
}

fn params(func: &ImplItemFn, self_ty: &Type) -> syn::Result<Vec<Param>> {
	func.sig
		.inputs
		.iter()
		.map(|input| {
			let FnArg::Typed(pat_ty) = input else {
				return Err(syn::Error::new_spanned(input, "constructors take no receiver"));
			};
			let mut declared = (*pat_ty.ty).clone();
			ReplaceSelf(self_ty).visit_type_mut(&mut declared);
			let (shape, ty) = classify(&declared);
			let name = match &*pat_ty.pat {
				Pat::Ident(ident) => ident.ident.to_string(),
				_ => String::from("_"),
			};
			Ok(Param { name, ty, shape })
		})
		.collect()
}

fn registration(func: &ImplItemFn, self_ty: &Type, returns: Returns, ordinal: usize) -> syn::Result<TokenStream2> {
	let params = params(func, self_ty)?;
	let fn_name = &func.sig.ident;
	let fn_name_str = fn_name.to_string();
	let public = matches!(func.vis, Visibility::Public(_));
	let invoke_ident = format_ident!("__activator_invoke_{}", ordinal);
	let static_ident = format_ident!("__ACTIVATOR_CTOR_{}", ordinal);

	let param_statics = params.iter().map(|p| {
		let name = &p.name;
		let ty = &p.ty;
		let shape = match p.shape {
			Shape::Value => quote!(Value),
			Shape::Nullable => quote!(Nullable),
			Shape::Dynamic => quote!(Dynamic),
			Shape::Pointer => quote!(Pointer),
		};
		quote! {
			::activator::registry::ParamStatic {
				name: #name,
				ty: ::activator::TypeKey::of::<#ty>,
				shape: ::activator::ParamShape::#shape,
			}
		}
	});

	let unsupported = params.iter().any(|p| matches!(p.shape, Shape::Pointer));
	let invoke = if unsupported {
		quote!(::activator::registry::unsupported_invoker)
	} else {
		let bindings = params.iter().enumerate().map(|(index, p)| {
			let binding = format_ident!("__arg{}", index);
			let ty = &p.ty;
			match p.shape {
				Shape::Nullable => quote!(let #binding = args.take_opt::<#ty>(#index)?;),
				Shape::Dynamic => quote!(let #binding = args.take_arg(#index)?;),
				_ => quote!(let #binding = args.take::<#ty>(#index)?;),
			}
		});
		let call_args = (0..params.len()).map(|index| format_ident!("__arg{}", index));
		let construct = match returns {
			Returns::Value => quote!(<#self_ty>::#fn_name(#(#call_args),*)),
			Returns::Fallible => {
				quote!(<#self_ty>::#fn_name(#(#call_args),*).map_err(::activator::InvokeError::failed)?)
			}
		};
		quote! {{
			#[allow(unused_variables)]
			fn #invoke_ident(
				args: &mut ::activator::ArgList,
			) -> ::core::result::Result<::activator::Instance, ::activator::InvokeError> {
				#(#bindings)*
				::core::result::Result::Ok(::activator::Instance::new(#construct))
			}
			#invoke_ident
		}}
	};

	Ok(quote! {
		#[allow(non_upper_case_globals)]
		static #static_ident: ::activator::registry::ConstructorStatic = ::activator::registry::ConstructorStatic {
			owner: ::activator::TypeKey::of::<#self_ty>,
			name: #fn_name_str,
			public: #public,
			params: &[#(#param_statics),*],
			invoke: #invoke,
			crate_name: ::core::env!("CARGO_PKG_NAME"),
		};

		::activator::inventory::submit! { ::activator::registry::ConstructorReg(&#static_ident) }
	})
}
