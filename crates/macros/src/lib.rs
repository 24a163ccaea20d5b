//! Procedural macros for the activator registry.
//!
//! Provides:
//! * `#[constructors]` - registers the constructor functions of an inherent `impl`
//! * `#[derive(Activatable)]` - registers enum / struct type metadata
//!
//! Generated code refers to the runtime crate as `::activator` and submits its
//! registrations through the `inventory` re-export.

use proc_macro::TokenStream;

/// Derive macro implementation.
mod activatable;
/// `#[constructors]` implementation.
mod constructors;

/// Registers every constructor function of an inherent `impl` block.
///
/// A constructor is an associated function without receiver returning `Self`
/// (or the implementing type), or `Result<Self, E>` with `E: Into<BoxError>`.
/// Visibility is recorded: only `pub` functions are activatable by default.
///
/// Parameter shapes:
/// * `Option<T>` - nullable `T`
/// * `Arg` - any argument, null included
/// * `*const T` / `*mut T` - unsupported; the overload is registered but never
///   selected
/// * anything else - non-null value of exactly that type
///
/// `#[activator(skip)]` on a function leaves it unregistered.
///
/// ```ignore
/// #[constructors]
/// impl Point {
///     pub fn origin() -> Self { .. }
///     pub fn new(x: i32, y: i32) -> Self { .. }
///     pub fn parse(text: String) -> Result<Self, ParseError> { .. }
/// }
/// ```
#[proc_macro_attribute]
pub fn constructors(attr: TokenStream, item: TokenStream) -> TokenStream {
	constructors::constructors(attr, item)
}

/// Registers type metadata for activation.
///
/// * Fieldless enums register their underlying primitive (`#[repr(..)]`,
///   `isize` otherwise) so parameterless activation yields the zero member.
/// * Structs register as value types; `#[activatable(default)]` also registers
///   `Default::default` as a parameterless constructor.
///
/// `#[activatable(name = "...")]` adds a lookup name.
#[proc_macro_derive(Activatable, attributes(activatable))]
pub fn derive_activatable(input: TokenStream) -> TokenStream {
	activatable::derive_activatable(input)
}
