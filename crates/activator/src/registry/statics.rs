//! Static constructor and type registration via `inventory`.
//!
//! `#[constructors]` and `#[derive(Activatable)]` expand to `ConstructorStatic` /
//! `TypeStatic` items and submit them with `inventory::submit!`. The linking step
//! in [`super::TypeRegistryBuilder::extend_inventory`] collects everything
//! submitted across the final binary.

use super::{ParamShape, TypeKind};
use crate::error::InvokeError;
use crate::key::TypeKey;
use crate::value::{ArgList, Instance};

/// Invoker signature emitted by the registration macros.
pub type InvokeFn = fn(&mut ArgList) -> Result<Instance, InvokeError>;

/// One declared parameter of a statically registered constructor.
pub struct ParamStatic {
	pub name: &'static str,
	pub ty: fn() -> TypeKey,
	pub shape: ParamShape,
}

/// Static constructor registration entry collected via `inventory`.
pub struct ConstructorStatic {
	/// Type the constructor produces.
	pub owner: fn() -> TypeKey,
	/// Associated function name.
	pub name: &'static str,
	/// Whether the function was declared `pub`.
	pub public: bool,
	pub params: &'static [ParamStatic],
	pub invoke: InvokeFn,
	/// Crate that defined this constructor.
	pub crate_name: &'static str,
}

/// Static type registration entry collected via `inventory`.
pub struct TypeStatic {
	pub key: fn() -> TypeKey,
	pub name: &'static str,
	pub kind: TypeKind,
	pub crate_name: &'static str,
}

/// Wrapper for `inventory::collect!`.
pub struct ConstructorReg(pub &'static ConstructorStatic);

inventory::collect!(ConstructorReg);

/// Wrapper for `inventory::collect!`.
pub struct TypeReg(pub &'static TypeStatic);

inventory::collect!(TypeReg);

/// Invoker installed for constructors whose parameters cannot cross the
/// activation boundary (raw pointers). Such constructors are discarded before
/// anything could call it.
pub fn unsupported_invoker(_: &mut ArgList) -> Result<Instance, InvokeError> {
	Err(InvokeError::Argument {
		index: 0,
		expected: "supported parameter type",
	})
}
