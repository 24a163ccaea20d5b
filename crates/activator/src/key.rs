//! Type identity used as the activation cache key.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque identity of a Rust type within the running process.
///
/// Equality and hashing go through [`TypeId`] only; the type name is carried for
/// diagnostics and never participates in comparisons. There is deliberately no
/// `Ord` impl.
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Returns the identity of `T`.
	pub fn of<T: ?Sized + Any>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Fully qualified type name as reported by [`std::any::type_name`].
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Last path segment of the type name, generic arguments stripped.
	///
	/// `alloc::string::String` becomes `String`, `core::option::Option<i32>`
	/// becomes `Option`.
	pub fn short_name(&self) -> &'static str {
		let base = self.name.split('<').next().unwrap_or(self.name);
		base.rsplit("::").next().unwrap_or(base)
	}

	pub fn is<T: ?Sized + Any>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeKey({})", self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}
