//! Runtime-typed values crossing the activation boundary.
//!
//! Callers hand constructor arguments over as [`Arg`]s (a boxed value or null)
//! and receive constructed objects back as type-erased [`Instance`]s.

use std::any::Any;
use std::fmt;

use crate::error::InvokeError;
use crate::key::TypeKey;

/// A single constructor argument: a boxed value of some runtime type, or null.
#[derive(Default)]
pub struct Arg {
	slot: Option<(TypeKey, Box<dyn Any + Send>)>,
}

impl Arg {
	pub fn new<T: Any + Send>(value: T) -> Self {
		Self {
			slot: Some((TypeKey::of::<T>(), Box::new(value))),
		}
	}

	/// The absent value. Only nullable parameters accept it.
	pub fn null() -> Self {
		Self { slot: None }
	}

	pub fn is_null(&self) -> bool {
		self.slot.is_none()
	}

	/// Runtime type of the carried value, `None` for null.
	pub fn type_key(&self) -> Option<TypeKey> {
		self.slot.as_ref().map(|(key, _)| *key)
	}

	pub fn is<T: Any>(&self) -> bool {
		self.type_key().is_some_and(|key| key.is::<T>())
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.slot.as_ref().and_then(|(_, value)| value.downcast_ref())
	}

	/// Moves the value out as `T`.
	///
	/// Null stays `Ok(None)`; a value of another type is handed back unchanged.
	pub fn take<T: Any>(self) -> Result<Option<T>, Self> {
		match self.slot {
			None => Ok(None),
			Some((key, value)) => match value.downcast::<T>() {
				Ok(value) => Ok(Some(*value)),
				Err(value) => Err(Self { slot: Some((key, value)) }),
			},
		}
	}
}

impl fmt::Debug for Arg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.type_key() {
			Some(key) => write!(f, "Arg({})", key.name()),
			None => f.write_str("Arg(null)"),
		}
	}
}

/// Builds a `Vec<Arg>` from values; the bare `null` token yields [`Arg::null`].
///
/// ```ignore
/// let args = args![42_i32, String::from("x"), null];
/// ```
#[macro_export]
macro_rules! args {
	(@acc [$($out:expr,)*]) => {
		::std::vec::Vec::<$crate::Arg>::from([$($out),*])
	};
	(@acc [$($out:expr,)*] null $(, $($rest:tt)*)?) => {
		$crate::args!(@acc [$($out,)* $crate::Arg::null(),] $($($rest)*)?)
	};
	(@acc [$($out:expr,)*] $value:expr $(, $($rest:tt)*)?) => {
		$crate::args!(@acc [$($out,)* $crate::Arg::new($value),] $($($rest)*)?)
	};
	($($input:tt)*) => {
		$crate::args!(@acc [] $($input)*)
	};
}

/// Positional arguments handed to a compiled invoker.
///
/// Invokers move each argument out exactly once; a slot that has already been
/// taken reads as null.
#[derive(Debug, Default)]
pub struct ArgList {
	args: Vec<Arg>,
}

impl ArgList {
	pub fn new(args: Vec<Arg>) -> Self {
		Self { args }
	}

	pub fn len(&self) -> usize {
		self.args.len()
	}

	pub fn is_empty(&self) -> bool {
		self.args.is_empty()
	}

	/// Takes a required (non-null) argument of type `T`.
	pub fn take<T: Any>(&mut self, index: usize) -> Result<T, InvokeError> {
		self.take_opt(index)?.ok_or(InvokeError::Argument {
			index,
			expected: std::any::type_name::<T>(),
		})
	}

	/// Takes a nullable argument of type `T`.
	pub fn take_opt<T: Any>(&mut self, index: usize) -> Result<Option<T>, InvokeError> {
		self.take_arg(index)?.take::<T>().map_err(|_| InvokeError::Argument {
			index,
			expected: std::any::type_name::<T>(),
		})
	}

	/// Takes the raw argument, whatever its type.
	pub fn take_arg(&mut self, index: usize) -> Result<Arg, InvokeError> {
		self.args.get_mut(index).map(std::mem::take).ok_or(InvokeError::Argument {
			index,
			expected: "argument",
		})
	}
}

/// A constructed object of some registered type.
pub struct Instance {
	ty: TypeKey,
	value: Box<dyn Any + Send>,
}

impl Instance {
	pub fn new<T: Any + Send>(value: T) -> Self {
		Self {
			ty: TypeKey::of::<T>(),
			value: Box::new(value),
		}
	}

	pub fn type_key(&self) -> TypeKey {
		self.ty
	}

	pub fn is<T: Any>(&self) -> bool {
		self.ty.is::<T>()
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.value.downcast_ref()
	}

	pub fn downcast<T: Any>(self) -> Result<T, Self> {
		let ty = self.ty;
		self.value
			.downcast::<T>()
			.map(|value| *value)
			.map_err(|value| Self { ty, value })
	}

	pub fn into_any(self) -> Box<dyn Any + Send> {
		self.value
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Instance({})", self.ty.name())
	}
}
