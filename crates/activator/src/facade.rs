//! Public activation entry points.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use crate::cache::ActivationCache;
use crate::config::ActivatorOptions;
use crate::error::ActivationError;
use crate::key::TypeKey;
use crate::registry::TypeRegistry;
use crate::value::{Arg, Instance};

/// Creates instances of registered types.
///
/// Every entry point returns `Ok(None)` when no instance could be produced: no
/// overload accepts the arguments, the type has no constructors, or it is a
/// trait object. `Err` is reserved for caller contract violations and for
/// errors returned by the selected constructor itself.
#[derive(Clone)]
pub struct Activator {
	cache: Arc<ActivationCache>,
}

impl Activator {
	pub fn new(cache: Arc<ActivationCache>) -> Self {
		Self { cache }
	}

	pub fn with_registry(registry: TypeRegistry, options: ActivatorOptions) -> Self {
		Self::new(Arc::new(ActivationCache::new(Arc::new(registry), options)))
	}

	/// Process-wide activator over the macro-registered types.
	pub fn global() -> &'static Activator {
		static GLOBAL: OnceLock<Activator> = OnceLock::new();
		GLOBAL.get_or_init(|| Self::new(Arc::new(ActivationCache::new(TypeRegistry::global(), ActivatorOptions::default()))))
	}

	pub fn cache(&self) -> &ActivationCache {
		&self.cache
	}

	/// Parameterless activation of `ty`.
	pub fn create_instance(&self, ty: Option<TypeKey>) -> Result<Option<Instance>, ActivationError> {
		let ty = ty.ok_or(ActivationError::MissingType)?;
		self.cache.get_or_build(ty).create_default()
	}

	/// Activation of `ty` with positional arguments.
	pub fn create_instance_with(&self, ty: Option<TypeKey>, args: Option<Vec<Arg>>) -> Result<Option<Instance>, ActivationError> {
		let ty = ty.ok_or(ActivationError::MissingType)?;
		self.cache.get_or_build(ty).create_instance(args)
	}

	/// Parameterless activation by registered type name, full or short.
	///
	/// A blank name is a missing type; an unknown one soft-fails.
	pub fn create_named(&self, name: &str) -> Result<Option<Instance>, ActivationError> {
		match self.resolve_name(name)? {
			Some(ty) => self.create_instance(Some(ty)),
			None => Ok(None),
		}
	}

	/// Activation by registered type name with positional arguments.
	///
	/// Name handling matches [`Self::create_named`]; a missing argument array is
	/// a contract violation, as for [`Self::create_instance_with`].
	pub fn create_named_with(&self, name: &str, args: Option<Vec<Arg>>) -> Result<Option<Instance>, ActivationError> {
		match self.resolve_name(name)? {
			Some(ty) => self.create_instance_with(Some(ty), args),
			None => Ok(None),
		}
	}

	fn resolve_name(&self, name: &str) -> Result<Option<TypeKey>, ActivationError> {
		let name = name.trim();
		if name.is_empty() {
			return Err(ActivationError::MissingType);
		}
		let ty = self.cache.registry().resolve(name);
		if ty.is_none() {
			tracing::trace!(name, "no registered type under name");
		}
		Ok(ty)
	}

	pub fn create<T: Any>(&self) -> Result<Option<T>, ActivationError> {
		self.create_instance(Some(TypeKey::of::<T>())).map(downcast_instance)
	}

	pub fn create_with<T: Any>(&self, args: Vec<Arg>) -> Result<Option<T>, ActivationError> {
		self.create_instance_with(Some(TypeKey::of::<T>()), Some(args)).map(downcast_instance)
	}

	/// Direct allocation through `Default`, bypassing overload search.
	///
	/// Best effort: a panic raised while constructing is caught and reported as
	/// `None`.
	pub fn allocate<T: Default>() -> Option<T> {
		match panic::catch_unwind(AssertUnwindSafe(T::default)) {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::debug!(ty = std::any::type_name::<T>(), "direct allocation panicked");
				None
			}
		}
	}
}

fn downcast_instance<T: Any>(instance: Option<Instance>) -> Option<T> {
	instance.and_then(|instance| instance.downcast::<T>().ok())
}
