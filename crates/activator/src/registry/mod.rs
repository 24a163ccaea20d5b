//! Type introspection: which constructors a type declares and what kind of
//! type it is.
//!
//! Rust has no runtime reflection, so constructors are registered up front,
//! either by the `#[constructors]` / `#[derive(Activatable)]` macros (collected
//! through `inventory`) or by hand through [`TypeRegistryBuilder`]. A built
//! [`TypeRegistry`] is immutable.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;

use crate::error::InvokeError;
use crate::key::TypeKey;
use crate::value::{Arg, ArgList, Instance};

mod statics;

pub use statics::{ConstructorReg, ConstructorStatic, InvokeFn, ParamStatic, TypeReg, TypeStatic, unsupported_invoker};

#[cfg(test)]
mod tests;

/// Invoker over positional arguments, as stored in the registry.
pub type RawInvoker = Arc<dyn Fn(&mut ArgList) -> Result<Instance, InvokeError> + Send + Sync>;

/// Where a registration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationSource {
	/// Added by hand through [`TypeRegistryBuilder`].
	Builder,
	/// Submitted by the registration macros from the named crate.
	Crate(&'static str),
}

impl fmt::Display for RegistrationSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builder => f.write_str("builder"),
			Self::Crate(name) => write!(f, "crate:{name}"),
		}
	}
}

/// How a declared parameter accepts arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
	/// Non-null argument of exactly the declared type.
	Value,
	/// `Option<T>`: null or a `T`.
	Nullable,
	/// Declared as [`Arg`]: any argument, null included.
	Dynamic,
	/// Raw pointer. Constructors taking one cannot be activated.
	Pointer,
}

impl ParamShape {
	pub fn is_nullable(self) -> bool {
		matches!(self, Self::Nullable | Self::Dynamic)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
	pub name: Cow<'static, str>,
	/// Declared type; the inner `T` for nullable parameters.
	pub ty: TypeKey,
	pub shape: ParamShape,
}

/// Declared signature of a hand-registered constructor.
#[derive(Debug, Clone)]
pub struct Signature {
	name: Cow<'static, str>,
	public: bool,
	params: Vec<ParamInfo>,
}

impl Signature {
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			public: true,
			params: Vec::new(),
		}
	}

	fn push(mut self, name: impl Into<Cow<'static, str>>, ty: TypeKey, shape: ParamShape) -> Self {
		self.params.push(ParamInfo {
			name: name.into(),
			ty,
			shape,
		});
		self
	}

	pub fn param<T: Any>(self, name: impl Into<Cow<'static, str>>) -> Self {
		self.push(name, TypeKey::of::<T>(), ParamShape::Value)
	}

	pub fn nullable<T: Any>(self, name: impl Into<Cow<'static, str>>) -> Self {
		self.push(name, TypeKey::of::<T>(), ParamShape::Nullable)
	}

	pub fn dynamic(self, name: impl Into<Cow<'static, str>>) -> Self {
		self.push(name, TypeKey::of::<Arg>(), ParamShape::Dynamic)
	}

	pub fn pointer<T: ?Sized + Any>(self, name: impl Into<Cow<'static, str>>) -> Self {
		self.push(name, TypeKey::of::<*const T>(), ParamShape::Pointer)
	}

	/// Marks the constructor as not publicly visible.
	pub fn non_public(mut self) -> Self {
		self.public = false;
		self
	}
}

/// A declared constructor as seen by introspection.
#[derive(Clone)]
pub struct ConstructorInfo {
	pub owner: TypeKey,
	pub name: Cow<'static, str>,
	pub public: bool,
	pub params: Vec<ParamInfo>,
	pub invoke: RawInvoker,
	pub source: RegistrationSource,
}

impl ConstructorInfo {
	pub fn arity(&self) -> usize {
		self.params.len()
	}

	/// True if any parameter has a shape that cannot be activated.
	pub fn has_unsupported_params(&self) -> bool {
		self.params.iter().any(|p| p.shape == ParamShape::Pointer)
	}

	fn from_static(def: &'static ConstructorStatic) -> Self {
		Self {
			owner: (def.owner)(),
			name: Cow::Borrowed(def.name),
			public: def.public,
			params: def
				.params
				.iter()
				.map(|p| ParamInfo {
					name: Cow::Borrowed(p.name),
					ty: (p.ty)(),
					shape: p.shape,
				})
				.collect(),
			invoke: Arc::new(def.invoke),
			source: RegistrationSource::Crate(def.crate_name),
		}
	}
}

impl fmt::Debug for ConstructorInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConstructorInfo")
			.field("owner", &self.owner)
			.field("name", &self.name)
			.field("public", &self.public)
			.field("params", &self.params)
			.field("source", &self.source)
			.finish_non_exhaustive()
	}
}

/// Enum metadata needed to synthesize the zero member.
#[derive(Clone, Copy)]
pub struct EnumInfo {
	pub underlying: fn() -> TypeKey,
	/// Maps a stringified discriminant to the matching member.
	pub parse: fn(&str) -> Option<Instance>,
}

impl EnumInfo {
	pub fn underlying(&self) -> TypeKey {
		(self.underlying)()
	}
}

impl fmt::Debug for EnumInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EnumInfo").field("underlying", &self.underlying()).finish_non_exhaustive()
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub enum TypeKind {
	/// Anything without a more specific registration.
	#[default]
	Class,
	Struct,
	Enum(EnumInfo),
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
	pub key: TypeKey,
	pub name: Cow<'static, str>,
	pub kind: TypeKind,
	pub source: RegistrationSource,
}

/// Immutable index of registered types and their declared constructors.
#[derive(Default)]
pub struct TypeRegistry {
	types: FxHashMap<TypeKey, TypeInfo>,
	ctors: FxHashMap<TypeKey, Vec<ConstructorInfo>>,
	by_name: FxHashMap<Box<str>, (TypeKey, RegistrationSource)>,
}

impl TypeRegistry {
	pub fn builder() -> TypeRegistryBuilder {
		TypeRegistryBuilder::default()
	}

	/// Registry of everything submitted through the registration macros.
	pub fn from_inventory() -> Self {
		let mut builder = Self::builder();
		builder.extend_inventory();
		builder.build()
	}

	/// Process-wide registry over the inventory, built on first use.
	pub fn global() -> Arc<TypeRegistry> {
		static GLOBAL: LazyLock<Arc<TypeRegistry>> = LazyLock::new(|| Arc::new(TypeRegistry::from_inventory()));
		Arc::clone(&GLOBAL)
	}

	pub fn type_info(&self, key: TypeKey) -> Option<&TypeInfo> {
		self.types.get(&key)
	}

	/// Kind of `key`; unregistered types are [`TypeKind::Class`].
	pub fn kind(&self, key: TypeKey) -> TypeKind {
		self.types.get(&key).map(|info| info.kind).unwrap_or_default()
	}

	/// Declared constructors of `key` in registration order.
	pub fn constructors(&self, key: TypeKey) -> &[ConstructorInfo] {
		self.ctors.get(&key).map(Vec::as_slice).unwrap_or_default()
	}

	/// Resolves a full (`type_name`) or short type name.
	pub fn resolve(&self, name: &str) -> Option<TypeKey> {
		self.by_name.get(name).map(|(key, _)| *key)
	}

	/// Number of distinct types known to the registry.
	pub fn len(&self) -> usize {
		let extra = self.ctors.keys().filter(|key| !self.types.contains_key(*key)).count();
		self.types.len() + extra
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty() && self.ctors.is_empty()
	}
}

/// Collects type and constructor registrations into a [`TypeRegistry`].
///
/// The first registration wins, both for a type's metadata and for each lookup
/// name. Later duplicates are logged and ignored.
#[derive(Default)]
pub struct TypeRegistryBuilder {
	registry: TypeRegistry,
}

impl TypeRegistryBuilder {
	/// Registers `T` with an explicit kind.
	pub fn register_type<T: Any>(&mut self, kind: TypeKind) -> &mut Self {
		let key = TypeKey::of::<T>();
		self.insert_type(TypeInfo {
			key,
			name: Cow::Borrowed(key.name()),
			kind,
			source: RegistrationSource::Builder,
		})
	}

	/// Registers `T` as a plain struct.
	pub fn structure<T: Any>(&mut self) -> &mut Self {
		self.register_type::<T>(TypeKind::Struct)
	}

	/// Registers enum `E` with underlying primitive `U`.
	pub fn enumeration<E: Any, U: Any>(&mut self, parse: fn(&str) -> Option<Instance>) -> &mut Self {
		self.register_type::<E>(TypeKind::Enum(EnumInfo {
			underlying: TypeKey::of::<U>,
			parse,
		}))
	}

	/// Registers a constructor of `T` backed by a closure.
	pub fn constructor<T, F>(&mut self, signature: Signature, invoke: F) -> &mut Self
	where
		T: Any + Send,
		F: Fn(&mut ArgList) -> Result<T, InvokeError> + Send + Sync + 'static,
	{
		self.insert_ctor(ConstructorInfo {
			owner: TypeKey::of::<T>(),
			name: signature.name,
			public: signature.public,
			params: signature.params,
			invoke: Arc::new(move |args: &mut ArgList| invoke(args).map(Instance::new)),
			source: RegistrationSource::Builder,
		})
	}

	pub fn register_static(&mut self, def: &'static ConstructorStatic) -> &mut Self {
		self.insert_ctor(ConstructorInfo::from_static(def))
	}

	pub fn register_static_type(&mut self, def: &'static TypeStatic) -> &mut Self {
		let key = (def.key)();
		self.insert_type(TypeInfo {
			key,
			name: Cow::Borrowed(def.name),
			kind: def.kind,
			source: RegistrationSource::Crate(def.crate_name),
		})
	}

	/// Links every registration submitted through `inventory`.
	pub fn extend_inventory(&mut self) -> &mut Self {
		let mut types = 0usize;
		for reg in inventory::iter::<TypeReg> {
			self.register_static_type(reg.0);
			types += 1;
		}
		let mut ctors = 0usize;
		for reg in inventory::iter::<ConstructorReg> {
			self.register_static(reg.0);
			ctors += 1;
		}
		tracing::debug!(types, ctors, "linked static activation registrations");
		self
	}

	pub fn build(self) -> TypeRegistry {
		self.registry
	}

	fn insert_type(&mut self, info: TypeInfo) -> &mut Self {
		let key = info.key;
		if let Some(existing) = self.registry.types.get(&key) {
			tracing::warn!(
				ty = key.name(),
				kept = %existing.source,
				ignored = %info.source,
				"type registered twice; keeping the first registration"
			);
			return self;
		}
		if !info.name.is_empty() && info.name != key.name() && info.name != key.short_name() {
			self.index_name(info.name.to_string().into_boxed_str(), key, info.source);
		}
		self.index_key_names(key, info.source);
		self.registry.types.insert(key, info);
		self
	}

	fn insert_ctor(&mut self, info: ConstructorInfo) -> &mut Self {
		self.index_key_names(info.owner, info.source);
		self.registry.ctors.entry(info.owner).or_default().push(info);
		self
	}

	fn index_key_names(&mut self, key: TypeKey, source: RegistrationSource) {
		self.index_name(key.name().into(), key, source);
		self.index_name(key.short_name().into(), key, source);
	}

	fn index_name(&mut self, name: Box<str>, key: TypeKey, source: RegistrationSource) {
		let (existing, existing_source) = *self.registry.by_name.entry(name.clone()).or_insert((key, source));
		if existing != key {
			tracing::warn!(
				%name,
				kept = existing.name(),
				kept_source = %existing_source,
				ignored = key.name(),
				ignored_source = %source,
				"type name collision; keeping the first registration"
			);
		}
	}
}
