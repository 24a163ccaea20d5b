use crate::config::ActivatorOptions;
use crate::ctor::descriptor::{ConstructorDescriptor, Invoker};
use crate::defaults::DefaultValueTable;
use crate::error::ActivationError;
use crate::key::TypeKey;
use crate::registry::{TypeKind, TypeRegistry};
use crate::value::{Arg, ArgList, Instance};

/// All activatable overloads of one type, ascending by arity.
pub struct ConstructorSet {
	ty: TypeKey,
	descriptors: Vec<ConstructorDescriptor>,
	default: Option<Invoker>,
}

impl ConstructorSet {
	/// Enumerates, compiles and ranks the constructors of `ty`.
	pub fn build(ty: TypeKey, registry: &TypeRegistry, defaults: &DefaultValueTable, options: &ActivatorOptions) -> Self {
		let declared = registry.constructors(ty);
		let mut descriptors: Vec<ConstructorDescriptor> = declared
			.iter()
			.filter(|info| info.public || options.include_non_public)
			.filter_map(ConstructorDescriptor::compile)
			.collect();
		let discarded = declared.len() - descriptors.len();

		if options.default_value_fallback
			&& let Some(entry) = defaults.lookup(ty).copied()
		{
			descriptors.push(ConstructorDescriptor::synthetic(ty, "default", move || entry.produce()));
		}

		if options.enum_fallback
			&& let TypeKind::Enum(info) = registry.kind(ty)
			&& let Some(literal) = defaults.lookup(info.underlying()).and_then(|entry| entry.literal())
		{
			let parse = info.parse;
			descriptors.push(ConstructorDescriptor::synthetic(ty, "zero", move || parse(literal)));
		}

		descriptors.sort_by_key(ConstructorDescriptor::arity);

		let default = descriptors
			.first()
			.filter(|d| d.arity() == 0)
			.map(|d| d.invoker().clone());

		tracing::debug!(
			ty = ty.name(),
			descriptors = descriptors.len(),
			discarded,
			has_default = default.is_some(),
			"built constructor set"
		);

		Self { ty, descriptors, default }
	}

	pub fn type_key(&self) -> TypeKey {
		self.ty
	}

	pub fn descriptors(&self) -> &[ConstructorDescriptor] {
		&self.descriptors
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Whether a parameterless activation can succeed without scanning.
	pub fn has_default(&self) -> bool {
		self.default.is_some()
	}

	/// Activates the first overload accepting `args`.
	///
	/// A missing argument array is a contract violation; no matching overload is
	/// `Ok(None)`.
	pub fn create_instance(&self, args: Option<Vec<Arg>>) -> Result<Option<Instance>, ActivationError> {
		let args = args.ok_or(ActivationError::MissingArguments { ty: self.ty })?;
		match self.descriptors.iter().find(|d| d.is_match(&args)) {
			Some(descriptor) => descriptor.create_instance(args),
			None => Ok(None),
		}
	}

	/// Activates through the cached parameterless invoker.
	pub fn create_default(&self) -> Result<Option<Instance>, ActivationError> {
		// The default invoker always belongs to the first descriptor.
		let (Some(invoker), Some(first)) = (&self.default, self.descriptors.first()) else {
			return Ok(None);
		};
		first.finish(invoker(&mut ArgList::default()))
	}
}

impl std::fmt::Debug for ConstructorSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConstructorSet")
			.field("ty", &self.ty)
			.field("descriptors", &self.descriptors)
			.field("has_default", &self.default.is_some())
			.finish()
	}
}
