use std::borrow::Cow;
use std::fmt;

use crate::error::{ActivationError, InvokeError};
use crate::key::TypeKey;
use crate::registry::{ConstructorInfo, ParamShape, RawInvoker};
use crate::value::{Arg, ArgList, Instance};

/// Compiled invoker of one descriptor. `Ok(None)` is a deliberate "no value".
pub type Invoker = std::sync::Arc<dyn Fn(&mut ArgList) -> Result<Option<Instance>, InvokeError> + Send + Sync>;

/// One activatable constructor overload.
///
/// Holds the declared parameter types, a parallel list of nullability flags and
/// the compiled invoker; all three agree on arity. Immutable once built.
#[derive(Clone)]
pub struct ConstructorDescriptor {
	owner: TypeKey,
	name: Cow<'static, str>,
	param_types: Vec<TypeKey>,
	nullable: Vec<bool>,
	dynamic: Vec<bool>,
	invoker: Invoker,
}

impl ConstructorDescriptor {
	/// Compiles a declared constructor. `None` if any parameter is unsupported.
	pub fn compile(info: &ConstructorInfo) -> Option<Self> {
		if info.has_unsupported_params() {
			return None;
		}
		let raw: RawInvoker = info.invoke.clone();
		Some(Self {
			owner: info.owner,
			name: info.name.clone(),
			param_types: info.params.iter().map(|p| p.ty).collect(),
			nullable: info.params.iter().map(|p| p.shape.is_nullable()).collect(),
			dynamic: info.params.iter().map(|p| p.shape == ParamShape::Dynamic).collect(),
			invoker: std::sync::Arc::new(move |args: &mut ArgList| raw(args).map(Some)),
		})
	}

	/// Parameterless descriptor backed by `produce`, used for default-value fallbacks.
	pub fn synthetic(owner: TypeKey, name: &'static str, produce: impl Fn() -> Option<Instance> + Send + Sync + 'static) -> Self {
		Self {
			owner,
			name: Cow::Borrowed(name),
			param_types: Vec::new(),
			nullable: Vec::new(),
			dynamic: Vec::new(),
			invoker: std::sync::Arc::new(move |_: &mut ArgList| Ok(produce())),
		}
	}

	pub fn owner(&self) -> TypeKey {
		self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn arity(&self) -> usize {
		self.param_types.len()
	}

	pub fn param_types(&self) -> &[TypeKey] {
		&self.param_types
	}

	pub fn nullability(&self) -> &[bool] {
		&self.nullable
	}

	pub(crate) fn invoker(&self) -> &Invoker {
		&self.invoker
	}

	/// Whether `args` can be passed to this overload.
	pub fn is_match(&self, args: &[Arg]) -> bool {
		if args.len() != self.arity() {
			return false;
		}
		args.iter().enumerate().all(|(i, arg)| match arg.type_key() {
			None => self.nullable[i],
			Some(actual) => self.dynamic[i] || actual == self.param_types[i],
		})
	}

	/// Invokes the overload.
	///
	/// Arguments that fail [`Self::is_match`] yield `Ok(None)`. Panics raised by the
	/// constructor propagate; errors it returns become
	/// [`ActivationError::Constructor`].
	pub fn create_instance(&self, args: Vec<Arg>) -> Result<Option<Instance>, ActivationError> {
		if !self.is_match(&args) {
			return Ok(None);
		}
		self.invoke(ArgList::new(args))
	}

	pub(crate) fn invoke(&self, mut args: ArgList) -> Result<Option<Instance>, ActivationError> {
		self.finish((self.invoker)(&mut args))
	}

	/// Maps an invoker outcome onto the activation contract.
	pub(crate) fn finish(&self, outcome: Result<Option<Instance>, InvokeError>) -> Result<Option<Instance>, ActivationError> {
		match outcome {
			Ok(instance) => Ok(instance),
			Err(InvokeError::Argument { index, expected }) => {
				tracing::trace!(ty = self.owner.name(), ctor = %self.name, index, expected, "invoker rejected argument");
				Ok(None)
			}
			Err(InvokeError::Failed(source)) => Err(ActivationError::Constructor {
				ty: self.owner,
				ctor: self.name.to_string(),
				source,
			}),
		}
	}
}

impl fmt::Debug for ConstructorDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConstructorDescriptor")
			.field("owner", &self.owner)
			.field("name", &self.name)
			.field("param_types", &self.param_types)
			.field("nullable", &self.nullable)
			.finish_non_exhaustive()
	}
}
