//! Constructor-overload activation engine.
//!
//! Given a type identity and runtime-typed arguments, [`Activator`] picks the
//! first registered constructor overload whose arity and parameter types accept
//! the arguments and invokes it. Overload metadata for a type is compiled once
//! into a [`ConstructorSet`] and kept in an [`ActivationCache`] for the life of
//! the cache.
//!
//! # Registering constructors
//!
//! ```ignore
//! use activator::{Activatable, Activator, args, constructors};
//!
//! pub struct Point { x: i32, y: i32 }
//!
//! #[constructors]
//! impl Point {
//!     pub fn origin() -> Self { Self { x: 0, y: 0 } }
//!     pub fn new(x: i32, y: i32) -> Self { Self { x, y } }
//! }
//!
//! #[derive(Activatable)]
//! #[repr(u8)]
//! pub enum Level { Off = 0, On = 1 }
//!
//! let p: Option<Point> = Activator::global().create_with(args![1_i32, 2_i32])?;
//! let l: Option<Level> = Activator::global().create()?;
//! ```
//!
//! Hand-maintained registries go through [`TypeRegistry::builder`].
//!
//! # Failure contract
//!
//! * `Ok(None)`: no instance produced (no overload matched). Expected, silent.
//! * `Err(MissingType | MissingArguments)`: caller contract violation.
//! * `Err(Constructor { .. })`: the selected constructor returned an error.
//! * Panics inside constructors propagate, except through
//!   [`Activator::allocate`].

extern crate self as activator;

pub mod cache;
pub mod config;
pub mod ctor;
pub mod defaults;
pub mod error;
pub mod facade;
pub mod key;
pub mod registry;
pub mod value;

#[cfg(test)]
mod test_fixtures;

pub use activator_macros::{Activatable, constructors};
pub use cache::ActivationCache;
pub use config::ActivatorOptions;
pub use ctor::{ConstructorDescriptor, ConstructorSet};
pub use defaults::{DefaultValue, DefaultValueTable};
pub use error::{ActivationError, BoxError, ConfigError, InvokeError};
pub use facade::Activator;
#[doc(hidden)]
pub use inventory;
pub use key::TypeKey;
pub use registry::{
	ConstructorInfo, EnumInfo, ParamInfo, ParamShape, RegistrationSource, Signature, TypeInfo, TypeKind, TypeRegistry,
	TypeRegistryBuilder,
};
pub use value::{Arg, ArgList, Instance};
