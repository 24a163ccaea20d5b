use std::error::Error as StdError;

use crate::key::TypeKey;

/// Boxed error raised from inside a fallible constructor body.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors surfaced by the activation entry points.
///
/// A constructor that simply does not match is not an error; it yields `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
	/// The caller did not name a type.
	#[error("type identity missing")]
	MissingType,

	/// The caller passed no argument array.
	#[error("argument array missing for {ty}")]
	MissingArguments { ty: TypeKey },

	/// The selected constructor ran and reported failure.
	#[error("constructor {ty}::{ctor} failed: {source}")]
	Constructor {
		ty: TypeKey,
		ctor: String,
		#[source]
		source: BoxError,
	},
}

impl ActivationError {
	/// True for the caller-side precondition failures.
	pub fn is_contract_violation(&self) -> bool {
		matches!(self, Self::MissingType | Self::MissingArguments { .. })
	}
}

/// Failure reported by a compiled invoker.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
	/// Argument at `index` could not be read as the declared parameter type.
	#[error("argument {index} is not a {expected}")]
	Argument { index: usize, expected: &'static str },

	/// The constructor body returned an error.
	#[error(transparent)]
	Failed(BoxError),
}

impl InvokeError {
	pub fn failed(err: impl Into<BoxError>) -> Self {
		Self::Failed(err.into())
	}
}

/// Option loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid activator options: {0}")]
	Parse(#[from] toml::de::Error),
}
