//! Hand-registered fixture types shared by the unit tests.

use std::fmt;

use crate::error::InvokeError;
use crate::registry::{Signature, TypeRegistry};
use crate::value::{Arg, Instance};

/// Overloads `()`, `(i32)`, `(String, i32)`.
#[derive(Debug, PartialEq)]
pub struct Widget {
	pub label: Option<String>,
	pub size: i32,
	pub via: &'static str,
}

/// Only a non-public `(bool)` constructor.
#[derive(Debug, PartialEq)]
pub struct Toggle(pub bool);

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(u8)]
pub enum Level {
	Off = 0,
	On = 1,
}

/// Enum without a zero-valued member.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(i32)]
pub enum Ordinal {
	First = 1,
	Second = 2,
}

/// `(*const u8)` and `(usize)` overloads.
#[derive(Debug, PartialEq)]
pub struct Buffer(pub usize);

/// `(Option<String>)` and `(Arg, i32)` overloads.
#[derive(Debug, PartialEq)]
pub struct Tagged {
	pub tag: Option<String>,
	pub raw: bool,
}

/// `(i32)` overload that rejects negatives.
#[derive(Debug, PartialEq)]
pub struct Positive(pub i32);

#[derive(Debug)]
pub struct NegativeError(pub i32);

impl fmt::Display for NegativeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} is negative", self.0)
	}
}

impl std::error::Error for NegativeError {}

/// Parameterless constructor that panics.
#[derive(Debug)]
pub struct Exploding;

/// Panics from `Default`.
#[derive(Debug)]
pub struct Brittle;

impl Default for Brittle {
	fn default() -> Self {
		panic!("brittle default");
	}
}

pub trait Shape {}

fn parse_level(literal: &str) -> Option<Instance> {
	[Level::Off, Level::On]
		.into_iter()
		.find(|level| (*level as u8).to_string() == literal)
		.map(Instance::new)
}

fn parse_ordinal(literal: &str) -> Option<Instance> {
	[Ordinal::First, Ordinal::Second]
		.into_iter()
		.find(|ordinal| (*ordinal as i32).to_string() == literal)
		.map(Instance::new)
}

pub fn registry() -> TypeRegistry {
	let mut builder = TypeRegistry::builder();
	builder
		.constructor(Signature::new("with_label").param::<String>("label").param::<i32>("size"), |args| {
			Ok(Widget {
				label: Some(args.take(0)?),
				size: args.take(1)?,
				via: "with_label",
			})
		})
		.constructor(Signature::new("new"), |_| {
			Ok(Widget {
				label: None,
				size: 0,
				via: "new",
			})
		})
		.constructor(Signature::new("sized").param::<i32>("size"), |args| {
			Ok(Widget {
				label: None,
				size: args.take(0)?,
				via: "sized",
			})
		})
		.constructor(Signature::new("new").param::<bool>("on").non_public(), |args| Ok(Toggle(args.take(0)?)))
		.enumeration::<Level, u8>(parse_level)
		.enumeration::<Ordinal, i32>(parse_ordinal)
		.constructor(Signature::new("from_raw").pointer::<u8>("ptr"), |_| Ok(Buffer(0)))
		.constructor(Signature::new("with_capacity").param::<usize>("capacity"), |args| Ok(Buffer(args.take(0)?)))
		.constructor(Signature::new("new").nullable::<String>("tag"), |args| {
			Ok(Tagged {
				tag: args.take_opt(0)?,
				raw: false,
			})
		})
		.constructor(Signature::new("raw").dynamic("value").param::<i32>("n"), |args| {
			let value: Arg = args.take_arg(0)?;
			Ok(Tagged {
				tag: value.downcast_ref::<String>().cloned(),
				raw: true,
			})
		})
		.constructor(Signature::new("new").param::<i32>("value"), |args| {
			let value: i32 = args.take(0)?;
			if value < 0 {
				return Err(InvokeError::failed(NegativeError(value)));
			}
			Ok(Positive(value))
		})
		.constructor(Signature::new("new"), |_| -> Result<Exploding, InvokeError> { panic!("exploding constructor") });
	builder.build()
}
