//! Constructor descriptors and per-type constructor sets.
//!
//! # Mental model
//!
//! * A [`ConstructorDescriptor`] wraps one declared overload: parameter types,
//!   per-parameter nullability and a compiled invoker.
//! * A [`ConstructorSet`] owns every descriptor of one type, sorted by arity
//!   with ties in discovery order, plus synthetic parameterless descriptors
//!   derived from the default-value table.
//!
//! # Invariants
//!
//! * Descriptors with a raw-pointer parameter never enter a set.
//! * Descriptor arities are non-decreasing across a set.
//! * A set has a cached default invoker iff its first descriptor has arity 0.
//! * Overload selection is first-match: arity is an exact check, so ordering
//!   only decides between overloads of equal arity.

mod descriptor;
mod set;

pub use descriptor::{ConstructorDescriptor, Invoker};
pub use set::ConstructorSet;
