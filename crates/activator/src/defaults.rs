//! Canonical zero values for well-known types.
//!
//! The table backs the synthetic parameterless constructors that let callers
//! activate primitives, `Duration`, `Uuid` and enums without any registered
//! constructor. Nothing in here invokes a registered constructor.

use std::sync::LazyLock;
use std::time::Duration;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::key::TypeKey;
use crate::value::Instance;

/// Default of one well-known type.
#[derive(Clone, Copy)]
pub enum DefaultValue {
	/// The type's default is "no value" (reference-like types such as `String`).
	Null,
	/// A concrete zero value.
	Value {
		/// Canonical textual rendering, used to resolve enum zero members.
		literal: &'static str,
		make: fn() -> Instance,
	},
}

impl DefaultValue {
	/// Produces the default, `None` for [`DefaultValue::Null`].
	pub fn produce(&self) -> Option<Instance> {
		match self {
			Self::Null => None,
			Self::Value { make, .. } => Some(make()),
		}
	}

	pub fn literal(&self) -> Option<&'static str> {
		match self {
			Self::Null => None,
			Self::Value { literal, .. } => Some(literal),
		}
	}
}

/// Read-only map from type identity to its canonical default.
pub struct DefaultValueTable {
	entries: FxHashMap<TypeKey, DefaultValue>,
}

macro_rules! zero_entries {
	($map:ident; $($ty:ty => $literal:literal = $value:expr),* $(,)?) => {
		$(
			$map.insert(
				TypeKey::of::<$ty>(),
				DefaultValue::Value {
					literal: $literal,
					make: || Instance::new::<$ty>($value),
				},
			);
		)*
	};
}

impl DefaultValueTable {
	fn builtin() -> Self {
		let mut entries = FxHashMap::default();
		zero_entries! { entries;
			bool => "false" = false,
			char => "\0" = '\0',
			i8 => "0" = 0,
			i16 => "0" = 0,
			i32 => "0" = 0,
			i64 => "0" = 0,
			i128 => "0" = 0,
			isize => "0" = 0,
			u8 => "0" = 0,
			u16 => "0" = 0,
			u32 => "0" = 0,
			u64 => "0" = 0,
			u128 => "0" = 0,
			usize => "0" = 0,
			f32 => "0" = 0.0,
			f64 => "0" = 0.0,
			() => "()" = (),
			Duration => "0s" = Duration::ZERO,
			Uuid => "00000000-0000-0000-0000-000000000000" = Uuid::nil(),
		}
		for key in [TypeKey::of::<String>(), TypeKey::of::<&'static str>(), TypeKey::of::<Box<str>>()] {
			entries.insert(key, DefaultValue::Null);
		}
		Self { entries }
	}

	/// The process-wide table.
	pub fn global() -> &'static Self {
		static TABLE: LazyLock<DefaultValueTable> = LazyLock::new(DefaultValueTable::builtin);
		&TABLE
	}

	pub fn lookup(&self, key: TypeKey) -> Option<&DefaultValue> {
		self.entries.get(&key)
	}

	pub fn contains(&self, key: TypeKey) -> bool {
		self.entries.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(TypeKey::of::<i32>(), "0")]
	#[case(TypeKey::of::<u8>(), "0")]
	#[case(TypeKey::of::<f64>(), "0")]
	#[case(TypeKey::of::<bool>(), "false")]
	#[case(TypeKey::of::<Uuid>(), "00000000-0000-0000-0000-000000000000")]
	fn well_known_types_have_literals(#[case] key: TypeKey, #[case] literal: &str) {
		let entry = DefaultValueTable::global().lookup(key).expect("entry present");
		assert_eq!(entry.literal(), Some(literal));
		let instance = entry.produce().expect("value entry");
		assert_eq!(instance.type_key(), key);
	}

	#[test]
	fn produced_values_are_zero() {
		let table = DefaultValueTable::global();
		let int = table.lookup(TypeKey::of::<i64>()).and_then(DefaultValue::produce).unwrap();
		assert_eq!(int.downcast::<i64>().unwrap(), 0);
		let span = table.lookup(TypeKey::of::<Duration>()).and_then(DefaultValue::produce).unwrap();
		assert_eq!(span.downcast::<Duration>().unwrap(), Duration::ZERO);
		let id = table.lookup(TypeKey::of::<Uuid>()).and_then(DefaultValue::produce).unwrap();
		assert!(id.downcast::<Uuid>().unwrap().is_nil());
	}

	#[test]
	fn strings_default_to_no_value() {
		let entry = DefaultValueTable::global().lookup(TypeKey::of::<String>()).unwrap();
		assert!(matches!(entry, DefaultValue::Null));
		assert!(entry.produce().is_none());
	}

	#[test]
	fn custom_types_are_absent() {
		struct Custom;
		assert!(!DefaultValueTable::global().contains(TypeKey::of::<Custom>()));
	}
}
