use pretty_assertions::assert_eq;

use super::*;
use crate::test_fixtures::{self, Buffer, Level, Toggle, Widget};

#[test]
fn constructors_keep_registration_order() {
	let registry = test_fixtures::registry();
	let names: Vec<_> = registry
		.constructors(TypeKey::of::<Widget>())
		.iter()
		.map(|c| c.name.as_ref())
		.collect();
	assert_eq!(names, ["with_label", "new", "sized"]);
}

#[test]
fn signature_records_shapes_and_visibility() {
	let registry = test_fixtures::registry();
	let toggle = &registry.constructors(TypeKey::of::<Toggle>())[0];
	assert!(!toggle.public);
	assert_eq!(toggle.params[0].ty, TypeKey::of::<bool>());
	assert_eq!(toggle.params[0].shape, ParamShape::Value);

	let buffer = registry.constructors(TypeKey::of::<Buffer>());
	assert!(buffer[0].has_unsupported_params());
	assert_eq!(buffer[0].params[0].ty, TypeKey::of::<*const u8>());
	assert!(!buffer[1].has_unsupported_params());
}

#[test]
fn nullability_follows_shape() {
	assert!(!ParamShape::Value.is_nullable());
	assert!(ParamShape::Nullable.is_nullable());
	assert!(ParamShape::Dynamic.is_nullable());
	assert!(!ParamShape::Pointer.is_nullable());
}

#[test]
fn unregistered_types_are_classes_without_constructors() {
	struct Unknown;
	let registry = test_fixtures::registry();
	assert!(matches!(registry.kind(TypeKey::of::<Unknown>()), TypeKind::Class));
	assert!(registry.constructors(TypeKey::of::<Unknown>()).is_empty());
	assert!(registry.type_info(TypeKey::of::<Unknown>()).is_none());
}

#[test]
fn enum_registration_exposes_underlying_and_parser() {
	let registry = test_fixtures::registry();
	let TypeKind::Enum(info) = registry.kind(TypeKey::of::<Level>()) else {
		panic!("Level should be registered as an enum");
	};
	assert_eq!(info.underlying(), TypeKey::of::<u8>());
	let on = (info.parse)("1").expect("member 1");
	assert_eq!(on.downcast::<Level>().unwrap(), Level::On);
	assert!((info.parse)("7").is_none());
}

#[test]
fn names_resolve_by_full_and_short_form() {
	let registry = test_fixtures::registry();
	let key = TypeKey::of::<Widget>();
	assert_eq!(registry.resolve(key.name()), Some(key));
	assert_eq!(registry.resolve("Widget"), Some(key));
	assert_eq!(registry.resolve("Gadget"), None);
}

#[test]
fn short_name_collisions_keep_first_registration() {
	mod a {
		pub struct Thing;
	}
	mod b {
		pub struct Thing;
	}
	let mut builder = TypeRegistry::builder();
	builder.structure::<a::Thing>().structure::<b::Thing>();
	let registry = builder.build();
	assert_eq!(registry.resolve("Thing"), Some(TypeKey::of::<a::Thing>()));
	assert_eq!(registry.resolve(TypeKey::of::<b::Thing>().name()), Some(TypeKey::of::<b::Thing>()));
	assert_eq!(registry.len(), 2);
}

#[test]
fn closure_constructors_invoke_through_arg_list() {
	let registry = test_fixtures::registry();
	let sized = &registry.constructors(TypeKey::of::<Widget>())[2];
	let mut args = ArgList::new(vec![Arg::new(9_i32)]);
	let instance = (sized.invoke)(&mut args).expect("invocation succeeds");
	assert_eq!(instance.downcast::<Widget>().unwrap().size, 9);
}

#[test]
fn builder_registrations_record_their_source() {
	let registry = test_fixtures::registry();
	let level = registry.type_info(TypeKey::of::<Level>()).expect("Level registered");
	assert_eq!(level.source, RegistrationSource::Builder);
	assert!(
		registry
			.constructors(TypeKey::of::<Widget>())
			.iter()
			.all(|c| c.source == RegistrationSource::Builder)
	);
	assert_eq!(RegistrationSource::Builder.to_string(), "builder");
	assert_eq!(RegistrationSource::Crate("demo").to_string(), "crate:demo");
}

#[test]
fn duplicate_type_registration_keeps_the_first() {
	let _ = tracing_subscriber::fmt::try_init();
	let mut builder = TypeRegistry::builder();
	builder
		.structure::<Level>()
		.enumeration::<Level, u8>(|_| None)
		.register_type::<Widget>(TypeKind::Class)
		.structure::<Widget>();
	let registry = builder.build();
	assert!(matches!(registry.kind(TypeKey::of::<Level>()), TypeKind::Struct));
	assert!(matches!(registry.kind(TypeKey::of::<Widget>()), TypeKind::Class));
	assert_eq!(registry.len(), 2);
}
