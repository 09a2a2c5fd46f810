use std::error::Error as _;
use std::sync::{Arc, Mutex};

use el_core::builtins::{self, BuiltinError};
use el_core::class::{Binding, ClassBuilder, ConstructorDescriptor, FieldDescriptor, Visibility};
use el_core::config::ResolverConfig;
use el_core::error::{ElError, MemberKind};
use el_core::{ClassHandle, ElContext, EvaluationListener, TypeDescriptor, Value};
use el_resolve::{ElResolver, StaticFieldResolver, CONSTRUCTOR_NAME};
use pretty_assertions::assert_eq;

fn ctx() -> ElContext {
    ElContext::with_config(ResolverConfig::default())
}

fn class_value(class: &ClassHandle) -> Value {
    Value::Class(class.clone())
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("sensor {0} offline")]
struct SensorOffline(u32);

fn station() -> ClassHandle {
    ClassBuilder::new("weather.Station")
        .static_field("UNITS", TypeDescriptor::String, Value::string("metric"))
        .field(FieldDescriptor::new(
            "apiKey",
            TypeDescriptor::String,
            Visibility::Private,
            Binding::Static,
            Value::string("hunter2"),
        ))
        .field(FieldDescriptor::new(
            "cache",
            TypeDescriptor::Any,
            Visibility::Protected,
            Binding::Static,
            Value::Null,
        ))
        .instance_field("name", TypeDescriptor::String)
        .instance_field("altitude", TypeDescriptor::Int)
        .static_method("read", vec![TypeDescriptor::Int], TypeDescriptor::Float, |args| {
            Err(SensorOffline(args[0].as_int().unwrap_or_default() as u32).into())
        })
        .static_method("reset", vec![], TypeDescriptor::Void, |_| Ok(Value::Int(99)))
        .method(el_core::class::MethodDescriptor::new(
            "describe",
            vec![],
            TypeDescriptor::String,
            Visibility::Public,
            Binding::Instance,
            |_, _| Ok(Value::string("station")),
        ))
        .constructor(ConstructorDescriptor::field_wise(
            vec![TypeDescriptor::String, TypeDescriptor::Int],
            Visibility::Public,
        ))
        .build()
}

// ===== READ =====

#[test]
fn reads_public_static_field_and_marks_resolved() {
    let resolver = StaticFieldResolver::new();
    let mut ctx = ctx();
    let math = builtins::math();

    let value = resolver
        .get_value(&mut ctx, &class_value(&math), &Value::string("PI"))
        .unwrap();

    assert_eq!(value, Some(Value::Float(std::f64::consts::PI)));
    assert!(ctx.is_property_resolved());
}

#[test]
fn repeated_reads_are_stable() {
    let resolver = StaticFieldResolver::new();
    let station = station();
    for _ in 0..2 {
        let mut ctx = ctx();
        let value = resolver
            .get_value(&mut ctx, &class_value(&station), &Value::string("UNITS"))
            .unwrap();
        assert_eq!(value, Some(Value::string("metric")));
        assert!(ctx.is_property_resolved());
    }
}

#[test]
fn read_sees_host_updates() {
    let resolver = StaticFieldResolver::new();
    let station = station();
    assert!(station.set_static("UNITS", Value::string("imperial")));
    let value = resolver
        .get_value(&mut ctx(), &class_value(&station), &Value::string("UNITS"))
        .unwrap();
    assert_eq!(value, Some(Value::string("imperial")));
}

#[test]
fn read_of_inaccessible_fields_fails_after_resolving() {
    let resolver = StaticFieldResolver::new();
    let station = station();

    for name in ["missing", "apiKey", "cache", "name"] {
        let mut ctx = ctx();
        let err = resolver
            .get_value(&mut ctx, &class_value(&station), &Value::string(name))
            .unwrap_err();
        assert!(ctx.is_property_resolved(), "{} should be resolved", name);
        match err {
            ElError::MemberNotFound {
                kind,
                type_name,
                member,
                message,
            } => {
                assert_eq!(kind, MemberKind::Field);
                assert_eq!(type_name, "weather.Station");
                assert_eq!(member, name);
                assert!(message.contains("weather.Station"));
                assert!(message.contains(name));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn read_message_follows_context_locale() {
    let catalog = Arc::new(el_core::messages::MessageCatalog::new());
    catalog.register_bundle(
        "de",
        [(
            el_core::messages::STATIC_FIELD_READ_ERROR.to_string(),
            "{1} ist kein öffentliches statisches Feld von {0}".to_string(),
        )],
    );
    let mut ctx = ctx().with_messages(catalog);
    ctx.set_locale("de");

    let err = StaticFieldResolver::new()
        .get_value(&mut ctx, &class_value(&builtins::math()), &Value::string("TAU"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "TAU ist kein öffentliches statisches Feld von el.lang.Math"
    );
}

// ===== WRITE =====

#[test]
fn writes_are_always_rejected() {
    let resolver = StaticFieldResolver::new();
    let station = station();

    for name in ["UNITS", "missing", "name"] {
        let err = resolver
            .set_value(
                &mut ctx(),
                &class_value(&station),
                &Value::string(name),
                Value::Int(1),
            )
            .unwrap_err();
        assert!(matches!(
            &err,
            ElError::NotWritable { type_name, member, .. }
                if type_name == "weather.Station" && member == name
        ));
    }
    // the field keeps its value
    assert_eq!(
        station.field("UNITS").unwrap().get_static(),
        Ok(Value::string("metric"))
    );
}

// ===== TYPE =====

#[test]
fn type_of_public_static_field() {
    let resolver = StaticFieldResolver::new();
    let mut ctx = ctx();
    let ty = resolver
        .get_type(&mut ctx, &class_value(&builtins::integer()), &Value::string("MAX_VALUE"))
        .unwrap();
    assert_eq!(ty, Some(TypeDescriptor::Int));
    assert!(ctx.is_property_resolved());
}

#[test]
fn type_of_missing_field_fails_after_resolving() {
    let resolver = StaticFieldResolver::new();
    let station = station();
    for name in ["missing", "apiKey", "altitude"] {
        let mut ctx = ctx();
        let err = resolver
            .get_type(&mut ctx, &class_value(&station), &Value::string(name))
            .unwrap_err();
        assert!(ctx.is_property_resolved());
        assert!(err.is_member_not_found());
        assert_eq!(err.member(), Some(name));
        assert_eq!(err.type_name(), Some("weather.Station"));
    }
}

// ===== READ-ONLY =====

#[test]
fn read_only_is_unconditional() {
    let resolver = StaticFieldResolver::new();
    let math = class_value(&builtins::math());

    let mut ctx = ctx();
    assert!(resolver
        .is_read_only(&mut ctx, &math, &Value::string("PI"))
        .unwrap());
    assert!(ctx.is_property_resolved());

    // existence is not checked, unlike get_value/get_type
    let mut ctx = self::ctx();
    assert!(resolver
        .is_read_only(&mut ctx, &math, &Value::string("NOPE"))
        .unwrap());
    assert!(ctx.is_property_resolved());

    // not applicable: still true, flag untouched
    let mut ctx = self::ctx();
    assert!(resolver
        .is_read_only(&mut ctx, &Value::string("Math"), &Value::string("PI"))
        .unwrap());
    assert!(!ctx.is_property_resolved());
}

// ===== INVOKE =====

#[test]
fn invokes_static_method() {
    let resolver = StaticFieldResolver::new();
    let mut ctx = ctx();
    let value = resolver
        .invoke(
            &mut ctx,
            &class_value(&builtins::math()),
            &Value::string("max"),
            None,
            &[Value::Int(3), Value::Int(8)],
        )
        .unwrap();
    assert_eq!(value, Some(Value::Int(8)));
    assert!(ctx.is_property_resolved());
}

#[test]
fn void_methods_return_null() {
    let mut ctx = ctx();
    let value = StaticFieldResolver::new()
        .invoke(&mut ctx, &class_value(&station()), &Value::string("reset"), Some(&[]), &[])
        .unwrap();
    assert_eq!(value, Some(Value::Null));
    assert!(ctx.is_property_resolved());
}

#[test]
fn instance_methods_are_not_found() {
    let mut ctx = ctx();
    let err = StaticFieldResolver::new()
        .invoke(&mut ctx, &class_value(&station()), &Value::string("describe"), None, &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ElError::MemberNotFound {
            kind: MemberKind::Method,
            ..
        }
    ));
    assert!(!ctx.is_property_resolved());
}

#[test]
fn thrown_errors_are_wrapped_with_cause() {
    let mut ctx = ctx();
    let err = StaticFieldResolver::new()
        .invoke(
            &mut ctx,
            &class_value(&station()),
            &Value::string("read"),
            None,
            &[Value::Int(7)],
        )
        .unwrap_err();

    assert!(matches!(err, ElError::InvocationFailure { .. }));
    assert_eq!(
        err.source().and_then(|cause| cause.downcast_ref::<SensorOffline>()),
        Some(&SensorOffline(7))
    );
    assert!(err.to_string().contains("sensor 7 offline"));
    assert!(!ctx.is_property_resolved());
}

#[test]
fn builtin_failures_keep_their_type() {
    let err = StaticFieldResolver::new()
        .invoke(
            &mut ctx(),
            &class_value(&builtins::math()),
            &Value::string("floorDiv"),
            None,
            &[Value::Int(1), Value::Int(0)],
        )
        .unwrap_err();
    assert_eq!(
        err.cause().and_then(|cause| cause.downcast_ref::<BuiltinError>()),
        Some(&BuiltinError::DivideByZero)
    );
}

#[test]
fn constructor_pseudo_method_creates_instance() {
    let station = station();
    let mut ctx = ctx();
    let value = StaticFieldResolver::new()
        .invoke(
            &mut ctx,
            &class_value(&station),
            &Value::string(CONSTRUCTOR_NAME),
            None,
            &[Value::string("Zugspitze"), Value::Int(2962)],
        )
        .unwrap()
        .expect("resolved");
    assert!(ctx.is_property_resolved());

    let object = value.as_object().expect("an instance");
    assert_eq!(object.class(), &station);
    assert_eq!(object.get("name"), Some(Value::string("Zugspitze")));
    assert_eq!(object.get("altitude"), Some(Value::Int(2962)));
}

#[test]
fn constructor_with_hints() {
    let value = StaticFieldResolver::new()
        .invoke(
            &mut ctx(),
            &class_value(&builtins::integer()),
            &Value::string(CONSTRUCTOR_NAME),
            Some(&[TypeDescriptor::String]),
            &[Value::string("12")],
        )
        .unwrap();
    assert_eq!(value, Some(Value::Int(12)));
}

#[test]
fn missing_public_constructor_is_member_not_found() {
    let mut ctx = ctx();
    let err = StaticFieldResolver::new()
        .invoke(
            &mut ctx,
            &class_value(&builtins::math()),
            &Value::string(CONSTRUCTOR_NAME),
            Some(&[]),
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        &err,
        ElError::MemberNotFound {
            kind: MemberKind::Constructor,
            type_name,
            ..
        } if type_name == "el.lang.Math"
    ));
    assert!(!ctx.is_property_resolved());
}

#[test]
fn hint_count_mismatch_is_member_not_found() {
    let resolver = StaticFieldResolver::new();
    let math = class_value(&builtins::math());

    let mut ctx = ctx();
    let err = resolver
        .invoke(
            &mut ctx,
            &math,
            &Value::string("abs"),
            Some(&[TypeDescriptor::Int, TypeDescriptor::Int]),
            &[Value::Int(1)],
        )
        .unwrap_err();
    assert!(matches!(
        &err,
        ElError::MemberNotFound { kind: MemberKind::Method, member, .. } if member == "abs"
    ));
    assert!(err.to_string().contains("2 parameter types given for 1 arguments"));
    assert!(!ctx.is_property_resolved());

    let integer = class_value(&builtins::integer());
    let err = resolver
        .invoke(
            &mut ctx,
            &integer,
            &Value::string(CONSTRUCTOR_NAME),
            Some(&[TypeDescriptor::Int]),
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ElError::MemberNotFound { kind: MemberKind::Constructor, .. }
    ));
    assert!(!ctx.is_property_resolved());
}

// ===== NOT APPLICABLE =====

#[test]
fn foreign_bases_and_names_pass_through() {
    let resolver = StaticFieldResolver::new();
    let math = class_value(&builtins::math());
    let cases = [
        (Value::string("el.lang.Math"), Value::string("PI")),
        (Value::Null, Value::string("PI")),
        (math.clone(), Value::Int(0)),
        (math.clone(), Value::Null),
    ];

    for (base, name) in cases {
        let mut ctx = ctx();
        assert_eq!(resolver.get_value(&mut ctx, &base, &name).unwrap(), None);
        assert_eq!(resolver.get_type(&mut ctx, &base, &name).unwrap(), None);
        resolver
            .set_value(&mut ctx, &base, &name, Value::Int(1))
            .unwrap();
        assert_eq!(
            resolver.invoke(&mut ctx, &base, &name, None, &[]).unwrap(),
            None
        );
        assert!(!ctx.is_property_resolved());
    }
}

#[test]
fn auxiliary_queries_have_fixed_answers() {
    let resolver = StaticFieldResolver::new();
    let ctx = ctx();
    for base in [class_value(&builtins::math()), Value::Null] {
        assert_eq!(resolver.feature_descriptors(&ctx, &base), None);
        assert_eq!(
            resolver.common_property_type(&ctx, &base),
            Some(TypeDescriptor::String)
        );
    }
}

// ===== LISTENERS =====

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl EvaluationListener for Recorder {
    fn property_resolved(&self, base: &Value, property: &Value) {
        self.seen
            .lock()
            .unwrap()
            .push(format!("{}#{}", base, property));
    }
}

#[test]
fn read_and_invoke_notify_listeners_type_queries_do_not() {
    let recorder = Arc::new(Recorder::default());
    let mut ctx = ctx();
    ctx.add_listener(recorder.clone());
    let resolver = StaticFieldResolver::new();
    let math = class_value(&builtins::math());

    resolver
        .get_value(&mut ctx, &math, &Value::string("E"))
        .unwrap();
    resolver
        .get_type(&mut ctx, &math, &Value::string("E"))
        .unwrap();
    resolver
        .is_read_only(&mut ctx, &math, &Value::string("E"))
        .unwrap();
    resolver
        .invoke(&mut ctx, &math, &Value::string("sqrt"), None, &[Value::Float(4.0)])
        .unwrap();

    assert_eq!(
        *recorder.seen.lock().unwrap(),
        vec![
            "class el.lang.Math#E".to_string(),
            "class el.lang.Math#sqrt".to_string()
        ]
    );
}

// ===== SHARED STATE =====

#[test]
fn builtin_statics_are_shared_between_contexts() {
    let resolver = StaticFieldResolver::new();
    let first = ctx();
    let mut second = ctx();
    let from_first = first.resolve_class("Integer").expect("builtin");
    let from_second = second.resolve_class("Integer").expect("builtin");
    assert_eq!(from_first, from_second);

    let original = from_first.field("MIN_VALUE").unwrap().get_static().unwrap();
    assert!(from_first.set_static("MIN_VALUE", Value::Int(-1)));
    let seen = resolver
        .get_value(&mut second, &class_value(&from_second), &Value::string("MIN_VALUE"))
        .unwrap();
    assert!(from_first.set_static("MIN_VALUE", original));
    assert_eq!(seen, Some(Value::Int(-1)));
    assert!(first.diagnostics().get_diagnostics().is_empty());
}

#[test]
fn raised_errors_are_recorded_on_their_context() {
    let resolver = StaticFieldResolver::new();
    let math = class_value(&builtins::math());

    let mut ctx = ctx();
    for _ in 0..3 {
        resolver
            .get_value(&mut ctx, &math, &Value::string("TAU"))
            .unwrap_err();
    }
    let diagnostics = ctx.diagnostics().get_diagnostics();
    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics
        .iter()
        .all(|d| d.code.as_deref() == Some(el_core::messages::STATIC_FIELD_READ_ERROR)));

    // a new evaluation starts clean
    assert!(self::ctx().diagnostics().get_diagnostics().is_empty());
}
