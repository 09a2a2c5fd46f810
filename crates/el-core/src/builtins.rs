//! Classes every context can reference without registering them first.
//!
//! Each built-in class is built once per process. Every accessor hands out the
//! same [`ClassHandle`], so static fields updated by the host are seen by all
//! contexts.

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::class::{ClassBuilder, ClassHandle, ConstructorDescriptor, Visibility};
use crate::error::Thrown;
use crate::ty::TypeDescriptor as T;
use crate::value::Value;

pub const MATH: &str = "el.lang.Math";
pub const INTEGER: &str = "el.lang.Integer";
pub const BOOLEAN: &str = "el.lang.Boolean";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuiltinError {
    #[error("/ by zero")]
    DivideByZero,
    #[error("For input string: \"{0}\"")]
    NumberFormat(String),
    #[error("expected {expected} argument, got {got}")]
    BadArgument { expected: &'static str, got: String },
}

fn float_arg(args: &[Value], idx: usize) -> Result<f64, Thrown> {
    args.get(idx).and_then(Value::as_float).ok_or_else(|| {
        Box::new(BuiltinError::BadArgument {
            expected: "numeric",
            got: args.get(idx).map(|v| v.to_string()).unwrap_or_default(),
        }) as Thrown
    })
}

fn int_arg(args: &[Value], idx: usize) -> Result<i64, Thrown> {
    args.get(idx).and_then(Value::as_int).ok_or_else(|| {
        Box::new(BuiltinError::BadArgument {
            expected: "integer",
            got: args.get(idx).map(|v| v.to_string()).unwrap_or_default(),
        }) as Thrown
    })
}

fn str_arg(args: &[Value], idx: usize) -> Result<&str, Thrown> {
    args.get(idx).and_then(Value::as_str).ok_or_else(|| {
        Box::new(BuiltinError::BadArgument {
            expected: "string",
            got: args.get(idx).map(|v| v.to_string()).unwrap_or_default(),
        }) as Thrown
    })
}

fn parse_int(text: &str) -> Result<i64, Thrown> {
    text.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| Box::new(BuiltinError::NumberFormat(text.to_string())) as Thrown)
}

fn build_math() -> ClassHandle {
    ClassBuilder::new(MATH)
        .static_field("PI", T::Float, Value::Float(std::f64::consts::PI))
        .static_field("E", T::Float, Value::Float(std::f64::consts::E))
        .static_method("abs", vec![T::Int], T::Int, |args| {
            Ok(Value::Int(int_arg(args, 0)?.wrapping_abs()))
        })
        .static_method("abs", vec![T::Float], T::Float, |args| {
            Ok(Value::Float(float_arg(args, 0)?.abs()))
        })
        .static_method("max", vec![T::Int, T::Int], T::Int, |args| {
            Ok(Value::Int(int_arg(args, 0)?.max(int_arg(args, 1)?)))
        })
        .static_method("max", vec![T::Float, T::Float], T::Float, |args| {
            Ok(Value::Float(float_arg(args, 0)?.max(float_arg(args, 1)?)))
        })
        .static_method("min", vec![T::Int, T::Int], T::Int, |args| {
            Ok(Value::Int(int_arg(args, 0)?.min(int_arg(args, 1)?)))
        })
        .static_method("min", vec![T::Float, T::Float], T::Float, |args| {
            Ok(Value::Float(float_arg(args, 0)?.min(float_arg(args, 1)?)))
        })
        .static_method("sqrt", vec![T::Float], T::Float, |args| {
            Ok(Value::Float(float_arg(args, 0)?.sqrt()))
        })
        .static_method("pow", vec![T::Float, T::Float], T::Float, |args| {
            Ok(Value::Float(float_arg(args, 0)?.powf(float_arg(args, 1)?)))
        })
        .static_method("floorDiv", vec![T::Int, T::Int], T::Int, |args| {
            let (a, b) = (int_arg(args, 0)?, int_arg(args, 1)?);
            if b == 0 {
                return Err(BuiltinError::DivideByZero.into());
            }
            Ok(Value::Int(a.div_euclid(b)))
        })
        .constructor(ConstructorDescriptor::new(
            vec![],
            Visibility::Private,
            |class, _| Ok(Value::Object(crate::value::ObjectRef::new(class.clone(), []))),
        ))
        .build()
}

fn build_integer() -> ClassHandle {
    ClassBuilder::new(INTEGER)
        .static_field("MAX_VALUE", T::Int, Value::Int(i32::MAX as i64))
        .static_field("MIN_VALUE", T::Int, Value::Int(i32::MIN as i64))
        .static_method("parseInt", vec![T::String], T::Int, |args| {
            Ok(Value::Int(parse_int(str_arg(args, 0)?)?))
        })
        .static_method("toString", vec![T::Int], T::String, |args| {
            Ok(Value::String(int_arg(args, 0)?.to_string()))
        })
        .constructor(ConstructorDescriptor::new(
            vec![T::Int],
            Visibility::Public,
            |_, args| Ok(Value::Int(int_arg(args, 0)?)),
        ))
        .constructor(ConstructorDescriptor::new(
            vec![T::String],
            Visibility::Public,
            |_, args| Ok(Value::Int(parse_int(str_arg(args, 0)?)?)),
        ))
        .build()
}

fn build_boolean() -> ClassHandle {
    ClassBuilder::new(BOOLEAN)
        .static_field("TRUE", T::Bool, Value::Bool(true))
        .static_field("FALSE", T::Bool, Value::Bool(false))
        .static_method("parseBoolean", vec![T::String], T::Bool, |args| {
            let text = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(Value::Bool(text.eq_ignore_ascii_case("true")))
        })
        .build()
}

static MATH_CLASS: Lazy<ClassHandle> = Lazy::new(build_math);
static INTEGER_CLASS: Lazy<ClassHandle> = Lazy::new(build_integer);
static BOOLEAN_CLASS: Lazy<ClassHandle> = Lazy::new(build_boolean);

pub fn math() -> ClassHandle {
    MATH_CLASS.clone()
}

pub fn integer() -> ClassHandle {
    INTEGER_CLASS.clone()
}

pub fn boolean() -> ClassHandle {
    BOOLEAN_CLASS.clone()
}

pub fn all() -> Vec<ClassHandle> {
    vec![math(), integer(), boolean()]
}
