//! Conversions between Rust accessor types and [`Value`].
//!
//! Getters and plain fields go through [`ToValue`] (borrowing), setters through [`FromValue`] (owning).
//!
//! ## Notes
//! - `Value::Null` converts to the empty value of scalar types (`false`, `0`, `0.0`, `""`, `[]`) and to `None` for
//!   `Option<T>`. This is the clearing semantics a `delete` relies on when it calls a setter with `Null`.
//! - `Int` widens into floats; integers narrow only when the value fits.
//! - `u64` and `usize` read out as `Int`, saturating at `i64::MAX`.

use thiserror::Error;

use crate::value::Value;

/// Failure to convert a [`Value`] into the parameter type of a setter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("expected a single character, found a string of length {len}")]
    NotAChar { len: usize },
}

impl ConversionError {
    fn wrong_type(expected: &'static str, found: &Value) -> Self {
        ConversionError::WrongType {
            expected,
            found: found.type_name(),
        }
    }
}

/// Read a Rust value as a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Build a Rust value from a [`Value`] handed to a setter.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

/// Reason a validating setter refused a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl From<String> for Rejection {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

impl From<&str> for Rejection {
    fn from(reason: &str) -> Self {
        Self(reason.to_owned())
    }
}

/// Normalize what a setter returns.
///
/// Plain setters return `()`; validating setters return `Result<(), Rejection>`.
pub trait SetterOutput {
    fn into_outcome(self) -> Result<(), Rejection>;
}

impl SetterOutput for () {
    fn into_outcome(self) -> Result<(), Rejection> {
        Ok(())
    }
}

impl SetterOutput for Result<(), Rejection> {
    fn into_outcome(self) -> Result<(), Rejection> {
        self
    }
}

// ---------------------------------------------------------------------------
// ToValue
// ---------------------------------------------------------------------------

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! to_value_via_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

to_value_via_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

// ---------------------------------------------------------------------------
// FromValue
// ---------------------------------------------------------------------------

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(ConversionError::wrong_type("bool", &other)),
        }
    }
}

macro_rules! from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| ConversionError::OutOfRange {
                            value: i,
                            target: stringify!($ty),
                        }),
                        Value::Null => Ok(0),
                        other => Err(ConversionError::wrong_type(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as f64),
            Value::Null => Ok(0.0),
            other => Err(ConversionError::wrong_type("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(x) => Ok(x as f32),
            Value::Int(i) => Ok(i as f32),
            Value::Null => Ok(0.0),
            other => Err(ConversionError::wrong_type("f32", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Str(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(ConversionError::wrong_type("str", &other)),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConversionError::NotAChar {
                        len: s.chars().count(),
                    }),
                }
            }
            Value::Null => Ok('\0'),
            other => Err(ConversionError::wrong_type("char", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(ConversionError::wrong_type("list", &other)),
        }
    }
}
