//! Canonical error taxonomy for virtual property access.
//!
//! Two kinds describe misuse of the accessor convention itself (`UnknownPropertyException`,
//! `InvalidCallException`); two more describe a setter refusing the value it was handed (`TypeMismatch`,
//! `Rejected`). Every error names the owning class, the key and the access direction, so callers can diagnose
//! the failure without inspecting the table.

use core::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::conversions::ConversionError;

/// Result alias for property access.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// The operation that failed, as it appears at the start of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Getting,
    Setting,
    Unsetting,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Getting => "Getting",
            Direction::Setting => "Setting",
            Direction::Unsetting => "Unsetting",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The restriction an `InvalidCall` ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    WriteOnly,
}

impl Access {
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::ReadOnly => "read-only",
            Access::WriteOnly => "write-only",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`PropertyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownProperty,
    InvalidCall,
    TypeMismatch,
    Rejected,
}

impl ErrorKind {
    /// Canonical exception name for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownProperty => "UnknownPropertyException",
            ErrorKind::InvalidCall => "InvalidCallException",
            ErrorKind::TypeMismatch => "TypeMismatchException",
            ErrorKind::Rejected => "RejectedValueException",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a get / set / delete on a virtual property.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PropertyError {
    /// The key matches no field, getter or setter in the requested direction.
    #[error("{direction} unknown property: {class}::{key}")]
    #[diagnostic(
        code(virtprop::unknown_property),
        help("declare a `get_*` / `set_*` accessor for this key, or check the key's spelling")
    )]
    UnknownProperty {
        class: &'static str,
        key: String,
        direction: Direction,
    },

    /// The key resolves to an accessor of the wrong direction.
    #[error("{direction} {access} property: {class}::{key}")]
    #[diagnostic(code(virtprop::invalid_call))]
    InvalidCall {
        class: &'static str,
        key: String,
        direction: Direction,
        access: Access,
    },

    /// The value could not be converted into the setter's parameter type.
    #[error("{direction} property {class}::{key}: {source}")]
    #[diagnostic(code(virtprop::type_mismatch))]
    TypeMismatch {
        class: &'static str,
        key: String,
        direction: Direction,
        source: ConversionError,
    },

    /// A validating setter refused the value.
    #[error("{direction} property {class}::{key} rejected: {reason}")]
    #[diagnostic(code(virtprop::rejected))]
    Rejected {
        class: &'static str,
        key: String,
        direction: Direction,
        reason: String,
    },
}

impl PropertyError {
    pub fn unknown(class: &'static str, key: &str, direction: Direction) -> Self {
        PropertyError::UnknownProperty {
            class,
            key: key.to_owned(),
            direction,
        }
    }

    pub fn invalid_call(class: &'static str, key: &str, direction: Direction, access: Access) -> Self {
        PropertyError::InvalidCall {
            class,
            key: key.to_owned(),
            direction,
            access,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PropertyError::UnknownProperty { .. } => ErrorKind::UnknownProperty,
            PropertyError::InvalidCall { .. } => ErrorKind::InvalidCall,
            PropertyError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            PropertyError::Rejected { .. } => ErrorKind::Rejected,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            PropertyError::UnknownProperty { class, .. }
            | PropertyError::InvalidCall { class, .. }
            | PropertyError::TypeMismatch { class, .. }
            | PropertyError::Rejected { class, .. } => class,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            PropertyError::UnknownProperty { key, .. }
            | PropertyError::InvalidCall { key, .. }
            | PropertyError::TypeMismatch { key, .. }
            | PropertyError::Rejected { key, .. } => key,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            PropertyError::UnknownProperty { direction, .. }
            | PropertyError::InvalidCall { direction, .. }
            | PropertyError::TypeMismatch { direction, .. }
            | PropertyError::Rejected { direction, .. } => *direction,
        }
    }
}
