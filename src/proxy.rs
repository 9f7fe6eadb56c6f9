//! Virtual property dispatch.
//!
//! [`Proxy`] owns an instance together with its [`PropertyTable`] and resolves every property access through four
//! operations:
//!
//! | Operation | Resolution order |
//! |---|---|
//! | `get` | non-null plain field → getter → null plain field → (setter ⇒ write-only error) → unknown error |
//! | `set` | setter → (getter ⇒ read-only error) → unknown error |
//! | `has` | plain field or getter |
//! | `delete` | setter called with `Null` → (getter ⇒ read-only error) → no-op |
//!
//! ## Notes
//! - Reads prefer a plain field over a getter unless the field holds `Null`; writes always go through the setter
//!   and never touch plain fields.
//! - `has` does not report setter-only keys, and `delete` of an unknown key succeeds. Both asymmetries are part of
//!   the observable contract.
//! - All existence and direction checks run before any accessor is invoked, so a failed `set` or `delete` leaves
//!   the instance unchanged.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};
use virtprop_core::{Access, Direction, PropertyError, PropertyResult, Value};

use crate::object::BaseObject;
use crate::table::{PropertyTable, SetterFailure};

/// A handle that routes property access on `T` through its accessor table.
///
/// `Proxy<T>` dereferences to `T`, so inherent methods of the wrapped instance stay callable.
pub struct Proxy<T: BaseObject> {
    instance: T,
    table: PropertyTable<T>,
}

impl<T: BaseObject> Proxy<T> {
    /// Wrap `instance` with the accessor table declared by its type.
    pub fn new(instance: T) -> Self {
        Self::with_table(instance, T::property_table())
    }

    /// Wrap `instance` with an explicitly built table.
    pub fn with_table(instance: T, table: PropertyTable<T>) -> Self {
        Self { instance, table }
    }

    /// Name of the wrapped instance's type.
    pub fn class_name(&self) -> &'static str {
        T::class_name()
    }

    /// Read the property `key`.
    ///
    /// # Errors
    /// - `InvalidCall` (write-only) when only a setter serves `key`.
    /// - `UnknownProperty` when nothing serves `key`.
    pub fn get(&self, key: &str) -> PropertyResult<Value> {
        let class = T::class_name();

        if let Some(value) = self.table.read_field(&self.instance, key) {
            trace!(class, key, "read plain field");
            return Ok(value);
        }

        if let Some(getter) = self.table.getter(key) {
            trace!(class, key, "invoking getter");
            return Ok(getter(&self.instance));
        }

        if self.table.has_field(key) {
            trace!(class, key, "plain field is null");
            return Ok(Value::Null);
        }

        let err = if self.table.has_setter(key) {
            PropertyError::invalid_call(class, key, Direction::Getting, Access::WriteOnly)
        } else {
            PropertyError::unknown(class, key, Direction::Getting)
        };
        debug!(class, key, error = %err, "property read failed");
        Err(err)
    }

    /// Write `value` to the property `key` through its setter.
    ///
    /// # Errors
    /// - `InvalidCall` (read-only) when only a getter serves `key`.
    /// - `UnknownProperty` when no accessor serves `key`, even if a plain field of that name exists.
    /// - `TypeMismatch` / `Rejected` when the setter refuses the value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> PropertyResult<()> {
        let class = T::class_name();

        if let Some(setter) = self.table.setter(key) {
            trace!(class, key, "invoking setter");
            return setter(&mut self.instance, value.into())
                .map_err(|failure| setter_error(class, key, Direction::Setting, failure));
        }

        let err = if self.table.has_getter(key) {
            PropertyError::invalid_call(class, key, Direction::Setting, Access::ReadOnly)
        } else {
            PropertyError::unknown(class, key, Direction::Setting)
        };
        debug!(class, key, error = %err, "property write failed");
        Err(err)
    }

    /// Whether `key` is readable: a plain field (null or not) or a getter serves it.
    ///
    /// Setter-only keys are reported as absent.
    pub fn has(&self, key: &str) -> bool {
        self.table.has_field(key) || self.table.has_getter(key)
    }

    /// Reset the property `key` by calling its setter with `Value::Null`.
    ///
    /// Returns `Ok(true)` when the setter ran and also when nothing serves `key` (no-op).
    ///
    /// # Errors
    /// - `InvalidCall` (read-only) when only a getter serves `key`.
    /// - `TypeMismatch` / `Rejected` when the setter refuses the null value.
    pub fn delete(&mut self, key: &str) -> PropertyResult<bool> {
        let class = T::class_name();

        if let Some(setter) = self.table.setter(key) {
            trace!(class, key, "clearing through setter");
            setter(&mut self.instance, Value::Null)
                .map_err(|failure| setter_error(class, key, Direction::Unsetting, failure))?;
            return Ok(true);
        }

        if self.table.has_getter(key) {
            let err = PropertyError::invalid_call(class, key, Direction::Unsetting, Access::ReadOnly);
            debug!(class, key, error = %err, "property delete failed");
            return Err(err);
        }

        trace!(class, key, "delete of unknown property is a no-op");
        Ok(true)
    }

    /// The accessor table backing this proxy.
    pub fn table(&self) -> &PropertyTable<T> {
        &self.table
    }

    /// Edit the accessor table. Changes apply to the next access.
    pub fn table_mut(&mut self) -> &mut PropertyTable<T> {
        &mut self.table
    }

    /// Unwrap the instance, dropping the table.
    pub fn into_inner(self) -> T {
        self.instance
    }
}

impl<T: BaseObject> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: BaseObject> DerefMut for Proxy<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.instance
    }
}

impl<T: BaseObject + std::fmt::Debug> std::fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("instance", &self.instance)
            .field("table", &self.table)
            .finish()
    }
}

fn setter_error(class: &'static str, key: &str, direction: Direction, failure: SetterFailure) -> PropertyError {
    let err = match failure {
        SetterFailure::Conversion(source) => PropertyError::TypeMismatch {
            class,
            key: key.to_owned(),
            direction,
            source,
        },
        SetterFailure::Rejected(rejection) => PropertyError::Rejected {
            class,
            key: key.to_owned(),
            direction,
            reason: rejection.0,
        },
    };
    debug!(class, key, error = %err, "setter refused value");
    err
}
