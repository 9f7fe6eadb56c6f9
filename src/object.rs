//! The base abstraction: what a type declares so it can be proxied.
//!
//! A type opts in by implementing [`ClassInfo`] (usually `#[derive(BaseObject)]`) and [`Accessors`] (usually an
//! `#[accessors]` impl block). [`BaseObject`] is then implemented automatically.

use crate::proxy::Proxy;
use crate::table::PropertyTable;

/// Runtime type information: class name and readable plain fields.
pub trait ClassInfo {
    /// Name of the concrete type, used in error messages.
    fn class_name() -> &'static str;

    /// Names of the plain fields exposed through the proxy, in declaration order.
    fn field_names() -> Vec<&'static str> {
        Vec::new()
    }

    /// Register the readable plain fields.
    fn register_fields(_table: &mut PropertyTable<Self>)
    where
        Self: Sized,
    {
    }
}

/// Accessor methods (`get_*` / `set_*`) of a type.
pub trait Accessors {
    fn register_accessors(table: &mut PropertyTable<Self>)
    where
        Self: Sized;
}

/// A type whose instances can be wrapped in a [`Proxy`].
pub trait BaseObject: ClassInfo + Accessors + Sized {
    /// Build a fresh accessor table for this type.
    fn property_table() -> PropertyTable<Self> {
        let mut table = PropertyTable::new();
        Self::register_fields(&mut table);
        Self::register_accessors(&mut table);
        table
    }

    /// Wrap this instance so that property access goes through its accessors.
    fn into_proxy(self) -> Proxy<Self> {
        Proxy::new(self)
    }
}

impl<T: ClassInfo + Accessors + Sized> BaseObject for T {}
