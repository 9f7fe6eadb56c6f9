//! Per-type accessor tables.
//!
//! A [`PropertyTable`] is the explicit registry behind a proxied type: its readable plain fields, its getters and
//! its setters. Getters and setters are stored under their accessor identifiers (`getName`, `setName`) and looked
//! up by deriving those identifiers from the requested key, so the table mirrors the `get<Name>` / `set<Name>`
//! convention without any runtime reflection.
//!
//! The table is plain data owned by each proxy. Editing it (defining or removing an accessor) changes the access
//! policy of that proxy on the very next call; nothing is cached.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use virtprop_core::naming::{getter_name, setter_name};
use virtprop_core::{ConversionError, FromValue, Rejection, SetterOutput, ToValue, Value};

/// Read a plain field. A `Value::Null` result lets a getter of the same key serve the read.
pub type FieldFn<T> = Box<dyn Fn(&T) -> Value>;

/// Compute a property value.
pub type GetterFn<T> = Box<dyn Fn(&T) -> Value>;

/// Store a property value.
pub type SetterFn<T> = Box<dyn Fn(&mut T, Value) -> Result<(), SetterFailure>>;

/// Why a setter did not store its value. The proxy turns this into a `PropertyError` with class and key attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetterFailure {
    /// The value did not convert into the setter's parameter type. The setter body never ran.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// The setter ran and refused the value.
    #[error("{0}")]
    Rejected(#[from] Rejection),
}

/// Convert `value` and hand it to `setter`, normalizing the setter's return type.
///
/// Used by code generated for `#[accessors]` blocks.
pub fn invoke_setter<A, O>(value: Value, setter: impl FnOnce(A) -> O) -> Result<(), SetterFailure>
where
    A: FromValue,
    O: SetterOutput,
{
    let arg = A::from_value(value)?;
    setter(arg).into_outcome()?;
    Ok(())
}

/// Registry of plain fields, getters and setters for one type.
pub struct PropertyTable<T> {
    fields: HashMap<String, FieldFn<T>>,
    getters: HashMap<String, GetterFn<T>>,
    setters: HashMap<String, SetterFn<T>>,
}

impl<T> Default for PropertyTable<T> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
            getters: HashMap::new(),
            setters: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.fields.keys().collect();
        let mut getters: Vec<_> = self.getters.keys().collect();
        let mut setters: Vec<_> = self.setters.keys().collect();
        fields.sort();
        getters.sort();
        setters.sort();
        f.debug_struct("PropertyTable")
            .field("fields", &fields)
            .field("getters", &getters)
            .field("setters", &setters)
            .finish()
    }
}

impl<T> PropertyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Registration by accessor identifier (used by generated code)
    // ------------------------------------------------------------------

    /// Register a readable plain field under its own name.
    pub fn insert_field(&mut self, name: impl Into<String>, read: impl Fn(&T) -> Value + 'static) {
        self.fields.insert(name.into(), Box::new(read));
    }

    /// Register a getter under its accessor identifier (e.g. `getName`).
    pub fn insert_getter(&mut self, ident: impl Into<String>, getter: impl Fn(&T) -> Value + 'static) {
        self.getters.insert(ident.into(), Box::new(getter));
    }

    /// Register a setter under its accessor identifier (e.g. `setName`).
    pub fn insert_setter(
        &mut self,
        ident: impl Into<String>,
        setter: impl Fn(&mut T, Value) -> Result<(), SetterFailure> + 'static,
    ) {
        self.setters.insert(ident.into(), Box::new(setter));
    }

    // ------------------------------------------------------------------
    // Typed registration by property key
    // ------------------------------------------------------------------

    /// Expose a plain field named `key`.
    pub fn define_field<R: ToValue>(&mut self, key: &str, read: impl Fn(&T) -> R + 'static) {
        self.insert_field(key, move |this| read(this).to_value());
    }

    /// Define the getter serving `key` (`name` → `getName`), replacing any previous one.
    pub fn define_getter<R: ToValue>(&mut self, key: &str, getter: impl Fn(&T) -> R + 'static) {
        self.insert_getter(getter_name(key), move |this| getter(this).to_value());
    }

    /// Define the setter serving `key` (`name` → `setName`), replacing any previous one.
    ///
    /// The setter may return `()` or `Result<(), Rejection>`.
    pub fn define_setter<A, O>(&mut self, key: &str, setter: impl Fn(&mut T, A) -> O + 'static)
    where
        A: FromValue,
        O: SetterOutput,
    {
        self.insert_setter(setter_name(key), move |this, value| {
            invoke_setter(value, |arg| setter(this, arg))
        });
    }

    /// Remove the plain field `key`. Returns whether it existed.
    pub fn remove_field(&mut self, key: &str) -> bool {
        self.fields.remove(key).is_some()
    }

    /// Remove the getter serving `key`. Returns whether it existed.
    pub fn remove_getter(&mut self, key: &str) -> bool {
        self.getters.remove(&getter_name(key)).is_some()
    }

    /// Remove the setter serving `key`. Returns whether it existed.
    pub fn remove_setter(&mut self, key: &str) -> bool {
        self.setters.remove(&setter_name(key)).is_some()
    }

    // ------------------------------------------------------------------
    // Lookup by property key
    // ------------------------------------------------------------------

    pub fn field(&self, key: &str) -> Option<&FieldFn<T>> {
        self.fields.get(key)
    }

    pub fn getter(&self, key: &str) -> Option<&GetterFn<T>> {
        self.getters.get(&getter_name(key))
    }

    pub fn setter(&self, key: &str) -> Option<&SetterFn<T>> {
        self.setters.get(&setter_name(key))
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn has_getter(&self, key: &str) -> bool {
        self.getter(key).is_some()
    }

    pub fn has_setter(&self, key: &str) -> bool {
        self.setter(key).is_some()
    }

    /// Read the plain field `key` if it exists and currently holds a non-null value.
    pub fn read_field(&self, instance: &T, key: &str) -> Option<Value> {
        let read = self.field(key)?;
        let value = read(instance);
        (!value.is_null()).then_some(value)
    }

    /// Names of the registered plain fields, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Accessor identifiers of the registered getters, sorted.
    pub fn getter_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.getters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Accessor identifiers of the registered setters, sorted.
    pub fn setter_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.setters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
