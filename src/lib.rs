#![forbid(unsafe_code)]
//! Virtual properties for Rust types.
//!
//! A proxied type exposes *virtual properties*: names read and written like plain fields but served by
//! `get_<name>` / `set_<name>` accessor methods. Accessors are declared up front in a per-type [`PropertyTable`]
//! (normally generated by `#[derive(BaseObject)]` and `#[accessors]`), and a [`Proxy`] dispatches `get`, `set`,
//! `has` and `delete` against it.
//!
//! ```
//! use virtprop::prelude::*;
//!
//! #[derive(BaseObject)]
//! struct User {
//!     id: i64,
//!     #[property(skip)]
//!     name: String,
//! }
//!
//! #[accessors]
//! impl User {
//!     fn get_name(&self) -> String {
//!         self.name.clone()
//!     }
//!
//!     fn set_name(&mut self, name: String) {
//!         self.name = name;
//!     }
//! }
//!
//! let mut user = User { id: 42, name: "Mehdi".into() }.into_proxy();
//! assert_eq!(user.get("id").unwrap(), 42_i64);
//! user.set("name", "John").unwrap();
//! assert_eq!(user.get("name").unwrap(), "John");
//! assert!(user.set("id", 7).is_err());
//! ```
//!
//! ## Panic Policy
//!
//! Library code returns `Result` and propagates with `?`. `.unwrap()` and `.expect()` are acceptable in tests.

#![deny(clippy::unwrap_used)]

pub mod object;
pub mod prelude;
pub mod proxy;
pub mod table;

pub use object::{Accessors, BaseObject, ClassInfo};
pub use proxy::Proxy;
pub use table::{PropertyTable, SetterFailure};

pub use virtprop_core::{
    Access, ConversionError, Direction, ErrorKind, FromValue, PropertyError, PropertyResult, Rejection, SetterOutput,
    ToValue, Value, naming,
};

pub use virtprop_derive::{BaseObject, accessors};
