//! Common imports for types that expose virtual properties.
//!
//! ```ignore
//! use virtprop::prelude::*;
//! ```

pub use crate::object::{Accessors, BaseObject, ClassInfo};
pub use crate::proxy::Proxy;
pub use crate::table::PropertyTable;

pub use virtprop_core::{PropertyError, PropertyResult, Rejection, Value};

// Derive and attribute macros share names with the traits above (macro namespace).
pub use virtprop_derive::{BaseObject, accessors};
