//! Provide the shared, pure building blocks of the virtprop runtime and its macros.
//!
//! This crate is intentionally small and dependency-light. It holds the pieces that both the proc macros (at
//! expansion time) and the runtime proxy (at access time) must agree on:
//! - the accessor naming convention (`name` → `getName` / `setName`),
//! - the dynamically-typed [`Value`] carried through the proxy and its conversions, and
//! - the canonical error taxonomy ([`PropertyError`]) with its user-facing messages.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no runtime dispatch.

#![deny(clippy::unwrap_used)]

pub mod conversions;
pub mod errors;
pub mod naming;
pub mod value;

pub use conversions::{ConversionError, FromValue, Rejection, SetterOutput, ToValue};
pub use errors::{Access, Direction, ErrorKind, PropertyError, PropertyResult};
pub use naming::{AccessorKind, getter_name, setter_name, uppercase_first};
pub use value::Value;
