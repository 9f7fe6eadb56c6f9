//! Macros that declare virtprop accessor tables at compile time.
//!
//! - `BaseObject` (derive): implements `virtprop::ClassInfo`: class name, field names and readable plain fields.
//! - `accessors` (attribute on an inherent `impl`): implements `virtprop::Accessors` from the block's
//!   `get_*` / `set_*` methods.
//!
//! Together they make a type a `virtprop::BaseObject`.

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod accessors;
mod base_object;

/// Generates `virtprop::ClassInfo` for a struct with named fields.
///
/// Every named field becomes a readable plain field of the proxy. Field types must implement
/// `virtprop::ToValue`.
///
/// Attributes:
/// - `#[base_object(name = "...")]` on the struct overrides the class name used in error messages.
/// - `#[property(skip)]` on a field keeps it out of the proxy.
/// - `#[property(rename = "...")]` on a field exposes it under another key.
///
/// # Example
/// ```ignore
/// #[derive(BaseObject)]
/// struct User {
///     id: i64,
///     #[property(skip)]
///     password_hash: String,
/// }
///
/// // Generates:
/// impl virtprop::ClassInfo for User {
///     fn class_name() -> &'static str { "User" }
///     fn field_names() -> Vec<&'static str> { vec!["id"] }
///     fn register_fields(table: &mut virtprop::PropertyTable<Self>) {
///         table.insert_field("id", |this: &Self| virtprop::ToValue::to_value(&this.id));
///     }
/// }
/// ```
#[proc_macro_derive(BaseObject, attributes(base_object, property))]
pub fn derive_base_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    base_object::expand_base_object(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Registers the `get_*` / `set_*` methods of an inherent `impl` block as accessors.
///
/// The impl block is emitted unchanged (minus `#[accessor(...)]` markers), followed by an implementation of
/// `virtprop::Accessors`:
/// - `fn get_read_only(&self) -> R` becomes getter `getReadOnly` serving key `readOnly`; `R: ToValue`.
/// - `fn set_name(&mut self, name: A) -> O` becomes setter `setName` serving key `name`; `A: FromValue`, and `O` is
///   `()` or `Result<(), Rejection>`.
/// - `#[accessor(skip)]` leaves a method out.
///
/// # Example
/// ```ignore
/// #[accessors]
/// impl User {
///     fn get_name(&self) -> &str { &self.name }
///     fn set_name(&mut self, name: String) { self.name = name; }
/// }
/// ```
#[proc_macro_attribute]
pub fn accessors(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "#[accessors] takes no arguments")
            .to_compile_error()
            .into();
    }
    let input = parse_macro_input!(item as ItemImpl);
    accessors::expand_accessors(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
