// #[accessors] attribute implementation
//
// Scans an inherent impl block for `get_*` / `set_*` methods and generates the
// `virtprop::Accessors` registration for them.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Receiver, Result, ReturnType, Type};
use virtprop_core::naming::{AccessorKind, accessor_from_method};

/// Marker attribute that excludes a method from registration.
const ACCESSOR_ATTR: &str = "accessor";

/// Expands the #[accessors] attribute macro.
///
/// Input: inherent impl block
/// Output: the same impl block + `impl virtprop::Accessors`
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[accessors]
/// impl User {
///     fn get_name(&self) -> &str { &self.name }
///     fn set_name(&mut self, name: String) { self.name = name; }
/// }
///
/// // Output:
/// impl User { /* unchanged */ }
///
/// impl virtprop::Accessors for User {
///     fn register_accessors(table: &mut virtprop::PropertyTable<Self>) {
///         table.insert_getter("getName", |this: &Self| virtprop::ToValue::to_value(&Self::get_name(this)));
///         table.insert_setter("setName", |this: &mut Self, value: virtprop::Value| {
///             virtprop::table::invoke_setter(value, |arg: String| Self::set_name(this, arg))
///         });
///     }
/// }
/// ```
pub fn expand_accessors(mut input: ItemImpl) -> Result<TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[accessors] must be placed on an inherent impl block, not a trait impl",
        ));
    }

    let mut registrations = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if take_skip_marker(method)? {
            continue;
        }
        let method_name = method.sig.ident.to_string();
        let Some((kind, ident)) = accessor_from_method(&method_name) else {
            continue;
        };
        let registration = match kind {
            AccessorKind::Getter => getter_registration(method, &ident)?,
            AccessorKind::Setter => setter_registration(method, &ident)?,
        };
        registrations.push(registration);
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::virtprop::Accessors for #self_ty #where_clause {
            fn register_accessors(table: &mut ::virtprop::PropertyTable<Self>) {
                let _ = &table;
                #(#registrations)*
            }
        }
    })
}

/// Remove `#[accessor(skip)]` from the method and report whether it was present.
///
/// The marker is not a real attribute, so it must not survive into the emitted impl block.
fn take_skip_marker(method: &mut ImplItemFn) -> Result<bool> {
    let mut skip = false;
    let mut error = None;
    method.attrs.retain(|attr| {
        if !attr.path().is_ident(ACCESSOR_ATTR) {
            return true;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported accessor option; expected `skip`"))
            }
        });
        if let Err(e) = parsed {
            error.get_or_insert(e);
        }
        false
    });
    match error {
        Some(e) => Err(e),
        None => Ok(skip),
    }
}

fn getter_registration(method: &ImplItemFn, ident: &str) -> Result<TokenStream> {
    let sig = &method.sig;
    let name = &sig.ident;
    reject_generics(method)?;

    match sig.inputs.first() {
        Some(FnArg::Receiver(recv)) if borrowed_self(recv) == Some(false) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                format!("getter `{name}` must take `&self`"),
            ));
        }
    }
    if sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            format!("getter `{name}` must not take arguments besides `&self`"),
        ));
    }
    if is_unit_return(&sig.output) {
        return Err(syn::Error::new_spanned(
            sig,
            format!("getter `{name}` must return a value"),
        ));
    }

    Ok(quote! {
        table.insert_getter(#ident, |this: &Self| ::virtprop::ToValue::to_value(&Self::#name(this)));
    })
}

fn setter_registration(method: &ImplItemFn, ident: &str) -> Result<TokenStream> {
    let sig = &method.sig;
    let name = &sig.ident;
    reject_generics(method)?;

    match sig.inputs.first() {
        Some(FnArg::Receiver(recv)) if borrowed_self(recv) == Some(true) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                format!("setter `{name}` must take `&mut self`"),
            ));
        }
    }
    let arg_ty = match (sig.inputs.len(), sig.inputs.iter().nth(1)) {
        (2, Some(FnArg::Typed(arg))) => &arg.ty,
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                format!("setter `{name}` must take exactly one value besides `&mut self`"),
            ));
        }
    };
    if let Type::Reference(reference) = arg_ty.as_ref() {
        return Err(syn::Error::new_spanned(
            reference,
            format!("setter `{name}` must take its value by ownership, not by reference"),
        ));
    }

    Ok(quote! {
        table.insert_setter(#ident, |this: &mut Self, value: ::virtprop::Value| {
            ::virtprop::table::invoke_setter(value, |arg: #arg_ty| Self::#name(this, arg))
        });
    })
}

/// `Some(mutable)` when the receiver borrows `Self`, in shorthand (`&self`) or typed (`self: &Self`) form.
///
/// syn fills `Receiver::ty` with the desugared type for the shorthand forms, so one check covers both.
fn borrowed_self(recv: &Receiver) -> Option<bool> {
    match recv.ty.as_ref() {
        Type::Reference(reference) => match reference.elem.as_ref() {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self") => {
                Some(reference.mutability.is_some())
            }
            _ => None,
        },
        _ => None,
    }
}

fn reject_generics(method: &ImplItemFn) -> Result<()> {
    if method.sig.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &method.sig.generics,
            format!(
                "accessor `{}` cannot be generic; mark it `#[accessor(skip)]` to keep it out of the table",
                method.sig.ident
            ),
        ))
    }
}

fn is_unit_return(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(ty.as_ref(), Type::Tuple(t) if t.elems.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: ItemImpl) -> String {
        expand_accessors(input).expect("expansion succeeds").to_string()
    }

    #[test]
    fn registers_getters_and_setters_under_camel_case_identifiers() {
        let out = expand(parse_quote! {
            impl User {
                fn get_name(&self) -> &str { &self.name }
                fn set_name(&mut self, name: String) { self.name = name; }
                fn get_read_only(&self) -> &'static str { "can't write this" }
                fn helper(&self) -> i64 { 1 }
            }
        });
        assert!(out.contains(r#"insert_getter ("getName""#), "{out}");
        assert!(out.contains(r#"insert_setter ("setName""#), "{out}");
        assert!(out.contains(r#"insert_getter ("getReadOnly""#), "{out}");
        assert!(!out.contains("helper (this"), "{out}");
        assert!(out.contains("impl :: virtprop :: Accessors for User"), "{out}");
    }

    #[test]
    fn typed_receivers_are_accepted() {
        let out = expand(parse_quote! {
            impl User {
                fn get_name(self: &Self) -> &str { &self.name }
                fn set_name(self: &mut Self, name: String) { self.name = name; }
            }
        });
        assert!(out.contains(r#"insert_getter ("getName""#), "{out}");
        assert!(out.contains(r#"insert_setter ("setName""#), "{out}");

        let err = expand_accessors(parse_quote! {
            impl User { fn get_name(self: Box<Self>) -> String { self.name } }
        })
        .err()
        .expect("boxed receiver rejected");
        assert!(err.to_string().contains("must take `&self`"));
    }

    #[test]
    fn skip_marker_is_stripped_from_output() {
        let out = expand(parse_quote! {
            impl Repo {
                #[accessor(skip)]
                fn get_by_id(&self, id: i64) -> Option<i64> { Some(id) }
            }
        });
        assert!(!out.contains("accessor (skip)"), "{out}");
        assert!(!out.contains("insert_getter"), "{out}");
        assert!(out.contains("fn get_by_id"), "{out}");
    }

    #[test]
    fn malformed_getters_are_rejected() {
        let err = expand_accessors(parse_quote! {
            impl Repo { fn get_by_id(&self, id: i64) -> i64 { id } }
        })
        .err()
        .expect("extra argument rejected");
        assert!(err.to_string().contains("must not take arguments"));

        let err = expand_accessors(parse_quote! {
            impl Repo { fn get_x(&mut self) -> i64 { 1 } }
        })
        .err()
        .expect("&mut getter rejected");
        assert!(err.to_string().contains("must take `&self`"));

        let err = expand_accessors(parse_quote! {
            impl Repo { fn get_x(&self) {} }
        })
        .err()
        .expect("unit getter rejected");
        assert!(err.to_string().contains("must return a value"));
    }

    #[test]
    fn malformed_setters_are_rejected() {
        let err = expand_accessors(parse_quote! {
            impl Repo { fn set_x(&self, x: i64) {} }
        })
        .err()
        .expect("&self setter rejected");
        assert!(err.to_string().contains("must take `&mut self`"));

        let err = expand_accessors(parse_quote! {
            impl Repo { fn set_x(&mut self, x: &str) {} }
        })
        .err()
        .expect("borrowed argument rejected");
        assert!(err.to_string().contains("by ownership"));

        let err = expand_accessors(parse_quote! {
            impl Repo { fn set_x(&mut self) {} }
        })
        .err()
        .expect("missing argument rejected");
        assert!(err.to_string().contains("exactly one value"));
    }

    #[test]
    fn trait_impls_are_rejected() {
        let err = expand_accessors(parse_quote! {
            impl Display for User {}
        })
        .err()
        .expect("trait impl rejected");
        assert!(err.to_string().contains("inherent impl block"));
    }
}
