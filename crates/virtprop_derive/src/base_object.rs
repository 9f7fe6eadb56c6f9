// #[derive(BaseObject)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Result};

/// Field-level options from `#[property(...)]`.
#[derive(Default)]
struct PropertyOptions {
    skip: bool,
    rename: Option<String>,
}

pub fn expand_base_object(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let class_name = class_name(&input.attrs)?.unwrap_or_else(|| name.to_string());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "BaseObject requires named fields; tuple fields cannot be addressed as properties",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "BaseObject can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "BaseObject can only be derived for structs",
            ));
        }
    };

    let mut keys = Vec::new();
    let mut registrations = Vec::new();
    for field in fields {
        let options = property_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let key = options.rename.unwrap_or_else(|| ident.to_string());
        registrations.push(quote! {
            table.insert_field(#key, |this: &Self| ::virtprop::ToValue::to_value(&this.#ident));
        });
        keys.push(key);
    }

    Ok(quote! {
        impl #impl_generics ::virtprop::ClassInfo for #name #ty_generics #where_clause {
            fn class_name() -> &'static str {
                #class_name
            }

            fn field_names() -> ::std::vec::Vec<&'static str> {
                ::std::vec![#(#keys),*]
            }

            fn register_fields(table: &mut ::virtprop::PropertyTable<Self>) {
                let _ = &table;
                #(#registrations)*
            }
        }
    })
}

/// Read `#[base_object(name = "...")]`.
fn class_name(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut name = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("base_object")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "class name cannot be empty"));
                }
                name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported base_object option; expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

/// Read `#[property(skip)]` / `#[property(rename = "...")]`.
fn property_options(attrs: &[Attribute]) -> Result<PropertyOptions> {
    let mut options = PropertyOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("property")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported property option; expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    if options.skip && options.rename.is_some() {
        if let Some(attr) = attrs.iter().find(|a| a.path().is_ident("property")) {
            return Err(syn::Error::new_spanned(attr, "`skip` and `rename` cannot be combined"));
        }
    }
    Ok(options)
}
