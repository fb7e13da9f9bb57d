//! Checks applied by `#[derive(Sanitize)]`.

use syn::{Data, DeriveInput, Fields, Meta, Result};

use crate::field::parse_field_format;

pub(crate) fn check_sanitize_target(input: &DeriveInput) -> Result<()> {
    for attr in &input.attrs {
        if attr.path().is_ident("mrclean") {
            let message = match &attr.meta {
                Meta::Path(_) => "#[mrclean] belongs on fields; the derive alone tags the struct",
                _ => "#[mrclean(...)] options are only supported on fields",
            };
            return Err(syn::Error::new_spanned(attr, message));
        }
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Sanitize` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Sanitize` can only be derived for structs",
            ));
        }
    };

    match fields {
        Fields::Named(named) => {
            for field in &named.named {
                parse_field_format(&field.attrs)?;
            }
        }
        Fields::Unnamed(unnamed) => {
            for field in &unnamed.unnamed {
                parse_field_format(&field.attrs)?;
            }
        }
        Fields::Unit => {}
    }

    Ok(())
}
