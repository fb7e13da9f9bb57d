//! Parsing of `#[mrclean(...)]` field attributes.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// How a field value is rendered in debug builds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldFormat {
    /// No annotation or `#[mrclean(display)]`.
    Display,
    /// `#[mrclean(debug)]`.
    Debug,
}

fn set_format(target: &mut Option<FieldFormat>, next: FieldFormat, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mrclean] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_format(attrs: &[Attribute]) -> Result<FieldFormat> {
    let mut format: Option<FieldFormat> = None;
    for attr in attrs {
        if !attr.path().is_ident("mrclean") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a format: #[mrclean(debug)] or #[mrclean(display)]",
                ));
            }
            Meta::List(list) => {
                let mut parsed = None;
                list.parse_nested_meta(|meta| {
                    let next = if meta.path.is_ident("debug") {
                        FieldFormat::Debug
                    } else if meta.path.is_ident("display") {
                        FieldFormat::Display
                    } else {
                        return Err(meta.error(format!(
                            "unknown field option `{}`; expected `debug` or `display`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )));
                    };
                    set_format(&mut parsed, next, meta.path.span())
                })?;
                let Some(next) = parsed else {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a format: #[mrclean(debug)] or #[mrclean(display)]",
                    ));
                };
                set_format(&mut format, next, attr.span())?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mrclean]",
                ));
            }
        }
    }

    Ok(format.unwrap_or(FieldFormat::Display))
}
