//! Parsing of the `#[package_id(debug = ...)]` attribute.

use proc_macro2::Ident;
use syn::{Attribute, LitBool, Meta, Result};

/// Returns the `debug` flag of the item's single `#[package_id(...)]`.
pub(crate) fn parse_package_id(ident: &Ident, attrs: &[Attribute]) -> Result<bool> {
    let mut debug: Option<bool> = None;

    for attr in attrs {
        if !attr.path().is_ident("package_id") {
            continue;
        }

        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected #[package_id(debug = true)] or #[package_id(debug = false)]",
            ));
        };

        list.parse_nested_meta(|meta| {
            if !meta.path.is_ident("debug") {
                return Err(meta.error(format!(
                    "unknown package_id option `{}`; expected `debug`",
                    meta.path
                        .get_ident()
                        .map_or_else(|| "?".to_string(), ToString::to_string)
                )));
            }
            if debug.is_some() {
                return Err(meta.error("`debug` specified more than once"));
            }
            let value: LitBool = meta.value()?.parse()?;
            debug = Some(value.value);
            Ok(())
        })?;
    }

    debug.ok_or_else(|| {
        syn::Error::new(
            ident.span(),
            "`PackageId` requires #[package_id(debug = true)] or #[package_id(debug = false)]",
        )
    })
}
