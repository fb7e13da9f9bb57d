//! Marker derives for `mrclean`.
//!
//! Code generation happens in `mrclean-build`, from `build.rs`, by reading the
//! crate's sources. The derives here only make the markers legal Rust and
//! reject misuse early, with spans pointing at the offending tokens:
//!
//! - `#[derive(Sanitize)]` tags a struct for generation and accepts
//!   `#[mrclean(debug)]` / `#[mrclean(display)]` on its fields.
//! - `#[derive(PackageId)]` with `#[package_id(debug = <bool>)]` marks the module
//!   generated functions are written for, and the build variant.
//!
//! Neither derive emits any items.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use syn::{parse_macro_input, DeriveInput, Result};

mod field;
mod package;
mod sanitize;

use package::parse_package_id;
use sanitize::check_sanitize_target;

/// Tags a struct for `sanitized_to_string` generation.
///
/// # Field Attributes
///
/// - **No annotation**: the value is rendered with `Display` in debug builds.
/// - `#[mrclean(debug)]`: the value is rendered with `Debug`. Use this for
///   `Option`, collections, and other types without a `Display` impl.
/// - `#[mrclean(display)]`: explicit form of the default.
///
/// Release builds never render field values, so the attributes only matter for
/// debug builds.
///
/// Enums and unions are rejected: they have no fixed list of stored fields.
#[proc_macro_derive(Sanitize, attributes(mrclean))]
pub fn derive_sanitize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_sanitize(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Marks the module that generated functions are written for.
///
/// ```ignore
/// #[derive(mrclean::PackageId)]
/// #[package_id(debug = true)]
/// struct SanitizePackage;
/// ```
///
/// `debug = true` selects field-revealing bodies; `debug = false` selects
/// identity-hash bodies. One marker per crate; `mrclean-build` ignores extra
/// ones with a warning.
#[proc_macro_derive(PackageId, attributes(package_id))]
pub fn derive_package_id(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_package_id(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand_sanitize(input: &DeriveInput) -> Result<TokenStream> {
    check_sanitize_target(input)?;
    Ok(TokenStream::new())
}

fn expand_package_id(input: &DeriveInput) -> Result<TokenStream> {
    parse_package_id(&input.ident, &input.attrs)?;
    Ok(TokenStream::new())
}
