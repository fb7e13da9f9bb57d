//! Runtime support for build-time generated sanitized strings.
//!
//! `mrclean-build` reads the structs you tag with `#[derive(Sanitize)]` and
//! writes a `sanitized_to_string` method for each of them into `OUT_DIR`. The
//! body depends on the [`GenerationMode`] of the build:
//!
//! - **Debug**: `Account(id = 7, email = a@b.com)`, every field in declaration order.
//! - **Release**: `Account@7ffd5c2a1b40`, the type name and the [`identity_hash`]
//!   of the instance. Field values never reach the output.
//!
//! Alongside the generated methods, a root placeholder (`SanitizedToString`) is
//! emitted for every namespace. Inherent methods win over trait methods during
//! method resolution, so tagged types use their generated body and everything
//! else lands on the placeholder. In release builds the placeholder panics with
//! [`NOT_GENERATED_MESSAGE`].
//!
//! What this crate does:
//! - defines the marker derives (re-exported from `mrclean-derive`)
//! - provides [`identity_hash`] for release bodies
//! - provides [`SanitizerTable`], an explicit lookup table for callers that
//!   dispatch on `TypeId` instead of method resolution
//! - provides [`include_sanitizations!`] and [`include_root_function!`]
//!
//! What it does not do:
//! - sanitize values at runtime
//! - validate field contents

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
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use mrclean_derive::{PackageId, Sanitize};

mod identity;
mod include;
mod mode;
mod table;

pub use identity::identity_hash;
pub use mode::{GenerationMode, ParseModeError};
pub use table::{NotGenerated, SanitizerTable};

/// Message of the release-mode placeholder and of [`NotGenerated`].
///
/// Seeing it at runtime means the type never went through the generator: it is
/// missing `#[derive(Sanitize)]`, or `build.rs` does not run `mrclean-build`.
pub const NOT_GENERATED_MESSAGE: &str =
    "No function generated! Make sure to annotate with @Sanitize";
