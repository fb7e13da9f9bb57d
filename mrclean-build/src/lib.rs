//! Build-script generator for `mrclean`.
//!
//! Call it from `build.rs`:
//!
//! ```no_run
//! fn main() -> Result<(), mrclean_build::Error> {
//!     mrclean_build::configure().generate()?;
//!     Ok(())
//! }
//! ```
//!
//! A generation run:
//! - scans the crate's sources with `syn`, following `mod` declarations, for
//!   structs tagged `#[derive(Sanitize)]` and the `#[derive(PackageId)]` marker
//! - writes the root placeholder (`root_sanitize_function.rs`) for the marker's
//!   namespace, always
//! - writes `sanitizations.rs` with one `sanitized_to_string` per tagged struct,
//!   only when there is at least one
//!
//! Output lands in `$OUT_DIR/mrclean/<namespace as directories>/`; pull it in
//! with `mrclean::include_root_function!` and `mrclean::include_sanitizations!`.
//!
//! Each piece is usable on its own: [`RootFunctions`] is the standalone
//! placeholder task, [`SanitizePass`] runs a pass over any [`MetadataReader`],
//! and [`template`] renders text without touching the filesystem.

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
    clippy::redundant_pub_crate,
    clippy::result_large_err
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod artifact;
mod builder;
mod declaration;
mod error;
mod metadata;
mod namespace;
mod pass;
mod root;
mod scan;
pub mod template;

pub use artifact::{GeneratedArtifact, StagedArtifact};
pub use builder::{configure, Builder, GenerationReport};
pub use declaration::{FieldFormat, FieldSpec, ReceiverGenerics, TargetDeclaration};
pub use error::{Error, Result};
pub use metadata::{MetadataError, MetadataReader, SourceDeclaration, SynMetadataReader};
pub use mrclean::GenerationMode;
pub use namespace::Namespace;
pub use pass::SanitizePass;
pub use root::{emit_root, root_artifact, RootFunctions};
pub use scan::{PackageMarker, Round, Scanner};

/// File name of the root placeholder artifact.
pub const ROOT_FILE_NAME: &str = "root_sanitize_function.rs";

/// File name of the per-pass artifact.
pub const SANITIZATIONS_FILE_NAME: &str = "sanitizations.rs";

/// Sub-directory of `OUT_DIR` the builder writes into by default.
pub const OUT_SUBDIR: &str = "mrclean";
