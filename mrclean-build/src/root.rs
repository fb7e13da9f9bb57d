//! The root placeholder task.
//!
//! Produces exactly one `root_sanitize_function.rs` per namespace, whatever
//! the sources contain.

use std::path::{Path, PathBuf};

use mrclean::GenerationMode;

use crate::{
    artifact::GeneratedArtifact,
    error::{Error, Result},
    namespace::Namespace,
    template::root_function_file,
    ROOT_FILE_NAME,
};

/// The root placeholder for `namespace`.
pub fn root_artifact(namespace: &Namespace, mode: GenerationMode) -> GeneratedArtifact {
    GeneratedArtifact {
        namespace: namespace.clone(),
        file_name: ROOT_FILE_NAME,
        contents: root_function_file(mode),
    }
}

/// Writes the root placeholder for `namespace` under `out_dir`.
pub fn emit_root(out_dir: &Path, namespace: &Namespace, mode: GenerationMode) -> Result<PathBuf> {
    root_artifact(namespace, mode).write_to(out_dir)
}

/// Standalone task for the root placeholder.
///
/// All three inputs are required. A missing one fails the task before
/// anything is written.
///
/// ```no_run
/// let task = mrclean_build::RootFunctions {
///     out_dir: Some(std::env::var("OUT_DIR").unwrap().into()),
///     package_name: Some("user".to_string()),
///     is_debug: Some(cfg!(debug_assertions)),
/// };
/// task.run().unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct RootFunctions {
    pub out_dir: Option<PathBuf>,
    pub package_name: Option<String>,
    pub is_debug: Option<bool>,
}

impl RootFunctions {
    pub fn run(&self) -> Result<PathBuf> {
        let out_dir = self
            .out_dir
            .as_deref()
            .ok_or(Error::MissingConfig("output directory"))?;
        let package_name = self
            .package_name
            .as_deref()
            .ok_or(Error::MissingConfig("package name"))?;
        let is_debug = self
            .is_debug
            .ok_or(Error::MissingConfig("debug flag"))?;

        let namespace = Namespace::parse(package_name)?;
        emit_root(out_dir, &namespace, GenerationMode::from_debug_flag(is_debug))
    }
}
