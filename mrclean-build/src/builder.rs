//! `build.rs` entry point.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use mrclean::GenerationMode;
use proc_macro_crate::{crate_name, FoundCrate};
use slog::{info, o, warn, Logger};

use crate::{
    error::{Error, Result},
    metadata::SynMetadataReader,
    namespace::Namespace,
    pass::SanitizePass,
    root::root_artifact,
    scan::Scanner,
    OUT_SUBDIR, SANITIZATIONS_FILE_NAME,
};

/// Returns a [`Builder`] with cargo-derived defaults.
pub fn configure() -> Builder {
    Builder::default()
}

/// Configures and runs generation for the crate being built.
///
/// Unset options fall back to cargo's build-script environment:
///
/// | Option | Default |
/// |--------|---------|
/// | source root | `$CARGO_MANIFEST_DIR/src/lib.rs`, else `src/main.rs` |
/// | output directory | `$OUT_DIR/mrclean` |
/// | mode | the `PackageId` marker's `debug` flag |
/// | namespace | the `PackageId` marker's module |
/// | runtime path | the `mrclean` dependency as named in `Cargo.toml` |
#[derive(Clone, Debug)]
pub struct Builder {
    source_root: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    mode: Option<GenerationMode>,
    namespace: Option<String>,
    runtime: Option<String>,
    emit_rerun_if_changed: bool,
    logger: Logger,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            source_root: None,
            out_dir: None,
            mode: None,
            namespace: None,
            runtime: None,
            emit_rerun_if_changed: true,
            logger: Logger::root(slog::Discard, o!()),
        }
    }
}

/// What a successful run wrote.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationReport {
    pub mode: GenerationMode,
    pub namespace: Namespace,
    pub root_function: PathBuf,
    /// `None` when no struct is tagged.
    pub sanitizations: Option<PathBuf>,
    pub generated_functions: usize,
}

impl Builder {
    /// Crate root file to start scanning from.
    #[must_use]
    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = Some(path.into());
        self
    }

    #[must_use]
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Overrides the mode of the `PackageId` marker.
    #[must_use]
    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Takes the mode from cargo's `PROFILE`, when it names one.
    #[must_use]
    pub fn mode_from_profile(mut self) -> Self {
        if let Some(mode) = env::var("PROFILE")
            .ok()
            .and_then(|profile| GenerationMode::from_profile(&profile))
        {
            self.mode = Some(mode);
        }
        self
    }

    /// Overrides the namespace of the `PackageId` marker, e.g. `user::accounts`.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Path generated code uses to reach the runtime crate, e.g. `::mrclean`.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime = Some(path.into());
        self
    }

    /// Whether to print `cargo:rerun-if-changed` for every scanned file.
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.emit_rerun_if_changed = enabled;
        self
    }

    #[must_use]
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Scans the sources and writes the root placeholder and, when any struct
    /// is tagged, `sanitizations.rs`.
    ///
    /// Every declaration is resolved and both files are staged before the
    /// root file is moved into place, followed by `sanitizations.rs`.
    pub fn generate(self) -> Result<GenerationReport> {
        let source_root = match self.source_root {
            Some(path) => path,
            None => default_source_root()?,
        };
        let out_dir = match self.out_dir {
            Some(path) => path,
            None => env::var_os("OUT_DIR")
                .map(|dir| PathBuf::from(dir).join(OUT_SUBDIR))
                .ok_or(Error::MissingConfig("output directory"))?,
        };
        let logger = self.logger.new(o!("out_dir" => out_dir.display().to_string()));

        let round = Scanner::new(logger.clone()).scan_crate(&source_root)?;
        if self.emit_rerun_if_changed {
            for file in &round.files {
                println!("cargo:rerun-if-changed={}", file.display());
            }
        }

        let marker = round.package();
        for extra in round.package_markers.iter().skip(1) {
            warn!(logger, "ignoring additional package marker";
                "item" => &extra.item, "namespace" => %extra.namespace);
        }

        let mode = self
            .mode
            .or_else(|| marker.map(|marker| marker.mode))
            .ok_or(Error::MissingConfig("generation mode"))?;
        let namespace = match &self.namespace {
            Some(namespace) => Namespace::parse(namespace)?,
            None => marker
                .map(|marker| marker.namespace.clone())
                .ok_or(Error::MissingConfig("package name"))?,
        };
        let runtime = self.runtime.unwrap_or_else(runtime_root);

        let pass = SanitizePass::new(mode, namespace.clone()).with_runtime(runtime);
        let artifact = pass.run(&SynMetadataReader, &round.declarations)?;

        // Both files are staged before either is moved into place. The root
        // file is committed first.
        let staged_root = root_artifact(&namespace, mode).stage(&out_dir)?;
        let staged_sanitizations = artifact
            .as_ref()
            .map(|artifact| artifact.stage(&out_dir))
            .transpose()?;

        let root_function = staged_root.commit()?;
        info!(logger, "wrote root function";
            "mode" => %mode, "namespace" => %namespace, "path" => %root_function.display());

        let sanitizations = match staged_sanitizations {
            Some(staged) => {
                let path = staged.commit()?;
                info!(logger, "wrote sanitized functions";
                    "count" => round.declarations.len(), "path" => %path.display());
                Some(path)
            }
            None => {
                remove_stale(&namespace.dir_in(&out_dir).join(SANITIZATIONS_FILE_NAME), &logger)?;
                info!(logger, "no sanitize targets found");
                None
            }
        };

        Ok(GenerationReport {
            mode,
            namespace,
            root_function,
            generated_functions: if sanitizations.is_some() {
                round.declarations.len()
            } else {
                0
            },
            sanitizations,
        })
    }
}

fn default_source_root() -> Result<PathBuf> {
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .ok_or(Error::MissingConfig("source root"))?;
    let src = manifest_dir.join("src");
    let lib = src.join("lib.rs");
    if lib.is_file() {
        return Ok(lib);
    }
    let main = src.join("main.rs");
    if main.is_file() {
        return Ok(main);
    }
    Err(Error::MissingConfig("source root"))
}

/// Path of the `mrclean` crate as the crate being built names it.
fn runtime_root() -> String {
    match crate_name("mrclean") {
        Ok(FoundCrate::Itself) => String::from("crate"),
        Ok(FoundCrate::Name(name)) => format!("::{name}"),
        Err(_) => String::from("::mrclean"),
    }
}

/// Removes a `sanitizations.rs` left by an earlier run that had tagged structs.
fn remove_stale(path: &Path, logger: &Logger) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    fs::remove_file(path).map_err(|err| Error::io("remove", path, err))?;
    info!(logger, "removed stale sanitizations"; "path" => %path.display());
    Ok(())
}
