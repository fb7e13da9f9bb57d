//! Finding markers in the crate's sources.
//!
//! The scanner starts at the crate root file, follows `mod name;` declarations
//! the way rustc resolves them (`name.rs`, `name/mod.rs`, or a `#[path]`
//! override) and descends into inline `mod name { ... }` blocks. Items inside
//! function bodies are not visited.
//!
//! `#[cfg]` is only evaluated for `test`, which is always false: a build
//! script runs once for both test and non-test builds, so generated code may
//! only name items that exist in the latter. Modules and items behind a
//! predicate that is false without `test` (`cfg(test)`, `cfg(all(test, ..))`)
//! are skipped, and their files need not exist. Every other predicate is
//! assumed to hold.

use std::{
    fs,
    path::{Path, PathBuf},
};

use mrclean::GenerationMode;
use quote::ToTokens;
use slog::{debug, info, o, Logger};
use syn::{
    ext::IdentExt, punctuated::Punctuated, Attribute, DeriveInput, Expr, ExprLit, Item, ItemMod,
    Lit, LitBool, Meta, Token,
};

use crate::{
    error::{Error, Result},
    metadata::SourceDeclaration,
    namespace::Namespace,
};

/// An item carrying `#[derive(PackageId)]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageMarker {
    /// Module the marker is declared in; generated files target it.
    pub namespace: Namespace,
    pub mode: GenerationMode,
    /// Name of the marked item.
    pub item: String,
    pub path: PathBuf,
}

/// Everything one scan found.
#[derive(Clone, Debug, Default)]
pub struct Round {
    /// In source order.
    pub package_markers: Vec<PackageMarker>,
    /// `#[derive(Sanitize)]` items in source order.
    pub declarations: Vec<SourceDeclaration>,
    /// Every file read.
    pub files: Vec<PathBuf>,
}

impl Round {
    /// The marker that decides mode and namespace: the first one found.
    pub fn package(&self) -> Option<&PackageMarker> {
        self.package_markers.first()
    }
}

#[derive(Clone, Debug)]
pub struct Scanner {
    logger: Logger,
}

impl Scanner {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Scans the crate whose root file (`lib.rs`, `main.rs`) is `root_file`.
    pub fn scan_crate(&self, root_file: &Path) -> Result<Round> {
        let logger = self.logger.new(o!("root" => root_file.display().to_string()));
        let mut walk = Walk {
            logger: &logger,
            round: Round::default(),
            follow_files: true,
        };
        let module_dir = root_file.parent().map(Path::to_path_buf).unwrap_or_default();
        walk.scan_file(root_file, &Namespace::root(), &module_dir)?;
        info!(logger, "scanned crate sources";
            "files" => walk.round.files.len(),
            "declarations" => walk.round.declarations.len(),
            "package_markers" => walk.round.package_markers.len());
        Ok(walk.round)
    }

    /// Scans one in-memory source file as module `namespace`.
    ///
    /// Out-of-line `mod name;` declarations are skipped.
    pub fn scan_source(&self, source: &str, namespace: &Namespace, path: &Path) -> Result<Round> {
        let mut walk = Walk {
            logger: &self.logger,
            round: Round::default(),
            follow_files: false,
        };
        let file = syn::parse_file(source).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        walk.round.files.push(path.to_path_buf());
        let module_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        walk.scan_items(&file.items, namespace, &module_dir, path, false)?;
        Ok(walk.round)
    }
}

struct Walk<'a> {
    logger: &'a Logger,
    round: Round,
    follow_files: bool,
}

impl Walk<'_> {
    fn scan_file(&mut self, path: &Path, namespace: &Namespace, module_dir: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|err| Error::io("read", path, err))?;
        let file = syn::parse_file(&source).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(self.logger, "parsed module file";
            "module" => %namespace, "file" => %path.display());
        self.round.files.push(path.to_path_buf());
        self.scan_items(&file.items, namespace, module_dir, path, false)
    }

    fn scan_items(
        &mut self,
        items: &[Item],
        namespace: &Namespace,
        module_dir: &Path,
        file: &Path,
        inline: bool,
    ) -> Result<()> {
        for item in items {
            if let Some(attrs) = scanned_attrs(item) {
                if excluded_outside_tests(attrs) {
                    debug!(self.logger, "skipping test-only item";
                        "module" => %namespace, "file" => %file.display());
                    continue;
                }
            }
            match item {
                Item::Mod(module) => self.scan_module(module, namespace, module_dir, file, inline)?,
                Item::Struct(data) => self.visit(item, &data.attrs, &data.ident, namespace, file)?,
                Item::Enum(data) => self.visit(item, &data.attrs, &data.ident, namespace, file)?,
                Item::Union(data) => self.visit(item, &data.attrs, &data.ident, namespace, file)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn scan_module(
        &mut self,
        module: &ItemMod,
        parent: &Namespace,
        module_dir: &Path,
        file: &Path,
        inline: bool,
    ) -> Result<()> {
        let namespace = parent.child(&module.ident);
        let dir_name = module.ident.unraw().to_string();
        let path_override = path_attribute(&module.attrs);

        if let Some((_, items)) = &module.content {
            let child_dir = module_dir.join(path_override.as_deref().unwrap_or(&dir_name));
            return self.scan_items(items, &namespace, &child_dir, file, true);
        }

        if !self.follow_files {
            debug!(self.logger, "skipping out-of-line module"; "module" => %namespace);
            return Ok(());
        }

        let candidates = match &path_override {
            Some(relative) => {
                let base = if inline {
                    module_dir.to_path_buf()
                } else {
                    file.parent().map(Path::to_path_buf).unwrap_or_default()
                };
                vec![base.join(relative)]
            }
            None => vec![
                module_dir.join(format!("{dir_name}.rs")),
                module_dir.join(&dir_name).join("mod.rs"),
            ],
        };

        let Some(found) = candidates.iter().find(|candidate| candidate.is_file()) else {
            return Err(Error::ModuleNotFound {
                module: namespace.to_string(),
                parent: file.to_path_buf(),
                candidates: candidates
                    .iter()
                    .map(|candidate| format!("`{}`", candidate.display()))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };

        let child_dir = if path_override.is_some() {
            found.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            module_dir.join(&dir_name)
        };
        self.scan_file(found, &namespace, &child_dir)
    }

    fn visit(
        &mut self,
        item: &Item,
        attrs: &[Attribute],
        ident: &syn::Ident,
        namespace: &Namespace,
        file: &Path,
    ) -> Result<()> {
        let derived = derived_names(attrs);

        if derived.iter().any(|name| name == "PackageId") {
            let debug = package_debug_flag(attrs).map_err(|message| Error::InvalidMarker {
                item: namespace.qualify(&ident.to_string()),
                path: file.to_path_buf(),
                message,
            })?;
            let marker = PackageMarker {
                namespace: namespace.clone(),
                mode: GenerationMode::from_debug_flag(debug),
                item: ident.to_string(),
                path: file.to_path_buf(),
            };
            info!(self.logger, "found package marker";
                "namespace" => %marker.namespace, "mode" => %marker.mode, "item" => &marker.item);
            self.round.package_markers.push(marker);
        }

        if derived.iter().any(|name| name == "Sanitize") {
            let input: DeriveInput =
                syn::parse2(item.to_token_stream()).map_err(|source| Error::Parse {
                    path: file.to_path_buf(),
                    source,
                })?;
            debug!(self.logger, "found sanitize target";
                "item" => namespace.qualify(&ident.to_string()), "file" => %file.display());
            self.round.declarations.push(SourceDeclaration {
                namespace: namespace.clone(),
                input,
                path: file.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Last path segment of every `#[derive(...)]` entry: `mrclean::Sanitize` yields `Sanitize`.
fn derived_names(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|path| path.segments.last().map(|segment| segment.ident.to_string()))
        .collect()
}

fn scanned_attrs(item: &Item) -> Option<&[Attribute]> {
    match item {
        Item::Mod(module) => Some(&module.attrs),
        Item::Struct(data) => Some(&data.attrs),
        Item::Enum(data) => Some(&data.attrs),
        Item::Union(data) => Some(&data.attrs),
        _ => None,
    }
}

/// Whether some `#[cfg(...)]` on the item is false when `test` is unset.
fn excluded_outside_tests(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .filter_map(|attr| attr.parse_args::<Meta>().ok())
        .any(|predicate| eval_without_test(&predicate) == Some(false))
}

/// Evaluates a cfg predicate with `test` unset. `None` when the outcome
/// depends on anything else.
fn eval_without_test(predicate: &Meta) -> Option<bool> {
    match predicate {
        Meta::Path(path) if path.is_ident("test") => Some(false),
        Meta::List(list) => {
            let nested = list
                .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
                .ok()?;
            let mut values = nested.iter().map(eval_without_test);
            if list.path.is_ident("not") {
                match (values.next(), values.next()) {
                    (Some(value), None) => value.map(|value| !value),
                    _ => None,
                }
            } else if list.path.is_ident("all") {
                values.try_fold(true, |known, value| match value {
                    Some(false) => Err(()),
                    Some(true) => Ok(known),
                    None => Ok(false),
                })
                .map_or(Some(false), |known| known.then_some(true))
            } else if list.path.is_ident("any") {
                values.try_fold(true, |known, value| match value {
                    Some(true) => Err(()),
                    Some(false) => Ok(known),
                    None => Ok(false),
                })
                .map_or(Some(true), |known| known.then_some(false))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// `#[path = "..."]` on a module.
fn path_attribute(attrs: &[Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| match &attr.meta {
        Meta::NameValue(nv) if nv.path.is_ident("path") => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) => Some(value.value()),
            _ => None,
        },
        _ => None,
    })
}

/// The `debug` flag of `#[package_id(debug = ...)]`.
fn package_debug_flag(attrs: &[Attribute]) -> Result<bool, String> {
    let mut debug = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("package_id")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("debug") {
                let value: LitBool = meta.value()?.parse()?;
                debug = Some(value.value);
                Ok(())
            } else {
                Err(meta.error("unknown package_id option; expected `debug`"))
            }
        })
        .map_err(|err| err.to_string())?;
    }
    debug.ok_or_else(|| "expected #[package_id(debug = true)] or #[package_id(debug = false)]".to_string())
}
