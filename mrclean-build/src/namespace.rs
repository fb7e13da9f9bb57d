//! Module paths that generated files are written for.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use syn::ext::IdentExt;

use crate::error::{Error, Result};

/// A module path inside the crate being built, relative to the crate root.
///
/// `user::accounts` and `crate::user::accounts` parse to the same namespace.
/// The empty path is the crate root.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a `::`-separated module path.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_prefix("crate").map_or(trimmed, |rest| {
            if rest.is_empty() {
                rest
            } else {
                rest.strip_prefix("::").unwrap_or(trimmed)
            }
        });
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for segment in trimmed.split("::") {
            let ident = syn::parse_str::<syn::Ident>(segment.trim()).map_err(|_| {
                Error::InvalidNamespace {
                    namespace: path.to_string(),
                    message: format!("`{segment}` is not a module name"),
                }
            })?;
            segments.push(ident.to_string());
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The namespace of module `name` declared inside this one.
    #[must_use]
    pub fn child(&self, name: &syn::Ident) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Path of `item` relative to the crate root, e.g. `user::Account`.
    pub fn qualify(&self, item: &str) -> String {
        if self.is_root() {
            item.to_string()
        } else {
            format!("{self}::{item}")
        }
    }

    /// Directory for this namespace's generated files under `base`.
    ///
    /// Raw identifiers lose their `r#` prefix: `r#type` maps to `type/`.
    pub fn dir_in(&self, base: &Path) -> PathBuf {
        let mut dir = base.to_path_buf();
        for segment in &self.segments {
            dir.push(segment.strip_prefix("r#").unwrap_or(segment));
        }
        dir
    }

    /// The directory form accepted by `mrclean::include_sanitizations!`.
    pub fn include_path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| {
                syn::parse_str::<syn::Ident>(segment)
                    .map_or_else(|_| segment.clone(), |ident| ident.unraw().to_string())
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("crate");
        }
        f.write_str(&self.segments.join("::"))
    }
}
