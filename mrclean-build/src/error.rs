//! Errors of the build-script generator.
//!
//! Every error aborts the whole run; nothing is written for a run that fails
//! before its write step.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::metadata::MetadataError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input was not provided and has no default.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// A tagged declaration could not be resolved.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("failed to {action} `{}`", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("file for module `{module}` (declared in `{}`) not found; tried {candidates}", .parent.display())]
    ModuleNotFound {
        module: String,
        parent: PathBuf,
        candidates: String,
    },

    /// A `PackageId` marker whose `#[package_id(...)]` attribute is malformed.
    #[error("invalid marker on `{item}` in `{}`: {message}", .path.display())]
    InvalidMarker {
        item: String,
        path: PathBuf,
        message: String,
    },

    #[error("invalid namespace `{namespace}`: {message}")]
    InvalidNamespace { namespace: String, message: String },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
