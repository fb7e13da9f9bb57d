//! Generated files and writing them out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    namespace::Namespace,
};

/// One generated source file, not yet written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedArtifact {
    pub namespace: Namespace,
    pub file_name: &'static str,
    pub contents: String,
}

impl GeneratedArtifact {
    /// Where the file lands under `out_dir`.
    pub fn path_in(&self, out_dir: &Path) -> PathBuf {
        self.namespace.dir_in(out_dir).join(self.file_name)
    }

    /// Writes the file, creating namespace directories as needed.
    ///
    /// Existing content is replaced; an unchanged file is left untouched so
    /// its modification time does not trigger rebuilds.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        self.stage(out_dir)?.commit()
    }

    /// Writes the contents next to the final path without replacing it.
    ///
    /// Nothing is staged when the file already holds these contents.
    pub fn stage(&self, out_dir: &Path) -> Result<StagedArtifact> {
        let path = self.path_in(out_dir);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|err| Error::io("create directory", dir, err))?;
        }
        if fs::read_to_string(&path).is_ok_and(|existing| existing == self.contents) {
            return Ok(StagedArtifact { staging: None, path });
        }
        let staging = path.with_extension("rs.tmp");
        fs::write(&staging, &self.contents).map_err(|err| Error::io("write", &staging, err))?;
        Ok(StagedArtifact {
            staging: Some(staging),
            path,
        })
    }
}

/// A written `<file>.rs.tmp` waiting to replace `<file>.rs`.
///
/// Dropping it without [`commit`](Self::commit) deletes the staged file.
#[derive(Debug)]
pub struct StagedArtifact {
    staging: Option<PathBuf>,
    path: PathBuf,
}

impl StagedArtifact {
    /// Final path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves the staged file into place.
    pub fn commit(mut self) -> Result<PathBuf> {
        let path = std::mem::take(&mut self.path);
        if let Some(staging) = self.staging.take() {
            if let Err(err) = fs::rename(&staging, &path) {
                let _ = fs::remove_file(&staging);
                return Err(Error::io("rename", staging, err));
            }
        }
        Ok(path)
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        if let Some(staging) = self.staging.take() {
            let _ = fs::remove_file(staging);
        }
    }
}
