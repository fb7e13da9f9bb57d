//! One metadata-driven generation pass.

use mrclean::GenerationMode;

use crate::{
    artifact::GeneratedArtifact,
    metadata::{MetadataError, MetadataReader},
    namespace::Namespace,
    template::sanitizations_file,
    SANITIZATIONS_FILE_NAME,
};

/// Inputs shared by every declaration of a pass.
#[derive(Clone, Debug)]
pub struct SanitizePass {
    pub mode: GenerationMode,
    /// Namespace the artifact is written under.
    pub namespace: Namespace,
    /// Path generated code uses to reach the `mrclean` crate.
    pub runtime: String,
}

impl SanitizePass {
    pub fn new(mode: GenerationMode, namespace: Namespace) -> Self {
        Self {
            mode,
            namespace,
            runtime: String::from("::mrclean"),
        }
    }

    #[must_use]
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Resolves every declaration, then renders them into one artifact.
    ///
    /// Returns `Ok(None)` when there is nothing to generate. The first
    /// declaration that fails to resolve fails the whole pass.
    pub fn run<R: MetadataReader>(
        &self,
        reader: &R,
        declarations: &[R::Declaration],
    ) -> Result<Option<GeneratedArtifact>, MetadataError> {
        let resolved = declarations
            .iter()
            .map(|declaration| reader.resolve(declaration))
            .collect::<Result<Vec<_>, _>>()?;

        if resolved.is_empty() {
            return Ok(None);
        }

        Ok(Some(GeneratedArtifact {
            namespace: self.namespace.clone(),
            file_name: SANITIZATIONS_FILE_NAME,
            contents: sanitizations_file(&resolved, self.mode, &self.runtime),
        }))
    }
}
