//! Artifact emission
//!
//! Writes rendered artifacts into an output directory, plus a JSON manifest
//! describing what was generated. Emission is idempotent: identical input
//! produces byte-identical files.

use crate::error::GenError;
use crate::render::AccessorArtifact;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the emitted manifest.
pub const MANIFEST_FILE: &str = "periscope-manifest.json";

#[derive(Serialize)]
struct Manifest<'a> {
    artifacts: &'a [AccessorArtifact],
}

/// Writes accessor artifacts and the manifest to disk.
pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    /// Create an emitter rooted at `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write one artifact, returning its path.
    pub fn emit(&self, artifact: &AccessorArtifact) -> Result<PathBuf, GenError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents)?;
        Ok(path)
    }

    /// Write every artifact plus the manifest, returning the artifact paths.
    pub fn emit_all(&self, artifacts: &[AccessorArtifact]) -> Result<Vec<PathBuf>, GenError> {
        let mut paths = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            paths.push(self.emit(artifact)?);
        }
        let manifest = serde_json::to_string_pretty(&Manifest { artifacts })?;
        fs::create_dir_all(&self.out_dir)?;
        fs::write(self.out_dir.join(MANIFEST_FILE), manifest)?;
        Ok(paths)
    }

    /// The emitter's output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
