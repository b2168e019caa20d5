//! Recipe sources: the seam between the host's recipe-assembly lifecycle
//! and the ingestion pipeline.
//!
//! The host fires its "recipes are being assembled" phase once per reload
//! and hands each installed source the registry; a source contributes
//! whatever recipes it knows about and reports what happened.

use std::path::{Path, PathBuf};

use millwright_core::RecipeRegistry;

use crate::ingest::{IngestReport, ingest_dir};

/// Something that can contribute recipes during the assembly phase.
pub trait RecipeSource {
    fn assemble(&self, registry: &mut RecipeRegistry) -> IngestReport;
}

/// A file-backed recipe source: one pack file in one directory.
#[derive(Debug, Clone)]
pub struct PackSource {
    dir: PathBuf,
    base_name: String,
}

impl PackSource {
    /// A source reading `recipes.{json,ron,toml}` from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_name: "recipes".to_string(),
        }
    }

    /// Override the pack's base file name.
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecipeSource for PackSource {
    fn assemble(&self, registry: &mut RecipeRegistry) -> IngestReport {
        ingest_dir(registry, &self.dir, &self.base_name)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
