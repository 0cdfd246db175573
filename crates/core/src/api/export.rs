use crate::errors::CoreError;
use crate::models::entity::Resource;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// A downloaded CSV export, ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `{resource}_export.csv`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn new(resource: Resource, bytes: Vec<u8>) -> Self {
        Self {
            file_name: resource.export_file_name(),
            bytes,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Number of non-empty lines after the header row.
    pub fn data_rows(&self) -> usize {
        self.text()
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .count()
    }
}

/// Where an export ends up. In a browser this triggers a file download;
/// natively it is usually a directory on disk.
pub trait ExportSink: Send + Sync {
    fn deliver(&self, export: &CsvExport) -> Result<(), CoreError>;
}

/// Writes exports into a directory, one file per export, replacing any
/// previous file of the same name.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirectorySink {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, export: &CsvExport) -> PathBuf {
        self.dir.join(&export.file_name)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn deliver(&self, export: &CsvExport) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(export), &export.bytes)?;
        Ok(())
    }
}
