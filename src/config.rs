//! Session configuration
//!
//! Where output files go and how they are encoded. Built from command-line
//! flags by the binary; nothing is read from or written to disk.

use std::path::{Path, PathBuf};

use crate::engine::{ExportFormat, OUTPUT_EXTENSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory receiving every output file (default: current directory)
    pub output_dir: PathBuf,
    /// Encoding of output files
    pub export: ExportFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export: ExportFormat::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_export(mut self, export: ExportFormat) -> Self {
        self.export = export;
        self
    }

    /// Full path of the output file with the given stem
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", stem, OUTPUT_EXTENSION))
    }
}
