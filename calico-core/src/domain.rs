// calico_core/src/domain.rs
use std::fmt;
use std::path::{Path, PathBuf};

use crate::selection::FileSelection;

/// One archive creation attempt.
#[derive(Clone, Debug)]
pub struct ArchiveRequest {
    pub files: Vec<PathBuf>,
    pub output_name: String,
    pub output_dir: PathBuf,
}

impl ArchiveRequest {
    pub fn new<I, P>(
        files: I,
        output_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            output_name: output_name.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_selection(selection: &FileSelection, output_name: &str, output_dir: &Path) -> Self {
        Self::new(selection.iter().cloned(), output_name, output_dir)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing on disk at that path when the build ran.
    Missing,
    /// Exists, but is not a regular file (directory, socket, ...).
    NotAFile,
    /// An earlier input already claimed the same base name.
    DuplicateName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Missing => "file not found",
            SkipReason::NotAFile => "not a regular file",
            SkipReason::DuplicateName => "duplicate name in archive",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct SkippedInput {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// What a successful build produced.
#[derive(Clone, Debug)]
pub struct BuildReport {
    pub archive_path: PathBuf,
    pub file_name: String,
    pub output_dir: PathBuf,
    /// Entry names, in archive order.
    pub included: Vec<String>,
    pub skipped: Vec<SkippedInput>,
}

impl BuildReport {
    pub fn message(&self) -> String {
        format!(
            "Successfully created {} containing {} files in the '{}' folder.",
            self.file_name,
            self.included.len(),
            self.output_dir.display()
        )
    }
}

#[derive(Clone, Debug)]
pub struct EntryRow {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub method: zip::CompressionMethod,
}
