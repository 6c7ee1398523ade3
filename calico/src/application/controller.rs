use std::path::{Path, PathBuf};

use calico_core::{ArchiveRequest, BuildOptions, FileSelection, build};

/// Warning shown when an add would go past the selection ceiling.
pub const LIMIT_WARNING: &str = "You can only add up to 20 files.";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: usize,
    pub duplicates: usize,
    /// The batch hit the ceiling; the rest of it was dropped.
    pub limit_reached: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Error(String),
}

/// State behind the interactive front ends: what is selected, what the
/// archive will be called, and where it goes.
pub struct Controller {
    selection: FileSelection,
    output_name: String,
    output_dir: PathBuf,
    options: BuildOptions,
}

impl Controller {
    pub fn new(output_dir: PathBuf, output_name: String, options: BuildOptions) -> Self {
        Self {
            selection: FileSelection::new(),
            output_name,
            output_dir,
            options,
        }
    }

    pub fn add_files<I, P>(&mut self, paths: I) -> AddOutcome
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut outcome = AddOutcome::default();
        for path in paths {
            match self.selection.push(path) {
                Ok(true) => outcome.added += 1,
                Ok(false) => outcome.duplicates += 1,
                Err(_) => {
                    outcome.limit_reached = true;
                    break;
                }
            }
        }
        outcome
    }

    pub fn remove(&mut self, indices: &[usize]) -> Vec<PathBuf> {
        self.selection.remove_indices(indices)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn set_output_name(&mut self, name: impl Into<String>) {
        self.output_name = name.into();
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    /// Runs the builder on the current selection. Clears it only on success.
    pub fn create(&mut self) -> Outcome {
        if self.output_name.trim().is_empty() {
            return Outcome::Error("Please enter a name for the output file.".into());
        }
        if self.selection.is_empty() {
            return Outcome::Error("Please add at least one file.".into());
        }

        let request =
            ArchiveRequest::from_selection(&self.selection, &self.output_name, &self.output_dir);
        match build(&request, &self.options) {
            Ok(report) => {
                self.selection.clear();
                Outcome::Success(report.message())
            }
            Err(e) if e.is_io_failure() => Outcome::Error(format!("An error occurred: {e}")),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}
