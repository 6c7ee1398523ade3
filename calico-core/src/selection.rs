use std::path::{Path, PathBuf};

use crate::error::{CalicoError, Result};
use crate::policy::MAX_FILES;

/// Ordered, duplicate-free list of paths picked by the user.
#[derive(Clone, Debug, Default)]
pub struct FileSelection {
    paths: Vec<PathBuf>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path`. `Ok(false)` when it is already selected.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> Result<bool> {
        let path = path.into();
        if self.contains(&path) {
            return Ok(false);
        }
        if self.paths.len() >= MAX_FILES {
            return Err(CalicoError::LimitExceeded {
                count: self.paths.len() + 1,
                max: MAX_FILES,
            });
        }
        self.paths.push(path);
        Ok(true)
    }

    /// Removes the entries at `indices`, highest first. Out-of-range indices are ignored.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<PathBuf> {
        let mut idx: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.paths.len())
            .collect();
        idx.sort_unstable();
        idx.dedup();
        idx.into_iter()
            .rev()
            .map(|i| self.paths.remove(i))
            .collect()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.paths.len() >= MAX_FILES
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl<'a> IntoIterator for &'a FileSelection {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
