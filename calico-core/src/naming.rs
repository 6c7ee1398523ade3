use std::path::{Path, PathBuf};

use crate::error::{CalicoError, Result};

pub const SUFFIX: &str = ".calico";
/// Extension of the in-progress file before it is published.
pub const TEMP_SUFFIX: &str = ".zip";

/// Trims the user-entered name and appends `.calico` unless already present.
pub fn normalize_output_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CalicoError::EmptyInput(
            "Please enter a name for the output file.",
        ));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(CalicoError::InvalidName(name.to_string()));
    }
    if name.ends_with(SUFFIX) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{SUFFIX}"))
    }
}

/// Hidden prefix for the working file, e.g. `.report.` for `report.calico`.
pub fn temp_prefix(file_name: &str) -> String {
    let stem = file_name.strip_suffix(SUFFIX).unwrap_or(file_name);
    format!(".{stem}.")
}

pub fn final_path(output_dir: &Path, file_name: &str) -> PathBuf {
    output_dir.join(file_name)
}

/// Last path segment, as stored inside the archive.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
