use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of inputs a single archive may be built from.
pub const MAX_FILES: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Lowers the input ceiling; values above `MAX_FILES` (or 0) mean `MAX_FILES`.
    pub max_files: usize,
    /// Replace an existing archive of the same name instead of failing.
    pub allow_overwrite: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            allow_overwrite: true,
        }
    }
}

impl Policy {
    pub fn effective_max_files(&self) -> usize {
        if self.max_files == 0 {
            MAX_FILES
        } else {
            self.max_files.min(MAX_FILES)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_files_is_clamped_to_ceiling() {
        let p = Policy {
            max_files: 50,
            ..Default::default()
        };
        assert_eq!(p.effective_max_files(), MAX_FILES);

        let p = Policy {
            max_files: 0,
            ..Default::default()
        };
        assert_eq!(p.effective_max_files(), MAX_FILES);

        let p = Policy {
            max_files: 5,
            ..Default::default()
        };
        assert_eq!(p.effective_max_files(), 5);
    }
}
