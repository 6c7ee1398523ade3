#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod list;
pub mod naming;
pub mod policy;
pub mod selection;

pub mod pack {
    pub mod writer;
}

// Re-exports: stable API surface
pub use domain::{ArchiveRequest, BuildReport, EntryRow, SkipReason, SkippedInput};
pub use error::{CalicoError, Result};
pub use list::list;
pub use pack::writer::{BuildOptions, build};
pub use policy::{MAX_FILES, Policy};
pub use selection::FileSelection;
