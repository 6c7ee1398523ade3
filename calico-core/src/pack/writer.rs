use crate::domain::{ArchiveRequest, BuildReport, SkipReason, SkippedInput};
use crate::error::{CalicoError, Result};
use crate::naming::{TEMP_SUFFIX, base_name, final_path, normalize_output_name, temp_prefix};
use crate::policy::Policy;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// When true, every entry carries the zip epoch instead of its mtime,
    /// so identical inputs give byte-identical archives.
    pub deterministic: bool,
    pub policy: Policy,
}

/// Entries written so far, plus the inputs that were passed over.
#[derive(Default)]
struct Written {
    included: Vec<String>,
    skipped: Vec<SkippedInput>,
}

impl Written {
    fn skip(&mut self, path: &Path, reason: SkipReason) {
        warn!(path = %path.display(), %reason, "skipping input");
        self.skipped.push(SkippedInput {
            path: path.to_path_buf(),
            reason,
        });
    }
}

fn entry_time(md: &fs::Metadata, deterministic: bool) -> DateTime {
    if deterministic {
        return DateTime::default();
    }
    md.modified()
        .ok()
        .map(OffsetDateTime::from)
        .and_then(|t| {
            DateTime::from_date_and_time(
                u16::try_from(t.year()).ok()?,
                u8::from(t.month()),
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
            )
            .ok()
        })
        // anything before 1980 is not representable in a zip header
        .unwrap_or_default()
}

fn entry_options(md: &fs::Metadata, deterministic: bool) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(entry_time(md, deterministic))
        .large_file(md.len() >= u64::from(u32::MAX))
}

#[cfg(unix)]
fn widen_permissions(f: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    // temp files are created 0600
    f.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn widen_permissions(_f: &File) -> io::Result<()> {
    Ok(())
}

fn write_entries(
    tmp: NamedTempFile,
    files: &[PathBuf],
    deterministic: bool,
) -> Result<(NamedTempFile, Written)> {
    let mut zip = ZipWriter::new(tmp);
    let mut written = Written::default();
    let mut names = HashSet::new();

    for path in files {
        let md = match fs::metadata(path) {
            Ok(md) => md,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "stat failed");
                written.skip(path, SkipReason::Missing);
                continue;
            }
        };
        let name = match base_name(path) {
            Some(name) if md.is_file() => name,
            _ => {
                written.skip(path, SkipReason::NotAFile);
                continue;
            }
        };
        if !names.insert(name.clone()) {
            written.skip(path, SkipReason::DuplicateName);
            continue;
        }

        let mut src = File::open(path)?;
        zip.start_file(name.as_str(), entry_options(&md, deterministic))?;
        let n = io::copy(&mut src, &mut zip)?;
        debug!(entry = %name, bytes = n, "added");
        written.included.push(name);
    }

    let tmp = zip.finish()?;
    Ok((tmp, written))
}

fn publish(tmp: NamedTempFile, out: &Path, overwrite: bool) -> Result<()> {
    let res = if overwrite {
        tmp.persist(out)
    } else {
        tmp.persist_noclobber(out)
    };
    // on error the PersistError owns the temp file and removes it on drop
    match res {
        Ok(_) => Ok(()),
        Err(e) if !overwrite && e.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(CalicoError::AlreadyExists(out.to_path_buf()))
        }
        Err(e) => Err(e.error.into()),
    }
}

/// Builds `<output_dir>/<name>.calico` from the requested files.
///
/// The archive is written to a hidden `.zip` file next to the target and
/// renamed into place once complete. Inputs that are missing, not regular
/// files, or whose base name is already taken are skipped and reported.
/// On any error the working file is removed and nothing is published.
pub fn build(request: &ArchiveRequest, opts: &BuildOptions) -> Result<BuildReport> {
    let max = opts.policy.effective_max_files();
    if request.files.len() > max {
        return Err(CalicoError::LimitExceeded {
            count: request.files.len(),
            max,
        });
    }

    let file_name = normalize_output_name(&request.output_name)?;
    let out = final_path(&request.output_dir, &file_name);
    let overwrite = opts.policy.allow_overwrite;
    if !overwrite && out.exists() {
        return Err(CalicoError::AlreadyExists(out));
    }

    let prefix = temp_prefix(&file_name);
    let tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(&request.output_dir)?;
    debug!(temp = %tmp.path().display(), "writing archive");

    let (tmp, written) = write_entries(tmp, &request.files, opts.deterministic)?;
    widen_permissions(tmp.as_file())?;
    tmp.as_file().sync_all()?;
    publish(tmp, &out, overwrite)?;

    info!(
        archive = %out.display(),
        included = written.included.len(),
        skipped = written.skipped.len(),
        "archive created"
    );

    Ok(BuildReport {
        archive_path: out,
        file_name,
        output_dir: request.output_dir.clone(),
        included: written.included,
        skipped: written.skipped,
    })
}
